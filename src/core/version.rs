//! Build metadata and version formatting.

use std::sync::OnceLock;

use regex::Regex;

use crate::core::constants;

/// Version baked in at build time, falling back to the crate version.
pub fn version() -> &'static str {
    option_env!("KEY_ROTATOR_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Build date (`YYYY-MM-DD`) baked in at build time, or empty.
pub fn build_date() -> &'static str {
    option_env!("KEY_ROTATOR_BUILD_DATE").unwrap_or("")
}

/// Format the `version` command output.
///
/// A leading `v` is dropped and the build date is shown in parentheses
/// when known. The second line links to the release notes.
pub fn format_version(version: &str, build_date: &str) -> String {
    let version = version.strip_prefix('v').unwrap_or(version);

    let date = if build_date.is_empty() {
        String::new()
    } else {
        format!(" ({})", build_date)
    };

    format!(
        "{} version {}{}\n{}",
        constants::BIN_NAME,
        version,
        date,
        changelog_url(version)
    )
}

/// Release notes link for `version`, or the latest release when it is not
/// a semantic version.
pub fn changelog_url(version: &str) -> String {
    if !is_semver(version) {
        return format!("{}/releases/latest", constants::REPO_URL);
    }

    format!(
        "{}/releases/tag/v{}",
        constants::REPO_URL,
        version.strip_prefix('v').unwrap_or(version)
    )
}

fn is_semver(version: &str) -> bool {
    static SEMVER: OnceLock<Option<Regex>> = OnceLock::new();
    SEMVER
        .get_or_init(|| Regex::new(r"^v?\d+\.\d+\.\d+(-[\w.]+)?$").ok())
        .as_ref()
        .is_some_and(|semver| semver.is_match(version))
}
