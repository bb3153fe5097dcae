//! Version command.

use crate::core::version;
use crate::error::Result;

/// Print the version, build date, and release notes link.
pub fn execute() -> Result<()> {
    println!(
        "{}",
        version::format_version(version::version(), version::build_date())
    );
    Ok(())
}
