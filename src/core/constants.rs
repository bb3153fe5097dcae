//! Constants used throughout key-rotator.
//!
//! Centralizes magic strings and configuration values.

/// Binary name, used in version output and completions.
pub const BIN_NAME: &str = "key-rotator";

/// Environment variable holding the GitHub token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable overriding the GitHub API url.
pub const API_URL_ENV: &str = "GITHUB_API_URL";

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "KEY_ROTATOR_LOG";

/// Default GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// REST API version sent with every request.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// User agent sent with every request (GitHub rejects requests without one).
pub const USER_AGENT: &str = concat!("key-rotator/", env!("CARGO_PKG_VERSION"));

/// Per-request timeout.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Project home, used to build changelog links.
pub const REPO_URL: &str = "https://github.com/lucasmelin/key-rotator";

/// Destination `type` discriminators accepted in the config file.
pub const TYPE_REPOSITORY: &str = "github-repository";
pub const TYPE_DEPENDABOT: &str = "github-repository-dependabot";
pub const TYPE_ENVIRONMENT: &str = "github-repository-environment";
