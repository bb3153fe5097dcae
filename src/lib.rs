//! key-rotator - rotate GitHub secrets from the command line.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── rotate        # Rotate secrets from a config file
//! │   ├── prompt        # Terminal prompts (hidden input, confirmation)
//! │   ├── version       # Version and changelog link
//! │   ├── completions   # Shell completions
//! │   └── output        # Coloured output helpers
//! └── core/             # Core library components
//!     ├── config        # YAML config parsing
//!     ├── crypto        # Sealed-box encryption
//!     ├── destination   # Repository, Dependabot, and environment secrets
//!     ├── github        # SecretStore trait and GitHub REST client
//!     ├── rotation      # Prompt, preview, confirm, apply
//!     └── version       # Build metadata
//! ```
//!
//! # Example
//!
//! ```yaml
//! secrets:
//!   - name: npm-token
//!     description: Publish token for npm
//!     destinations:
//!       - type: github-repository
//!         repo: octo/widgets
//!         name: NPM_TOKEN
//!       - type: github-repository-environment
//!         repo: octo/widgets
//!         environment: production
//!         name: NPM_TOKEN
//! ```

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::config::{Config, SecretSpec};
pub use crate::core::destination::Destination;
pub use crate::core::github::{GitHubClient, SecretStore};
pub use crate::core::rotation::{Prompter, RotationSummary, Rotator};
pub use crate::error::{Error, Result};
