//! Command-line interface.

pub mod completions;
pub mod output;
pub mod prompt;
pub mod rotate;
pub mod version;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::constants;

/// key-rotator - rotate your secrets from the command line.
#[derive(Parser)]
#[command(
    name = "key-rotator",
    about = "Rotate your secrets from the command line.",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Rotate secrets based on the provided configuration file
    Rotate {
        /// Path to the YAML config file
        config: PathBuf,
        /// Print out the changes that would be made without actually making them
        #[arg(long)]
        dry_run: bool,
        /// GitHub REST API base url
        #[arg(long, env = constants::API_URL_ENV, default_value = constants::DEFAULT_API_URL)]
        api_url: String,
    },

    /// Print version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Rotate {
            config,
            dry_run,
            api_url,
        } => rotate::execute(&config, dry_run, &api_url),
        Version => version::execute(),
        Completions { shell } => completions::execute(shell),
    }
}
