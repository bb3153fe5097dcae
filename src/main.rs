//! key-rotator - rotate GitHub secrets from the command line.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use key_rotator::cli::output;
use key_rotator::cli::{execute, Cli};
use key_rotator::core::constants;
use key_rotator::error::{ConfigError, Error};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("key_rotator=debug")
        } else {
            EnvFilter::new("key_rotator=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command) {
        let suggestion = match &e {
            Error::MissingToken(var) => Some(format!("export {}=<token>", var)),
            Error::Config(ConfigError::ReadFile { .. }) => {
                Some("pass the path to your YAML config file".to_string())
            }
            Error::Config(ConfigError::UnsupportedDestinationType { .. }) => Some(format!(
                "supported types: {}, {}, {}",
                constants::TYPE_REPOSITORY,
                constants::TYPE_DEPENDABOT,
                constants::TYPE_ENVIRONMENT
            )),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
