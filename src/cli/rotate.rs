//! Rotate command - prompt for new values and push them to every destination.

use std::io;
use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::cli::prompt::TerminalPrompter;
use crate::core::config::Config;
use crate::core::github::GitHubClient;
use crate::core::rotation::Rotator;
use crate::error::Result;

/// Execute a rotation run.
pub fn execute(config_path: &Path, dry_run: bool, api_url: &str) -> Result<()> {
    info!(config = %config_path.display(), dry_run, "starting rotation");

    if dry_run {
        output::warn("Running in dry-run mode, no changes will be made");
    }

    let config = Config::load(config_path)?;
    let client = GitHubClient::from_env(api_url)?;

    if config.secrets.is_empty() {
        output::dimmed("no secrets configured");
        return Ok(());
    }

    let mut prompter = TerminalPrompter::new();
    let mut stdout = io::stdout();
    let summary = Rotator::new(&client, &mut prompter, &mut stdout, dry_run).run(&config.secrets)?;

    if summary.applied > 0 {
        let noun = if summary.applied == 1 {
            "destination"
        } else {
            "destinations"
        };
        output::success(&format!("{} {} updated", summary.applied, noun));
    }

    Ok(())
}
