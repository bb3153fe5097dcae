//! Rotation driver.
//!
//! Walks the configured secrets one at a time: ask for the new value, show
//! the destinations, ask for confirmation, then apply (or simulate) the
//! update for each destination in configured order. The first failed
//! update stops the run.

use std::io::Write;

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::config::SecretSpec;
use crate::core::github::SecretStore;
use crate::error::{Error, Result};

/// Source of operator input.
pub trait Prompter {
    /// Read a secret value without echoing it.
    ///
    /// # Errors
    ///
    /// Returns `Error::Input` when input cannot be read.
    fn secret_value(&mut self, title: &str) -> Result<Zeroizing<String>>;

    /// Ask a yes/no question; `true` only for an explicit yes.
    ///
    /// # Errors
    ///
    /// Returns `Error::Input` when input cannot be read.
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Counts of what happened during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RotationSummary {
    /// Destinations written
    pub applied: usize,
    /// Destinations reported by a dry run
    pub simulated: usize,
    /// Secrets the operator declined
    pub cancelled: usize,
}

/// Question asked before any destination is touched.
pub const CONFIRM_QUESTION: &str = "Do you want to proceed with updating these destinations? (y/N)";

/// Interpret a confirmation answer. Only `y` or `Y` count as yes.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim(), "y" | "Y")
}

/// Runs a rotation against a store, reading from a prompter and writing
/// progress to `out`.
pub struct Rotator<'a, S: ?Sized, P: ?Sized, W: ?Sized> {
    store: &'a S,
    prompter: &'a mut P,
    out: &'a mut W,
    dry_run: bool,
}

impl<'a, S, P, W> Rotator<'a, S, P, W>
where
    S: SecretStore + ?Sized,
    P: Prompter + ?Sized,
    W: Write + ?Sized,
{
    pub fn new(store: &'a S, prompter: &'a mut P, out: &'a mut W, dry_run: bool) -> Self {
        Self {
            store,
            prompter,
            out,
            dry_run,
        }
    }

    /// Rotate every secret in order.
    ///
    /// # Errors
    ///
    /// Stops at the first input failure or failed destination update.
    pub fn run(&mut self, secrets: &[SecretSpec]) -> Result<RotationSummary> {
        let mut summary = RotationSummary::default();

        for secret in secrets {
            self.rotate(secret, &mut summary)?;
        }

        info!(
            applied = summary.applied,
            simulated = summary.simulated,
            cancelled = summary.cancelled,
            "rotation finished"
        );
        Ok(summary)
    }

    fn rotate(&mut self, secret: &SecretSpec, summary: &mut RotationSummary) -> Result<()> {
        debug!(
            secret = %secret.name,
            destinations = secret.destinations.len(),
            "rotating secret"
        );

        let title = format!("{}: {}", secret.name, secret.description);
        let value = self.prompter.secret_value(&title)?;
        if value.is_empty() {
            return Err(Error::EmptyValue(secret.name.clone()));
        }

        writeln!(self.out, "The following destinations will be updated:")?;
        for dest in &secret.destinations {
            writeln!(self.out, "- {}", dest.describe())?;
        }

        if !self.prompter.confirm(CONFIRM_QUESTION)? {
            writeln!(self.out, "Operation cancelled by the user.")?;
            summary.cancelled += 1;
            return Ok(());
        }

        for dest in &secret.destinations {
            if self.dry_run {
                writeln!(
                    self.out,
                    "[Dry Run] Would update {} with provided secret value for {}",
                    dest.describe(),
                    secret.name
                )?;
                summary.simulated += 1;
            } else {
                dest.update(self.store, &value)?;
                writeln!(self.out, "Updated {}", dest.describe())?;
                summary.applied += 1;
            }
        }

        Ok(())
    }
}
