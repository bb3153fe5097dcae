//! Secret destinations.
//!
//! A destination is one remote place a rotated value is written to. Every
//! variant follows the same sequence: resolve the repository, fetch the
//! scoped public key, seal the value, upload it.

use serde::Deserialize;
use tracing::debug;

use crate::core::crypto;
use crate::core::github::{EncryptedSecret, PublicKey, RepoRef, SecretStore};
use crate::error::{ApiError, UpdateError};

/// Repository Actions secret.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositorySecret {
    #[serde(default)]
    pub description: String,
    pub repo: String,
    pub name: String,
}

/// Repository Dependabot secret.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DependabotSecret {
    #[serde(default)]
    pub description: String,
    pub repo: String,
    pub name: String,
}

/// Repository environment secret.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnvironmentSecret {
    #[serde(default)]
    pub description: String,
    pub repo: String,
    pub name: String,
    pub environment: String,
}

/// Where a rotated secret is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Repository(RepositorySecret),
    Dependabot(DependabotSecret),
    Environment(EnvironmentSecret),
}

impl Destination {
    /// Configured `owner/name` string.
    pub fn repo(&self) -> &str {
        match self {
            Self::Repository(d) => &d.repo,
            Self::Dependabot(d) => &d.repo,
            Self::Environment(d) => &d.repo,
        }
    }

    /// Secret name at the destination.
    pub fn secret_name(&self) -> &str {
        match self {
            Self::Repository(d) => &d.name,
            Self::Dependabot(d) => &d.name,
            Self::Environment(d) => &d.name,
        }
    }

    /// Free-form description from the config file.
    pub fn description(&self) -> &str {
        match self {
            Self::Repository(d) => &d.description,
            Self::Dependabot(d) => &d.description,
            Self::Environment(d) => &d.description,
        }
    }

    /// Human-readable summary shown before and after an update.
    pub fn describe(&self) -> String {
        let summary = match self {
            Self::Repository(d) => format!(
                "{} GitHub Repository Secret in the {} repository",
                d.name, d.repo
            ),
            Self::Dependabot(d) => format!(
                "{} GitHub Dependabot Repository Secret in the {} repository",
                d.name, d.repo
            ),
            Self::Environment(d) => format!(
                "{} GitHub Repository Environment Secret in the {} repository's {} environment",
                d.name, d.repo, d.environment
            ),
        };

        if self.description().is_empty() {
            summary
        } else {
            format!("{} ({})", summary, self.description())
        }
    }

    /// Write `value` to this destination.
    ///
    /// Nothing is sent to the store when the repo string is malformed.
    ///
    /// # Errors
    ///
    /// Returns the `UpdateError` for the step that failed; later steps are
    /// not attempted.
    pub fn update<S>(&self, store: &S, value: &str) -> Result<(), UpdateError>
    where
        S: SecretStore + ?Sized,
    {
        let repo = RepoRef::parse(self.repo())
            .ok_or_else(|| UpdateError::InvalidDestinationFormat(self.repo().to_string()))?;

        debug!(repo = %repo, secret = self.secret_name(), "updating destination");

        match self {
            Self::Repository(d) => {
                let key = store
                    .repo_public_key(&repo)
                    .map_err(|source| key_error(&repo, source))?;
                let secret = seal_for(&d.name, &key, value)?;
                store
                    .put_repo_secret(&repo, &secret)
                    .map_err(|source| upload_error(&repo, &d.name, source))
            }
            Self::Dependabot(d) => {
                let key = store
                    .dependabot_public_key(&repo)
                    .map_err(|source| key_error(&repo, source))?;
                let secret = seal_for(&d.name, &key, value)?;
                store
                    .put_dependabot_secret(&repo, &secret)
                    .map_err(|source| upload_error(&repo, &d.name, source))
            }
            Self::Environment(d) => {
                let repo_id =
                    store
                        .repository_id(&repo)
                        .map_err(|source| UpdateError::RepositoryLookup {
                            repo: repo.to_string(),
                            source,
                        })?;
                let key = store
                    .environment_public_key(repo_id, &d.environment)
                    .map_err(|source| key_error(&repo, source))?;
                let secret = seal_for(&d.name, &key, value)?;
                store
                    .put_environment_secret(repo_id, &d.environment, &secret)
                    .map_err(|source| upload_error(&repo, &d.name, source))
            }
        }
    }
}

fn seal_for(name: &str, key: &PublicKey, value: &str) -> Result<EncryptedSecret, UpdateError> {
    let encrypted_value = crypto::seal(value.as_bytes(), &key.key)?;
    Ok(EncryptedSecret {
        name: name.to_string(),
        key_id: key.key_id.clone(),
        encrypted_value,
    })
}

fn key_error(repo: &RepoRef, source: ApiError) -> UpdateError {
    UpdateError::PublicKeyFetch {
        repo: repo.to_string(),
        source,
    }
}

fn upload_error(repo: &RepoRef, name: &str, source: ApiError) -> UpdateError {
    UpdateError::SecretUpload {
        name: name.to_string(),
        repo: repo.to_string(),
        source,
    }
}
