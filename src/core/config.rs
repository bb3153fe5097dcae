//! Rotation configuration.
//!
//! Reads the YAML file listing secrets and their destinations. Destinations
//! are decoded in two steps: the `type` discriminator is read from the raw
//! mapping first, then the mapping is decoded into the matching variant.

use std::path::Path;

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::core::constants;
use crate::core::destination::{
    DependabotSecret, Destination, EnvironmentSecret, RepositorySecret,
};
use crate::error::ConfigError;

/// A secret to rotate and every place it lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretSpec {
    pub name: String,
    pub description: String,
    pub destinations: Vec<Destination>,
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub secrets: Vec<SecretSpec>,
}

#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    secrets: Vec<RawSecret>,
}

#[derive(Deserialize)]
struct RawSecret {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    destinations: Vec<Mapping>,
}

impl Config {
    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file cannot be read, or any of
    /// the parse errors from [`Config::parse`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading config");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;

        let config = Self::parse(&contents, &path.display().to_string())?;

        debug!(secrets = config.secrets.len(), "config loaded");
        Ok(config)
    }

    /// Parse configuration from YAML text. `origin` names the source in errors.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed YAML and a destination
    /// error for entries with a missing or unknown `type`.
    pub fn parse(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawConfig = serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;

        let secrets = raw
            .secrets
            .into_iter()
            .map(|secret| {
                let destinations = secret
                    .destinations
                    .into_iter()
                    .enumerate()
                    .map(|(index, entry)| decode_destination(&secret.name, index, entry))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(SecretSpec {
                    name: secret.name,
                    description: secret.description,
                    destinations,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self { secrets })
    }
}

/// Decode one destination entry by its `type` discriminator.
fn decode_destination(
    secret: &str,
    index: usize,
    entry: Mapping,
) -> Result<Destination, ConfigError> {
    let kind = match entry.get("type") {
        None | Some(Value::Null) => {
            return Err(ConfigError::MissingDestinationType {
                secret: secret.to_string(),
                index,
            })
        }
        Some(Value::String(kind)) => kind.clone(),
        Some(other) => {
            return Err(ConfigError::UnsupportedDestinationType {
                secret: secret.to_string(),
                index,
                kind: render(other),
            })
        }
    };

    let invalid = |source| ConfigError::InvalidDestination {
        secret: secret.to_string(),
        index,
        source,
    };
    let payload = Value::Mapping(entry);

    match kind.as_str() {
        constants::TYPE_REPOSITORY => serde_yaml::from_value::<RepositorySecret>(payload)
            .map(Destination::Repository)
            .map_err(invalid),
        constants::TYPE_DEPENDABOT => serde_yaml::from_value::<DependabotSecret>(payload)
            .map(Destination::Dependabot)
            .map_err(invalid),
        constants::TYPE_ENVIRONMENT => {
            let dest = serde_yaml::from_value::<EnvironmentSecret>(payload).map_err(invalid)?;
            if dest.environment.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    secret: secret.to_string(),
                    index,
                    field: "environment",
                });
            }
            Ok(Destination::Environment(dest))
        }
        _ => Err(ConfigError::UnsupportedDestinationType {
            secret: secret.to_string(),
            index,
            kind,
        }),
    }
}

/// Render a YAML value the way it was written.
fn render(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|text| text.trim_end().to_string())
        .unwrap_or_else(|_| "<unprintable>".to_string())
}
