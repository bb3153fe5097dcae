//! Error types.
//!
//! Each concern has its own error enum; all of them convert into the
//! top-level [`Error`] so commands can propagate with `?` up to `main`.

use thiserror::Error;

/// Top-level error returned by every command.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Update(#[from] UpdateError),

    #[error("failed to read input: {0}")]
    Input(String),

    #[error("no value entered for {0}")]
    EmptyValue(String),

    #[error("the {0} environment variable must be set")]
    MissingToken(&'static str),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to open {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("destination {index} of secret '{secret}': destination type is required")]
    MissingDestinationType { secret: String, index: usize },

    #[error("destination {index} of secret '{secret}': unsupported destination type: {kind}")]
    UnsupportedDestinationType {
        secret: String,
        index: usize,
        kind: String,
    },

    #[error("destination {index} of secret '{secret}': {source}")]
    InvalidDestination {
        secret: String,
        index: usize,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("destination {index} of secret '{secret}': missing required field '{field}'")]
    MissingField {
        secret: String,
        index: usize,
        field: &'static str,
    },
}

/// Failures while writing a secret to a single destination.
#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("invalid destination format: {0}")]
    InvalidDestinationFormat(String),

    #[error("failed to get repository {repo}: {source}")]
    RepositoryLookup {
        repo: String,
        #[source]
        source: ApiError,
    },

    #[error("failed to get public key for {repo}: {source}")]
    PublicKeyFetch {
        repo: String,
        #[source]
        source: ApiError,
    },

    #[error("failed to encrypt secret: {0}")]
    SecretEncryption(#[from] CipherError),

    #[error("failed to update secret {name} in {repo}: {source}")]
    SecretUpload {
        name: String,
        repo: String,
        #[source]
        source: ApiError,
    },
}

/// Sealed-box encryption errors.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("failed to decode public key: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("public key must be 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
}

/// Remote secret store errors.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid API url: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, Error>;
