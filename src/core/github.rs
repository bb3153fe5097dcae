//! GitHub secret store.
//!
//! The [`SecretStore`] trait names the seven remote calls a destination
//! needs; [`GitHubClient`] implements them over the GitHub REST API with a
//! blocking HTTP client.

use std::fmt;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::error::{ApiError, Error, Result};

/// Result of a single remote call.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// A repository public key used to seal secret values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PublicKey {
    /// Identifier GitHub needs back alongside the ciphertext
    pub key_id: String,
    /// Base64-encoded X25519 public key
    pub key: String,
}

/// A sealed secret ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedSecret {
    /// Secret name at the destination
    pub name: String,
    /// Id of the public key the value was sealed with
    pub key_id: String,
    /// Base64 sealed box
    pub encrypted_value: String,
}

/// A repository reference in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Parse `owner/name`.
    ///
    /// Returns `None` unless the string has exactly two non-empty segments.
    pub fn parse(repo: &str) -> Option<Self> {
        let mut parts = repo.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                Some(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => None,
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Remote operations consumed by destinations.
pub trait SecretStore {
    /// Actions public key of a repository.
    fn repo_public_key(&self, repo: &RepoRef) -> ApiResult<PublicKey>;

    /// Dependabot public key of a repository.
    fn dependabot_public_key(&self, repo: &RepoRef) -> ApiResult<PublicKey>;

    /// Numeric id of a repository.
    fn repository_id(&self, repo: &RepoRef) -> ApiResult<u64>;

    /// Public key of a repository environment.
    fn environment_public_key(
        &self,
        repo_id: u64,
        environment: &str,
    ) -> ApiResult<PublicKey>;

    /// Create or update a repository Actions secret.
    fn put_repo_secret(
        &self,
        repo: &RepoRef,
        secret: &EncryptedSecret,
    ) -> ApiResult<()>;

    /// Create or update a repository Dependabot secret.
    fn put_dependabot_secret(
        &self,
        repo: &RepoRef,
        secret: &EncryptedSecret,
    ) -> ApiResult<()>;

    /// Create or update an environment secret.
    fn put_environment_secret(
        &self,
        repo_id: u64,
        environment: &str,
        secret: &EncryptedSecret,
    ) -> ApiResult<()>;
}

#[derive(Deserialize)]
struct Repository {
    id: u64,
}

#[derive(Serialize)]
struct SecretBody<'a> {
    encrypted_value: &'a str,
    key_id: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Authenticated GitHub REST client.
pub struct GitHubClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl GitHubClient {
    /// Create a client for `base_url` authenticated with `token`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if `base_url` cannot carry a path, or
    /// `ApiError::Transport` if the HTTP client cannot be built.
    pub fn new(base_url: &str, token: impl Into<String>) -> ApiResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let http = Client::builder()
            .user_agent(constants::USER_AGENT)
            .timeout(Duration::from_secs(constants::HTTP_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url,
            token: token.into(),
        })
    }

    /// Create a client using the token from `GITHUB_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingToken` if the variable is unset or empty.
    pub fn from_env(base_url: &str) -> Result<Self> {
        let token = std::env::var(constants::TOKEN_ENV)
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or(Error::MissingToken(constants::TOKEN_ENV))?;
        Ok(Self::new(base_url, token)?)
    }

    fn url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", constants::GITHUB_API_VERSION)
    }

    fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let url = self.url(segments)?;
        debug!(method = "GET", url = %url, "github request");

        let response = self.authorized(self.http.get(url)).send()?;
        Ok(check(response)?.json()?)
    }

    fn put_secret(
        &self,
        segments: &[&str],
        secret: &EncryptedSecret,
    ) -> ApiResult<()> {
        let url = self.url(segments)?;
        debug!(method = "PUT", url = %url, key_id = %secret.key_id, "github request");

        let body = SecretBody {
            encrypted_value: &secret.encrypted_value,
            key_id: &secret.key_id,
        };
        let response = self.authorized(self.http.put(url)).json(&body).send()?;
        check(response)?;
        Ok(())
    }
}

/// Turn a non-2xx response into `ApiError::Status`.
fn check(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or_else(|_| {
            if text.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                text
            }
        });

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

impl SecretStore for GitHubClient {
    fn repo_public_key(&self, repo: &RepoRef) -> ApiResult<PublicKey> {
        self.get(&[
            "repos",
            &repo.owner,
            &repo.name,
            "actions",
            "secrets",
            "public-key",
        ])
    }

    fn dependabot_public_key(&self, repo: &RepoRef) -> ApiResult<PublicKey> {
        self.get(&[
            "repos",
            &repo.owner,
            &repo.name,
            "dependabot",
            "secrets",
            "public-key",
        ])
    }

    fn repository_id(&self, repo: &RepoRef) -> ApiResult<u64> {
        let repository: Repository = self.get(&["repos", &repo.owner, &repo.name])?;
        Ok(repository.id)
    }

    fn environment_public_key(
        &self,
        repo_id: u64,
        environment: &str,
    ) -> ApiResult<PublicKey> {
        let id = repo_id.to_string();
        self.get(&[
            "repositories",
            &id,
            "environments",
            environment,
            "secrets",
            "public-key",
        ])
    }

    fn put_repo_secret(
        &self,
        repo: &RepoRef,
        secret: &EncryptedSecret,
    ) -> ApiResult<()> {
        self.put_secret(
            &[
                "repos",
                &repo.owner,
                &repo.name,
                "actions",
                "secrets",
                &secret.name,
            ],
            secret,
        )
    }

    fn put_dependabot_secret(
        &self,
        repo: &RepoRef,
        secret: &EncryptedSecret,
    ) -> ApiResult<()> {
        self.put_secret(
            &[
                "repos",
                &repo.owner,
                &repo.name,
                "dependabot",
                "secrets",
                &secret.name,
            ],
            secret,
        )
    }

    fn put_environment_secret(
        &self,
        repo_id: u64,
        environment: &str,
        secret: &EncryptedSecret,
    ) -> ApiResult<()> {
        let id = repo_id.to_string();
        self.put_secret(
            &[
                "repositories",
                &id,
                "environments",
                environment,
                "secrets",
                &secret.name,
            ],
            secret,
        )
    }
}
