//! A local stand-in for the GitHub secrets API.
//!
//! An axum router on an ephemeral port, run on its own thread. Every
//! request is recorded before it is answered. Repositories owned by
//! `missing` answer 404.

use std::sync::{Arc, Mutex};
use std::thread;

use axum::body::{to_bytes, Body};
use axum::extract::{Path, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use crypto_box::SecretKey;
use key_rotator::core::crypto;
use serde_json::json;

/// Numeric id returned for every repository.
pub const REPO_ID: u64 = 1234;

/// Key id returned with every public key.
pub const KEY_ID: &str = "568250167242549743";

/// Owner whose repositories do not exist.
pub const MISSING_OWNER: &str = "missing";

/// A request received by the server.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    /// Path as sent, still percent-encoded
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

impl Recorded {
    /// Decode the JSON body.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is not JSON")
    }
}

#[derive(Clone)]
struct ServerState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    public_key: Arc<str>,
}

/// Running mock server.
pub struct MockGitHub {
    url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
    secret_key: SecretKey,
}

impl MockGitHub {
    /// Bind to an ephemeral port and serve in a background thread.
    pub fn start() -> Self {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("failed to bind");
        listener
            .set_nonblocking(true)
            .expect("failed to set non-blocking");
        let url = format!("http://{}", listener.local_addr().unwrap());

        let (secret_key, public_key) = crypto::generate_keypair();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = ServerState {
            requests: Arc::clone(&requests),
            public_key: public_key.into(),
        };

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("failed to adopt listener");
                axum::serve(listener, router(state))
                    .await
                    .expect("mock server failed");
            });
        });

        Self {
            url,
            requests,
            secret_key,
        }
    }

    /// Base url to pass as `--api-url`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// `METHOD path` for every request received so far.
    pub fn routes(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    /// Decrypt a sealed value uploaded to this server.
    pub fn open(&self, sealed: &str) -> String {
        String::from_utf8(crypto::open(sealed, &self.secret_key).unwrap()).unwrap()
    }
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/repos/{owner}/{repo}", get(repository))
        .route(
            "/repos/{owner}/{repo}/{scope}/secrets/public-key",
            get(repo_public_key),
        )
        .route("/repos/{owner}/{repo}/{scope}/secrets/{name}", put(put_repo_secret))
        .route(
            "/repositories/{id}/environments/{environment}/secrets/public-key",
            get(environment_public_key),
        )
        .route(
            "/repositories/{id}/environments/{environment}/secrets/{name}",
            put(put_environment_secret),
        )
        .fallback(|| async { not_found() })
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

/// Record the request, then hand it on with its body intact.
async fn record(State(state): State<ServerState>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();

    state.requests.lock().unwrap().push(Recorded {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        authorization: parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body: String::from_utf8_lossy(&bytes).into_owned(),
    });

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Not Found" })),
    )
        .into_response()
}

fn public_key(state: &ServerState) -> Response {
    Json(json!({ "key_id": KEY_ID, "key": &*state.public_key })).into_response()
}

fn known_repo(owner: &str, scope: Option<&str>) -> bool {
    owner != MISSING_OWNER && scope.map_or(true, |s| s == "actions" || s == "dependabot")
}

async fn repository(Path((owner, _repo)): Path<(String, String)>) -> Response {
    if !known_repo(&owner, None) {
        return not_found();
    }
    Json(json!({ "id": REPO_ID })).into_response()
}

async fn repo_public_key(
    State(state): State<ServerState>,
    Path((owner, _repo, scope)): Path<(String, String, String)>,
) -> Response {
    if !known_repo(&owner, Some(&scope)) {
        return not_found();
    }
    public_key(&state)
}

async fn put_repo_secret(
    Path((owner, _repo, scope, _name)): Path<(String, String, String, String)>,
) -> Response {
    if !known_repo(&owner, Some(&scope)) {
        return not_found();
    }
    StatusCode::CREATED.into_response()
}

async fn environment_public_key(
    State(state): State<ServerState>,
    Path((id, _environment)): Path<(u64, String)>,
) -> Response {
    if id != REPO_ID {
        return not_found();
    }
    public_key(&state)
}

async fn put_environment_secret(
    Path((id, _environment, _name)): Path<(u64, String, String)>,
) -> Response {
    if id != REPO_ID {
        return not_found();
    }
    StatusCode::NO_CONTENT.into_response()
}
