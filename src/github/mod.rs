//! Minimal authenticated client for the GitHub REST API
//!
//! All showcase operations go through [`GithubClient`]. The client is
//! stateless and cheap to clone; connection pooling is left to reqwest.
//! There is no caching, no retry and no timeout — a hung upstream call hangs
//! the invoking task.

pub mod models;

use serde::de::DeserializeOwned;
use thiserror::Error;

pub use models::{Repository, User};

/// Production GitHub API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Accept header for JSON API calls.
const ACCEPT_JSON: &str = "application/vnd.github+json";

/// Accept header that makes the readme endpoint return raw file bytes.
const ACCEPT_RAW: &str = "application/vnd.github.raw";

const USER_AGENT: &str = concat!(
    "gitfolio/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/tacogips/gitfolio)"
);

/// Failure talking to the GitHub API.
///
/// `Status` is the only variant callers are expected to branch on; the README
/// fetch path treats every variant as "absent" instead.
#[derive(Debug, Error)]
pub enum GithubApiError {
    /// The API answered with a non-2xx status.
    #[error("GitHub API returned {status} {status_text} for {path}")]
    Status {
        status: u16,
        status_text: String,
        path: String,
    },

    /// The request never produced a response.
    #[error("request to {path} failed: {source}")]
    Request {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Raw response body plus the success flag, for endpoints where a non-2xx
/// answer is an expected outcome rather than an error.
#[derive(Debug, Clone)]
pub struct RawBody {
    pub ok: bool,
    pub text: String,
}

/// Outcome of a best-effort README fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readme {
    Content(String),
    Absent,
}

#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GithubClient {
    /// Creates a client against the production GitHub API.
    pub fn new(token: Option<String>) -> Self {
        Self::with_base_url(DEFAULT_API_BASE_URL, token)
    }

    /// Creates a client against a custom base URL. Used by tests to point the
    /// client at a mock server.
    pub fn with_base_url(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, path: &str, accept: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .header("Accept", accept)
            .header("User-Agent", USER_AGENT);

        if let Some(token) = &self.token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        builder
    }

    /// Performs a GET against `base_url + path` and decodes the JSON body.
    ///
    /// A non-2xx status fails with [`GithubApiError::Status`]; the caller
    /// decides whether to recover or propagate.
    pub async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GithubApiError> {
        tracing::debug!(path, "GitHub API request");

        let response = self
            .request(path, ACCEPT_JSON)
            .send()
            .await
            .map_err(|source| GithubApiError::Request {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GithubApiError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("unknown").to_string(),
                path: path.to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| GithubApiError::Decode {
                path: path.to_string(),
                source,
            })
    }

    /// Performs the same GET but returns the body as text together with a
    /// success flag instead of decoding JSON or failing on non-2xx.
    pub async fn fetch_raw(&self, path: &str, accept: &str) -> Result<RawBody, GithubApiError> {
        tracing::debug!(path, accept, "GitHub API raw request");

        let response = self
            .request(path, accept)
            .send()
            .await
            .map_err(|source| GithubApiError::Request {
                path: path.to_string(),
                source,
            })?;

        let ok = response.status().is_success();
        let text = response
            .text()
            .await
            .map_err(|source| GithubApiError::Decode {
                path: path.to_string(),
                source,
            })?;

        Ok(RawBody { ok, text })
    }

    /// Fetches the README of any owner/repo pair as raw text.
    ///
    /// A missing README is an expected outcome, so every failure — non-2xx,
    /// network error, undecodable body — maps to [`Readme::Absent`].
    pub async fn readme(&self, owner: &str, repo: &str) -> Readme {
        let path = format!("/repos/{}/{}/readme", owner, repo);
        match self.fetch_raw(&path, ACCEPT_RAW).await {
            Ok(body) if body.ok => Readme::Content(body.text),
            Ok(_) => Readme::Absent,
            Err(err) => {
                tracing::debug!(owner, repo, error = %err, "README fetch failed, treating as absent");
                Readme::Absent
            }
        }
    }
}
