//! Process configuration for the gitfolio server
//!
//! All configuration is read from the environment exactly once at startup and
//! carried in an immutable [`ServerConfig`] that is passed explicitly to the
//! GitHub client and the transports. There is no process-wide mutable state.

use std::env;

/// Account queried when `GITFOLIO_ACCOUNT` is not set.
pub const DEFAULT_ACCOUNT: &str = "octocat";

/// Port implied by a cloud platform when no explicit `PORT` is given.
pub const DEFAULT_CLOUD_PORT: u16 = 8080;

/// Environment variables whose presence signals a cloud platform that expects
/// an HTTP listener (Render, Railway, Fly.io, Cloud Run, Heroku).
const CLOUD_SIGNALS: &[&str] = &[
    "RENDER",
    "RAILWAY_ENVIRONMENT",
    "FLY_APP_NAME",
    "K_SERVICE",
    "DYNO",
];

/// Which transport the process runs for its whole lifetime.
///
/// Exactly one is selected at startup; there is no runtime switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// MCP over stdin/stdout.
    Stdio,
    /// Plain JSON-over-HTTP proxy on the given port.
    Http(u16),
}

/// Immutable server configuration constructed before any transport starts.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// GitHub login whose repositories and profile are exposed.
    pub account: String,
    /// Optional GitHub token. Without it requests are unauthenticated and
    /// subject to the 60 requests/hour rate limit.
    pub github_token: Option<String>,
    /// Explicit or cloud-implied listen port. `None` selects stdio mode.
    pub listen_port: Option<u16>,
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// - `GITFOLIO_ACCOUNT` — target account (defaults to [`DEFAULT_ACCOUNT`])
    /// - `GITFOLIO_GITHUB_TOKEN`, falling back to `GITHUB_TOKEN` — API token
    /// - `PORT` — explicit HTTP listen port
    ///
    /// When no `PORT` is set but a cloud platform variable is present, the
    /// port defaults to [`DEFAULT_CLOUD_PORT`] so that deployments on those
    /// platforms come up in HTTP mode without extra configuration.
    pub fn from_env() -> Self {
        let account = env::var("GITFOLIO_ACCOUNT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ACCOUNT.to_string());

        let github_token = env::var("GITFOLIO_GITHUB_TOKEN")
            .ok()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .filter(|v| !v.trim().is_empty());

        let explicit_port = env::var("PORT").ok().and_then(|v| v.parse::<u16>().ok());
        let listen_port = resolve_port(explicit_port, cloud_platform_present());

        Self {
            account,
            github_token,
            listen_port,
        }
    }

    /// The transport this configuration selects: stdio unless a port is
    /// configured, HTTP otherwise.
    pub fn transport(&self) -> Transport {
        match self.listen_port {
            Some(port) => Transport::Http(port),
            None => Transport::Stdio,
        }
    }
}

fn cloud_platform_present() -> bool {
    CLOUD_SIGNALS.iter().any(|name| env::var_os(name).is_some())
}

fn resolve_port(explicit: Option<u16>, on_cloud_platform: bool) -> Option<u16> {
    match explicit {
        Some(port) => Some(port),
        None if on_cloud_platform => Some(DEFAULT_CLOUD_PORT),
        None => None,
    }
}
