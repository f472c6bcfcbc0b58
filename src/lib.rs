//! Gitfolio MCP Library
//!
//! This library exposes a single GitHub account's public footprint —
//! repositories, README files, language breakdowns, profile and an aggregate
//! technology summary — as read-only tools for AI agents.
//!
//! ## Transports
//!
//! The same six operations are served through two interchangeable surfaces:
//!
//! - MCP over STDIN/STDOUT (the default), for tool-calling agent runtimes
//! - A plain JSON-over-HTTP proxy (`GET /health`, `GET /tools`,
//!   `POST /call/:tool`), for callers that do not speak MCP
//!
//! Exactly one transport is selected at startup: HTTP when a listen port is
//! configured (explicitly via `PORT`, or implied by a cloud platform
//! variable), stdio otherwise.
//!
//! ## Authentication
//!
//! GitHub requests work with or without a token. Set `GITFOLIO_GITHUB_TOKEN`
//! (or `GITHUB_TOKEN`) to raise the API rate limit from 60 to 5,000
//! requests/hour:
//!
//! ```bash
//! export GITFOLIO_GITHUB_TOKEN=your_github_token
//! ```
//!
//! The target account is fixed per process via `GITFOLIO_ACCOUNT`.
//!
//! ## Usage
//!
//! ```no_run
//! use gitfolio::config::ServerConfig;
//! use gitfolio::github::GithubClient;
//! use gitfolio::showcase::ShowcaseService;
//!
//! let config = ServerConfig::from_env();
//! let client = GithubClient::new(config.github_token.clone());
//! let service = ShowcaseService::new(client, config.account.clone());
//! ```

pub mod config;
pub mod github;
pub mod showcase;
pub mod tools;
pub mod transport;
