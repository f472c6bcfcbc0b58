//! Serde models for the GitHub REST API payloads this server consumes
//!
//! Only the fields the showcase operations project are deserialized; the rest
//! of the upstream payload is ignored. Timestamps are kept as the opaque
//! ISO-8601 strings GitHub returns and are never parsed.

use serde::Deserialize;

/// A repository object as returned by `GET /users/{account}/repos` and
/// `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub fork: bool,
    pub html_url: String,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub language: Option<String>,
    /// Absent on older API responses, so default to empty.
    #[serde(default)]
    pub topics: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
    /// Null for repositories that have never been pushed to.
    pub pushed_at: Option<String>,
}

/// A user object as returned by `GET /users/{account}`.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
    pub public_repos: u64,
    pub followers: u64,
    pub following: u64,
}
