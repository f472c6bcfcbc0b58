//! Domain operations over the configured GitHub account
//!
//! [`ShowcaseService`] implements the six read-only operations both
//! transports expose. Every operation is a pure function of the current
//! upstream state and its validated arguments: aggregates are recomputed from
//! scratch on each call and nothing is cached between calls.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::github::{GithubApiError, GithubClient, Readme, Repository, User};

/// Substituted for the README body when the fetch fails for any reason.
pub const NO_README_PLACEHOLDER: &str = "(No README found)";

/// Upstream page size; the showcase never paginates past the first page.
const REPOS_PER_PAGE: u16 = 100;

/// Sort order for `list_repos`.
///
/// `Updated` keeps the upstream most-recently-updated-first order untouched;
/// the other two re-sort client-side.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    serde::Deserialize,
    serde::Serialize,
    schemars::JsonSchema,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortKey {
    #[default]
    Updated,
    Stars,
    Name,
}

/// Projection of a repository for `list_repos`.
#[derive(Debug, Serialize)]
struct RepoSummaryView {
    name: String,
    description: Option<String>,
    language: Option<String>,
    stars: u64,
    forks: u64,
    topics: Vec<String>,
    url: String,
    updated: String,
}

impl From<Repository> for RepoSummaryView {
    fn from(repo: Repository) -> Self {
        Self {
            name: repo.name,
            description: repo.description,
            language: repo.language,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            topics: repo.topics,
            url: repo.html_url,
            updated: repo.updated_at,
        }
    }
}

/// Projection of a repository for `get_repo_details`.
#[derive(Debug, Serialize)]
struct RepoDetailView {
    name: String,
    full_name: String,
    description: Option<String>,
    language: Option<String>,
    stars: u64,
    forks: u64,
    topics: Vec<String>,
    url: String,
    created: String,
    updated: String,
    pushed: Option<String>,
}

impl From<Repository> for RepoDetailView {
    fn from(repo: Repository) -> Self {
        Self {
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description,
            language: repo.language,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            topics: repo.topics,
            url: repo.html_url,
            created: repo.created_at,
            updated: repo.updated_at,
            pushed: repo.pushed_at,
        }
    }
}

/// One entry of the per-repository language breakdown.
#[derive(Debug, Serialize)]
struct LanguageEntryView {
    language: String,
    bytes: u64,
    percentage: String,
}

/// Projection of the account profile.
#[derive(Debug, Serialize)]
struct ProfileView {
    login: String,
    display_name: Option<String>,
    bio: Option<String>,
    location: Option<String>,
    company: Option<String>,
    website_url: Option<String>,
    avatar_url: String,
    profile_url: String,
    public_repos: u64,
    followers: u64,
    following: u64,
}

impl From<User> for ProfileView {
    fn from(user: User) -> Self {
        Self {
            login: user.login,
            display_name: user.name,
            bio: user.bio,
            location: user.location,
            company: user.company,
            website_url: user.blog,
            avatar_url: user.avatar_url,
            profile_url: user.html_url,
            public_repos: user.public_repos,
            followers: user.followers,
            following: user.following,
        }
    }
}

/// Projection of a repository for `search_repos`.
#[derive(Debug, Serialize)]
struct SearchMatchView {
    name: String,
    description: Option<String>,
    language: Option<String>,
    url: String,
}

#[derive(Debug, Serialize)]
struct LanguageCountView {
    language: String,
    count: u64,
}

#[derive(Debug, Serialize)]
struct TopicCountView {
    topic: String,
    count: u64,
}

/// Output of `get_tech_stack_summary`.
#[derive(Debug, Serialize)]
struct TechStackView {
    total_original_repos: usize,
    languages: Vec<LanguageCountView>,
    topics: Vec<TopicCountView>,
}

/// The six read-only operations over one configured account.
#[derive(Debug, Clone)]
pub struct ShowcaseService {
    client: GithubClient,
    account: String,
}

impl ShowcaseService {
    pub fn new(client: GithubClient, account: impl Into<String>) -> Self {
        Self {
            client,
            account: account.into(),
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn client(&self) -> &GithubClient {
        &self.client
    }

    async fn fetch_repos(&self) -> Result<Vec<Repository>, GithubApiError> {
        let path = format!(
            "/users/{}/repos?per_page={}&sort=updated",
            self.account, REPOS_PER_PAGE
        );
        self.client.fetch_json(&path).await
    }

    /// Lists up to 100 repositories of the account, optionally including
    /// forks, re-sorted by stars or name on request.
    pub async fn list_repositories(
        &self,
        include_forks: bool,
        sort: SortKey,
    ) -> Result<String, GithubApiError> {
        let mut repos = self.fetch_repos().await?;

        if !include_forks {
            repos.retain(|repo| !repo.fork);
        }

        match sort {
            // Upstream already returns most-recently-updated first.
            SortKey::Updated => {}
            SortKey::Stars => repos.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count)),
            SortKey::Name => repos.sort_by(|a, b| compare_names(&a.name, &b.name)),
        }

        let summaries: Vec<RepoSummaryView> =
            repos.into_iter().map(RepoSummaryView::from).collect();
        pretty_json(&summaries)
    }

    /// Fetches one repository of the account together with its README.
    ///
    /// The README sub-fetch is best-effort: any failure degrades to
    /// [`NO_README_PLACEHOLDER`] without failing the call.
    pub async fn repository_details(&self, repo_name: &str) -> Result<String, GithubApiError> {
        let path = format!("/repos/{}/{}", self.account, repo_name);
        let repo: Repository = self.client.fetch_json(&path).await?;

        let readme = match self.client.readme(&self.account, repo_name).await {
            Readme::Content(text) => text,
            Readme::Absent => NO_README_PLACEHOLDER.to_string(),
        };

        let detail = RepoDetailView::from(repo);
        let body = pretty_json(&detail)?;
        Ok(format!(
            "# {}\n\n{}\n\n## README\n\n{}",
            detail.name, body, readme
        ))
    }

    /// Reports the byte count and share of each language in one repository.
    pub async fn languages(&self, repo_name: &str) -> Result<String, GithubApiError> {
        let path = format!("/repos/{}/{}/languages", self.account, repo_name);
        let breakdown: BTreeMap<String, u64> = self.client.fetch_json(&path).await?;

        let total: u64 = breakdown.values().sum();
        let entries: Vec<LanguageEntryView> = breakdown
            .into_iter()
            .map(|(language, bytes)| LanguageEntryView {
                language,
                percentage: format_percentage(bytes, total),
                bytes,
            })
            .collect();

        pretty_json(&entries)
    }

    /// Fetches the account profile.
    pub async fn profile(&self) -> Result<String, GithubApiError> {
        let path = format!("/users/{}", self.account);
        let user: User = self.client.fetch_json(&path).await?;
        pretty_json(&ProfileView::from(user))
    }

    /// Case-insensitive substring search over name, description and topics of
    /// up to 100 repositories, forks included.
    pub async fn search_repositories(&self, query: &str) -> Result<String, GithubApiError> {
        let repos = self.fetch_repos().await?;

        let matches: Vec<SearchMatchView> = repos
            .into_iter()
            .filter(|repo| repo_matches(repo, query))
            .map(|repo| SearchMatchView {
                name: repo.name,
                description: repo.description,
                language: repo.language,
                url: repo.html_url,
            })
            .collect();

        if matches.is_empty() {
            return Ok(format!("No repositories matched \"{}\".", query));
        }
        pretty_json(&matches)
    }

    /// Aggregates languages and topics over the account's original (non-fork)
    /// repositories.
    pub async fn tech_stack_summary(&self) -> Result<String, GithubApiError> {
        let repos = self.fetch_repos().await?;
        let originals: Vec<Repository> = repos.into_iter().filter(|repo| !repo.fork).collect();

        let mut language_counts: Vec<(String, u64)> = Vec::new();
        let mut topic_counts: Vec<(String, u64)> = Vec::new();
        for repo in &originals {
            if let Some(language) = &repo.language {
                bump(&mut language_counts, language);
            }
            for topic in &repo.topics {
                bump(&mut topic_counts, topic);
            }
        }
        sort_counts_descending(&mut language_counts);
        sort_counts_descending(&mut topic_counts);

        let summary = TechStackView {
            total_original_repos: originals.len(),
            languages: language_counts
                .into_iter()
                .map(|(language, count)| LanguageCountView { language, count })
                .collect(),
            topics: topic_counts
                .into_iter()
                .map(|(topic, count)| TopicCountView { topic, count })
                .collect(),
        };
        pretty_json(&summary)
    }

    /// Raw README text for any owner/repo pair, with the same fallback as the
    /// details operation. Backs the `repo-readme` MCP resource, which is not
    /// pinned to the configured account.
    pub async fn readme_text(&self, owner: &str, repo: &str) -> String {
        match self.client.readme(owner, repo).await {
            Readme::Content(text) => text,
            Readme::Absent => NO_README_PLACEHOLDER.to_string(),
        }
    }
}

/// Case-aware name ordering: case-insensitive comparison first, raw bytes as
/// the tiebreak so the order stays deterministic.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// One decimal place with a trailing `%`, or the literal `0%` when the
/// repository reports zero total bytes.
fn format_percentage(bytes: u64, total: u64) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", bytes as f64 * 100.0 / total as f64)
}

fn repo_matches(repo: &Repository, query: &str) -> bool {
    let needle = query.to_lowercase();
    if repo.name.to_lowercase().contains(&needle) {
        return true;
    }
    if let Some(description) = &repo.description {
        if description.to_lowercase().contains(&needle) {
            return true;
        }
    }
    repo.topics
        .iter()
        .any(|topic| topic.to_lowercase().contains(&needle))
}

/// Increments the counter for `key`, appending it in first-seen position on
/// first sight. The repository cap keeps these lists small enough that a
/// linear scan beats a map here.
fn bump(counts: &mut Vec<(String, u64)>, key: &str) {
    match counts.iter_mut().find(|(name, _)| name == key) {
        Some((_, count)) => *count += 1,
        None => counts.push((key.to_string(), 1)),
    }
}

/// Stable descending sort, so tied counts keep their first-seen order.
fn sort_counts_descending(counts: &mut [(String, u64)]) {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
}

fn pretty_json<T: Serialize>(value: &T) -> Result<String, GithubApiError> {
    // Serialization of these projections cannot fail; map anyway instead of
    // unwrapping.
    Ok(serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string()))
}
