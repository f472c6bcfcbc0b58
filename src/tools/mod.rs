//! Tool registry shared by both transports
//!
//! Each operation is described once in [`TOOLS`] — name, description, input
//! schema and runner — and both the MCP server and the HTTP proxy dispatch
//! through it. Adding an operation means adding one entry here.
//!
//! Arguments arrive as untyped JSON and are validated against the declared
//! parameter struct before the handler runs: defaults are filled in, missing
//! required fields and wrong-typed values are rejected with field-level
//! detail, and the non-empty-string constraints are enforced.

pub mod mcp;

use std::future::Future;
use std::pin::Pin;

use schemars::JsonSchema;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::github::GithubApiError;
use crate::showcase::ShowcaseService;

pub use crate::showcase::SortKey;

/// Failure of a tool invocation, before or during the handler.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The arguments did not match the tool's declared schema.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// The upstream fetch failed; propagated untouched to the transport.
    #[error(transparent)]
    Github(#[from] GithubApiError),
}

/// Arguments of `list_repos`.
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ListReposParams {
    /// Include forked repositories in the listing (default false).
    pub include_forks: bool,
    /// Sort order: `updated` (upstream order), `stars` or `name`.
    pub sort_key: SortKey,
}

/// Arguments of `get_repo_details`.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepoDetailsParams {
    /// Name of a repository belonging to the configured account.
    pub repo_name: String,
}

/// Arguments of `get_languages`.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguagesParams {
    /// Name of a repository belonging to the configured account.
    pub repo_name: String,
}

/// Arguments of `get_profile` (none).
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ProfileParams {}

/// Arguments of `search_repos`.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchReposParams {
    /// Substring matched case-insensitively against repository names,
    /// descriptions and topics.
    pub query: String,
}

/// Arguments of `get_tech_stack_summary` (none).
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TechStackParams {}

pub type ToolResult = Result<String, ToolError>;
type ToolFuture<'a> = Pin<Box<dyn Future<Output = ToolResult> + Send + 'a>>;
type ToolRunner = for<'a> fn(&'a ShowcaseService, Value) -> ToolFuture<'a>;

/// One registry entry: a named operation with its schema and runner.
pub struct ToolDef {
    pub name: &'static str,
    pub description: &'static str,
    schema: fn() -> Map<String, Value>,
    runner: ToolRunner,
}

impl ToolDef {
    /// JSON Schema describing this tool's arguments.
    pub fn input_schema(&self) -> Map<String, Value> {
        (self.schema)()
    }

    /// Validates `args` against the schema and runs the handler.
    pub fn invoke<'a>(&self, service: &'a ShowcaseService, args: Value) -> ToolFuture<'a> {
        (self.runner)(service, args)
    }
}

/// The six operations, in the order transports list them.
static TOOLS: [ToolDef; 6] = [
    ToolDef {
        name: "list_repos",
        description: "List the account's repositories (up to 100, most recently updated first). \
            Forks are excluded unless `includeForks` is true; `sortKey` re-sorts by `stars` \
            (descending) or `name` (ascending). \
            Example: `{\"name\": \"list_repos\", \"arguments\": {\"sortKey\": \"stars\"}}`",
        schema: schema_object::<ListReposParams>,
        runner: run_list_repos,
    },
    ToolDef {
        name: "get_repo_details",
        description: "Fetch one repository of the account with its full metadata and README. \
            A repository without a README still succeeds and reports `(No README found)`. \
            Example: `{\"name\": \"get_repo_details\", \"arguments\": {\"repoName\": \"gitfolio\"}}`",
        schema: schema_object::<RepoDetailsParams>,
        runner: run_repo_details,
    },
    ToolDef {
        name: "get_languages",
        description: "Language breakdown of one repository: bytes per language and the share \
            of the repository total, one decimal place. \
            Example: `{\"name\": \"get_languages\", \"arguments\": {\"repoName\": \"gitfolio\"}}`",
        schema: schema_object::<LanguagesParams>,
        runner: run_languages,
    },
    ToolDef {
        name: "get_profile",
        description: "The account's public profile: login, display name, bio, location, \
            company, links and follower counts. Takes no arguments.",
        schema: schema_object::<ProfileParams>,
        runner: run_profile,
    },
    ToolDef {
        name: "search_repos",
        description: "Case-insensitive substring search over the account's repositories \
            (forks included), matching name, description and topics. \
            Example: `{\"name\": \"search_repos\", \"arguments\": {\"query\": \"parser\"}}`",
        schema: schema_object::<SearchReposParams>,
        runner: run_search_repos,
    },
    ToolDef {
        name: "get_tech_stack_summary",
        description: "Aggregate view of the account's original (non-fork) repositories: \
            how many repositories use each language and each topic, sorted by count. \
            Takes no arguments.",
        schema: schema_object::<TechStackParams>,
        runner: run_tech_stack,
    },
];

/// All registered tools in listing order.
pub fn tools() -> &'static [ToolDef] {
    &TOOLS
}

/// Registry lookup by name. Unknown names yield `None`, never a panic, so the
/// HTTP proxy can answer 404 with the valid names.
pub fn find_tool(name: &str) -> Option<&'static ToolDef> {
    TOOLS.iter().find(|tool| tool.name == name)
}

/// The registered tool names, for 404 bodies and the `/tools` endpoint.
pub fn tool_names() -> Vec<&'static str> {
    TOOLS.iter().map(|tool| tool.name).collect()
}

fn schema_object<T: JsonSchema>() -> Map<String, Value> {
    let schema = schemars::schema_for!(T);
    match serde_json::to_value(schema) {
        Ok(Value::Object(map)) => map,
        // schemars always produces an object for a root schema.
        _ => Map::new(),
    }
}

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    let args = match args {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    serde_json::from_value(args).map_err(|err| ToolError::InvalidArguments(err.to_string()))
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::InvalidArguments(format!(
            "`{}` must be a non-empty string",
            field
        )));
    }
    Ok(())
}

fn run_list_repos<'a>(service: &'a ShowcaseService, args: Value) -> ToolFuture<'a> {
    Box::pin(async move {
        let params: ListReposParams = parse_args(args)?;
        Ok(service
            .list_repositories(params.include_forks, params.sort_key)
            .await?)
    })
}

fn run_repo_details<'a>(service: &'a ShowcaseService, args: Value) -> ToolFuture<'a> {
    Box::pin(async move {
        let params: RepoDetailsParams = parse_args(args)?;
        require_non_empty("repoName", &params.repo_name)?;
        Ok(service.repository_details(&params.repo_name).await?)
    })
}

fn run_languages<'a>(service: &'a ShowcaseService, args: Value) -> ToolFuture<'a> {
    Box::pin(async move {
        let params: LanguagesParams = parse_args(args)?;
        require_non_empty("repoName", &params.repo_name)?;
        Ok(service.languages(&params.repo_name).await?)
    })
}

fn run_profile<'a>(service: &'a ShowcaseService, args: Value) -> ToolFuture<'a> {
    Box::pin(async move {
        let _params: ProfileParams = parse_args(args)?;
        Ok(service.profile().await?)
    })
}

fn run_search_repos<'a>(service: &'a ShowcaseService, args: Value) -> ToolFuture<'a> {
    Box::pin(async move {
        let params: SearchReposParams = parse_args(args)?;
        require_non_empty("query", &params.query)?;
        Ok(service.search_repositories(&params.query).await?)
    })
}

fn run_tech_stack<'a>(service: &'a ShowcaseService, args: Value) -> ToolFuture<'a> {
    Box::pin(async move {
        let _params: TechStackParams = parse_args(args)?;
        Ok(service.tech_stack_summary().await?)
    })
}
