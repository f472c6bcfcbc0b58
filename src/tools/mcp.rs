//! MCP surface of the tool registry
//!
//! [`ShowcaseServer`] adapts the registry to the Model Context Protocol: every
//! registry entry becomes a callable tool, and two read-only resources are
//! exposed on top — the profile singleton and a README template addressing
//! any owner/repo pair (deliberately not pinned to the configured account).

use std::sync::Arc;

use rmcp::model::*;
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{Error as McpError, ServerHandler};
use serde_json::json;

use crate::showcase::ShowcaseService;
use crate::tools::{self, ToolError};

/// URI of the profile singleton resource.
pub const PROFILE_URI: &str = "github://profile";

/// URI template of the README resource.
pub const README_URI_TEMPLATE: &str = "github://{owner}/{repo}/readme";

/// Thin MCP adapter over the shared tool registry.
#[derive(Clone)]
pub struct ShowcaseServer {
    service: ShowcaseService,
}

impl ShowcaseServer {
    pub fn new(service: ShowcaseService) -> Self {
        Self { service }
    }
}

impl ServerHandler for ShowcaseServer {
    fn get_info(&self) -> ServerInfo {
        let auth_status = if self.service.client().is_authenticated() {
            "Authenticated with GitHub token"
        } else {
            "Not authenticated (rate limits apply)"
        };

        let instructions = format!(
            "# GitHub Account Showcase MCP Server

Read-only view of the `{account}` GitHub account.

## Authentication Status
{auth_status}

## Available Tools
- `list_repos`: List the account's repositories, with fork filtering and sorting
- `get_repo_details`: One repository with its metadata and README
- `get_languages`: Language breakdown of one repository
- `get_profile`: The account's public profile
- `search_repos`: Substring search over repository names, descriptions and topics
- `get_tech_stack_summary`: Language and topic counts across original repositories

## Resources
- `{profile_uri}`: the profile as JSON
- `{readme_template}`: README of any owner/repo pair as markdown

Set `GITFOLIO_GITHUB_TOKEN` (or `GITHUB_TOKEN`) to raise the GitHub API rate
limit from 60 to 5,000 requests/hour.
",
            account = self.service.account(),
            auth_status = auth_status,
            profile_uri = PROFILE_URI,
            readme_template = README_URI_TEMPLATE,
        );

        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(instructions),
        }
    }

    async fn list_tools(
        &self,
        _request: PaginatedRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = tools::tools()
            .iter()
            .map(|def| Tool::new(def.name, def.description, Arc::new(def.input_schema())))
            .collect();

        Ok(ListToolsResult {
            next_cursor: None,
            tools,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let Some(def) = tools::find_tool(&request.name) else {
            return Err(McpError::invalid_params(
                format!(
                    "unknown tool '{}', available tools: {}",
                    request.name,
                    tools::tool_names().join(", ")
                ),
                None,
            ));
        };

        let args = serde_json::Value::Object(request.arguments.unwrap_or_default());
        match def.invoke(&self.service, args).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            // Schema violations are protocol-level rejections; the handler
            // never ran.
            Err(ToolError::InvalidArguments(message)) => {
                Err(McpError::invalid_params(message, None))
            }
            // Upstream failures surface as a failed tool result.
            Err(err @ ToolError::Github(_)) => {
                Ok(CallToolResult::error(vec![Content::text(err.to_string())]))
            }
        }
    }

    async fn list_resources(
        &self,
        _request: PaginatedRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let mut profile = RawResource::new(PROFILE_URI, "profile");
        profile.description = Some(format!(
            "Public profile of the {} account",
            self.service.account()
        ));
        profile.mime_type = Some("application/json".to_string());

        Ok(ListResourcesResult {
            next_cursor: None,
            resources: vec![profile.no_annotation()],
        })
    }

    async fn list_resource_templates(
        &self,
        _request: PaginatedRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        let readme = RawResourceTemplate {
            uri_template: README_URI_TEMPLATE.to_string(),
            name: "repo-readme".to_string(),
            description: Some("README of any GitHub repository, as raw markdown".to_string()),
            mime_type: Some("text/markdown".to_string()),
        };

        Ok(ListResourceTemplatesResult {
            next_cursor: None,
            resource_templates: vec![readme.no_annotation()],
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        if uri == PROFILE_URI {
            let profile = self
                .service
                .profile()
                .await
                .map_err(|err| McpError::internal_error(err.to_string(), None))?;
            return Ok(ReadResourceResult {
                contents: vec![ResourceContents::TextResourceContents {
                    uri,
                    mime_type: Some("application/json".to_string()),
                    text: profile,
                }],
            });
        }

        if let Some((owner, repo)) = parse_readme_uri(&uri) {
            let text = self.service.readme_text(owner, repo).await;
            return Ok(ReadResourceResult {
                contents: vec![ResourceContents::TextResourceContents {
                    uri,
                    mime_type: Some("text/markdown".to_string()),
                    text,
                }],
            });
        }

        Err(McpError::resource_not_found(
            "resource not found",
            Some(json!({ "uri": uri })),
        ))
    }
}

/// Matches `github://{owner}/{repo}/readme` and extracts the pair.
fn parse_readme_uri(uri: &str) -> Option<(&str, &str)> {
    let rest = uri.strip_prefix("github://")?.strip_suffix("/readme")?;
    let (owner, repo) = rest.split_once('/')?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return None;
    }
    Some((owner, repo))
}
