use anyhow::Result;
use rmcp::ServiceExt;
use rmcp::transport::stdio;

use crate::showcase::ShowcaseService;
use crate::tools::mcp::ShowcaseServer;

/// Runs the MCP server over stdin/stdout until the client disconnects.
pub async fn run_stdio_server(service: ShowcaseService) -> Result<()> {
    let server = ShowcaseServer::new(service).serve(stdio()).await?;

    server.waiting().await?;
    Ok(())
}
