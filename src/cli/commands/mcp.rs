//! MCP command implementation.

use crate::config::Settings;
use crate::mcp::McpServer;
use crate::tools::ToolContext;
use anyhow::Result;

/// Run the MCP server on stdio.
pub async fn run_mcp(settings: Settings) -> Result<()> {
    let ctx = ToolContext::from_settings(&settings)?;
    McpServer::new(ctx).run().await
}
