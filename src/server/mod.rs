//! MCP server exposing the CRM tools.
//!
//! This module serves the framework tools to MCP clients over stdio.

pub mod handlers;

pub use handlers::CrmMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the MCP server with stdio transport until the client disconnects.
pub async fn run_server(server: CrmMcpServer) -> Result<()> {
    // Serve the server with stdio transport
    let service = server.serve(stdio()).await?;

    // Wait for completion
    service.waiting().await?;

    Ok(())
}
