//! MCP server implementation for Notion.
//!
//! This module provides the MCP protocol server that exposes Notion pages,
//! blocks, databases and search to AI assistants through the Model Context Protocol.

pub mod handlers;

pub use handlers::NotionMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the Notion MCP server with stdio transport.
///
/// Communicates via stdin/stdout and returns once the client disconnects.
///
/// # Arguments
/// * `server` - The configured NotionMcpServer instance
pub async fn run_server(server: NotionMcpServer) -> Result<()> {
    // Serve the server with stdio transport
    let service = server.serve(stdio()).await?;

    // Wait for completion
    service.waiting().await?;

    Ok(())
}
