//! Tests for the MCP server wiring.

mod mocks;

use mocks::{MockBlockRepository, MockPageRepository, MockQueryRepository};
use notion_mcp_server::repositories::{BlockRepository, PageRepository, QueryRepository};
use notion_mcp_server::NotionMcpServer;
use rmcp::ServerHandler;
use std::sync::Arc;

fn server() -> NotionMcpServer {
    NotionMcpServer::new(
        Arc::new(MockBlockRepository::new()) as Arc<dyn BlockRepository>,
        Arc::new(MockPageRepository::new()) as Arc<dyn PageRepository>,
        Arc::new(MockQueryRepository::new()) as Arc<dyn QueryRepository>,
        Some("tasks-db".to_string()),
    )
}

#[test]
fn test_server_info() {
    let info = server().get_info();

    assert_eq!(info.server_info.name, "notion-mcp-server");
    assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    assert!(info.capabilities.tools.is_some());
    assert!(info.instructions.is_some());
}

#[test]
fn test_server_is_cloneable() {
    let server = server();
    let clone = server.clone();
    assert_eq!(
        clone.get_info().server_info.name,
        server.get_info().server_info.name
    );
}
