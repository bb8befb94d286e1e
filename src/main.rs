//! Notion MCP Server - Main entry point
//!
//! Serves the Notion tools over MCP on stdin/stdout.

use anyhow::Result;
use notion_mcp_server::client::{AsyncNotionClient, AsyncNotionClientImpl};
use notion_mcp_server::repositories::{
    BlockRepository, NotionBlockRepository, NotionPageRepository, NotionQueryRepository,
    PageRepository, QueryRepository,
};
use notion_mcp_server::{Config, NotionClient, NotionMcpServer};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration first so LOG_LEVEL can drive the filter
    let config = Config::from_env();
    let log_level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting Notion MCP Server with API URL: {} (Notion-Version {})",
        config.notion_api_url, config.notion_version
    );

    // Initialize Notion client
    let async_client = Arc::new(AsyncNotionClientImpl::new(NotionClient::new(&config)));
    let client = async_client.clone() as Arc<dyn AsyncNotionClient>;

    // Initialize repositories
    let block_repo =
        Arc::new(NotionBlockRepository::new(client.clone())) as Arc<dyn BlockRepository>;
    let page_repo = Arc::new(NotionPageRepository::new(client.clone())) as Arc<dyn PageRepository>;
    let query_repo = Arc::new(NotionQueryRepository::new(client)) as Arc<dyn QueryRepository>;

    if config.database_id.is_none() {
        info!("NOTION_DATABASE_ID not set; task tools need an explicit database");
    }

    // Create the MCP server (tools are constructed internally)
    let server = NotionMcpServer::new(block_repo, page_repo, query_repo, config.database_id);

    info!("Notion MCP Server initialized");

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    notion_mcp_server::server::run_server(server).await?;

    info!(
        "Notion MCP Server shutdown complete ({})",
        async_client.inner().metrics().summary()
    );
    Ok(())
}
