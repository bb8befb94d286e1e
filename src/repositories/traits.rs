use crate::error::NotionApiResult;
use async_trait::async_trait;
use serde_json::Value;

/// Repository for block content.
///
/// Provides abstraction over block retrieval, enabling different
/// implementations (API client, in-memory mock).
#[async_trait]
pub trait BlockRepository: Send + Sync {
    /// Retrieve one page of a block's children.
    async fn children(
        &self,
        block_id: &str,
        page_size: Option<u32>,
        start_cursor: Option<&str>,
    ) -> NotionApiResult<Value>;

    /// Append blocks to a page or block.
    async fn append(&self, block_id: &str, children: &Value) -> NotionApiResult<Value>;
}

/// Repository for pages.
#[async_trait]
pub trait PageRepository: Send + Sync {
    /// Retrieve a page by ID.
    async fn get(&self, page_id: &str) -> NotionApiResult<Value>;

    /// Update the properties of a page.
    async fn update(&self, page_id: &str, properties: &Value) -> NotionApiResult<Value>;

    /// Create a page from a prepared request body.
    async fn create(&self, body: &Value) -> NotionApiResult<Value>;
}

/// Repository for database queries and workspace search.
#[async_trait]
pub trait QueryRepository: Send + Sync {
    /// Query a database with a prepared request body.
    async fn query(&self, database_id: &str, body: &Value) -> NotionApiResult<Value>;

    /// Search the workspace with a prepared request body.
    async fn search(&self, body: &Value) -> NotionApiResult<Value>;
}
