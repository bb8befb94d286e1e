use crate::client::AsyncNotionClient;
use crate::error::NotionApiResult;
use crate::repositories::traits::BlockRepository;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Block repository implementation using the Notion API client.
pub struct NotionBlockRepository {
    client: Arc<dyn AsyncNotionClient>,
}

impl NotionBlockRepository {
    /// Create a new NotionBlockRepository with the given client.
    pub fn new(client: Arc<dyn AsyncNotionClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BlockRepository for NotionBlockRepository {
    async fn children(
        &self,
        block_id: &str,
        page_size: Option<u32>,
        start_cursor: Option<&str>,
    ) -> NotionApiResult<Value> {
        self.client
            .get_block_children(block_id, page_size, start_cursor)
            .await
    }

    async fn append(&self, block_id: &str, children: &Value) -> NotionApiResult<Value> {
        self.client.append_block_children(block_id, children).await
    }
}
