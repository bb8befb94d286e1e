use crate::client::AsyncNotionClient;
use crate::error::NotionApiResult;
use crate::repositories::traits::PageRepository;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Page repository implementation using the Notion API client.
///
/// Delegates every operation to the AsyncNotionClient.
pub struct NotionPageRepository {
    client: Arc<dyn AsyncNotionClient>,
}

impl NotionPageRepository {
    /// Create a new NotionPageRepository with the given client.
    pub fn new(client: Arc<dyn AsyncNotionClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageRepository for NotionPageRepository {
    async fn get(&self, page_id: &str) -> NotionApiResult<Value> {
        self.client.get_page(page_id).await
    }

    async fn update(&self, page_id: &str, properties: &Value) -> NotionApiResult<Value> {
        self.client.update_page(page_id, properties).await
    }

    async fn create(&self, body: &Value) -> NotionApiResult<Value> {
        self.client.create_page(body).await
    }
}
