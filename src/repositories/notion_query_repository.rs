use crate::client::AsyncNotionClient;
use crate::error::NotionApiResult;
use crate::repositories::traits::QueryRepository;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Query repository implementation using the Notion API client.
pub struct NotionQueryRepository {
    client: Arc<dyn AsyncNotionClient>,
}

impl NotionQueryRepository {
    pub fn new(client: Arc<dyn AsyncNotionClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QueryRepository for NotionQueryRepository {
    async fn query(&self, database_id: &str, body: &Value) -> NotionApiResult<Value> {
        self.client.query_database(database_id, body).await
    }

    async fn search(&self, body: &Value) -> NotionApiResult<Value> {
        self.client.search(body).await
    }
}
