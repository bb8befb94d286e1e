//! Async wrapper around synchronous NotionClient.
//!
//! This module provides an async interface to the synchronous NotionClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::NotionClient;
use crate::error::{NotionApiError, NotionApiResult};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Async wrapper trait for Notion client operations.
///
/// Every method mirrors a `NotionClient` method and returns the parsed
/// response body verbatim.
#[async_trait]
pub trait AsyncNotionClient: Send + Sync {
    async fn query_database(&self, database_id: &str, body: &Value) -> NotionApiResult<Value>;
    async fn search(&self, body: &Value) -> NotionApiResult<Value>;

    async fn get_page(&self, page_id: &str) -> NotionApiResult<Value>;
    async fn update_page(&self, page_id: &str, properties: &Value) -> NotionApiResult<Value>;
    async fn create_page(&self, body: &Value) -> NotionApiResult<Value>;

    async fn get_block_children(
        &self,
        block_id: &str,
        page_size: Option<u32>,
        start_cursor: Option<&str>,
    ) -> NotionApiResult<Value>;
    async fn append_block_children(&self, block_id: &str, children: &Value)
        -> NotionApiResult<Value>;
}

/// Async wrapper around synchronous NotionClient.
#[derive(Clone)]
pub struct AsyncNotionClientImpl {
    client: Arc<NotionClient>,
}

impl AsyncNotionClientImpl {
    pub fn new(client: NotionClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Shared handle to the underlying client (for metrics).
    pub fn inner(&self) -> &NotionClient {
        &self.client
    }
}

fn join_error(e: tokio::task::JoinError) -> NotionApiError {
    NotionApiError::Transport(format!("Task join error: {}", e))
}

#[async_trait]
impl AsyncNotionClient for AsyncNotionClientImpl {
    async fn query_database(&self, database_id: &str, body: &Value) -> NotionApiResult<Value> {
        let client = self.client.clone();
        let database_id = database_id.to_string();
        let body = body.clone();

        tokio::task::spawn_blocking(move || client.query_database(&database_id, &body))
            .await
            .map_err(join_error)?
    }

    async fn search(&self, body: &Value) -> NotionApiResult<Value> {
        let client = self.client.clone();
        let body = body.clone();

        tokio::task::spawn_blocking(move || client.search(&body))
            .await
            .map_err(join_error)?
    }

    async fn get_page(&self, page_id: &str) -> NotionApiResult<Value> {
        let client = self.client.clone();
        let page_id = page_id.to_string();

        tokio::task::spawn_blocking(move || client.get_page(&page_id))
            .await
            .map_err(join_error)?
    }

    async fn update_page(&self, page_id: &str, properties: &Value) -> NotionApiResult<Value> {
        let client = self.client.clone();
        let page_id = page_id.to_string();
        let properties = properties.clone();

        tokio::task::spawn_blocking(move || client.update_page(&page_id, &properties))
            .await
            .map_err(join_error)?
    }

    async fn create_page(&self, body: &Value) -> NotionApiResult<Value> {
        let client = self.client.clone();
        let body = body.clone();

        tokio::task::spawn_blocking(move || client.create_page(&body))
            .await
            .map_err(join_error)?
    }

    async fn get_block_children(
        &self,
        block_id: &str,
        page_size: Option<u32>,
        start_cursor: Option<&str>,
    ) -> NotionApiResult<Value> {
        let client = self.client.clone();
        let block_id = block_id.to_string();
        let start_cursor = start_cursor.map(str::to_string);

        tokio::task::spawn_blocking(move || {
            client.get_block_children(&block_id, page_size, start_cursor.as_deref())
        })
        .await
        .map_err(join_error)?
    }

    async fn append_block_children(
        &self,
        block_id: &str,
        children: &Value,
    ) -> NotionApiResult<Value> {
        let client = self.client.clone();
        let block_id = block_id.to_string();
        let children = children.clone();

        tokio::task::spawn_blocking(move || client.append_block_children(&block_id, &children))
            .await
            .map_err(join_error)?
    }
}
