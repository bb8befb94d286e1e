//! HTTP client for interacting with the Notion API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client attaches the bearer credential and
//! the Notion-Version header, strips hyphens from identifiers, and maps every
//! non-200 answer to [`NotionApiError::Upstream`].

mod async_wrapper;
pub use async_wrapper::{AsyncNotionClient, AsyncNotionClientImpl};

use crate::config::Config;
use crate::domain::NotionId;
use crate::error::{NotionApiError, NotionApiResult};
use crate::metrics::Metrics;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// HTTP client for the Notion API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct NotionClient {
    /// Base URL for the Notion API
    base_url: String,

    /// Integration token
    api_key: String,

    /// Notion-Version header value
    notion_version: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl NotionClient {
    /// Create a new NotionClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.notion_api_url.clone(),
            api_key: config.notion_api_key.clone(),
            notion_version: config.notion_version.clone(),
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Create a NotionClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        let config = Config {
            notion_api_url: base_url,
            notion_api_key: api_key,
            request_timeout: 10,
            ..Config::default()
        };
        Self::new(&config)
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute a request with authentication and an optional JSON body.
    fn send(
        &self,
        method: &str,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> NotionApiResult<Value> {
        let start = Instant::now();
        let url = self.build_url(path);

        tracing::debug!("{} {}", method, url);
        if let Some(body) = body {
            tracing::debug!(
                "Request body: {}",
                serde_json::to_string(body).unwrap_or_else(|_| "<invalid json>".to_string())
            );
        }

        let mut request = self
            .agent
            .request(method, &url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Notion-Version", &self.notion_version)
            .set("Content-Type", "application/json");

        for (key, value) in query {
            request = request.query(key, value);
        }

        let response = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };

        let result = response
            .map_err(Self::map_error)
            .and_then(Self::read_body);

        let duration = start.elapsed();
        self.metrics.record_http_request(duration);
        match &result {
            Ok(_) => tracing::debug!("{} {} - Success ({:?})", method, url, duration),
            Err(e) => {
                tracing::error!("{} {} - Error: {}", method, url, e);
                self.metrics.record_http_error();
            }
        }

        result
    }

    /// Parse a response body, treating anything but 200 as a failure.
    fn read_body(response: ureq::Response) -> NotionApiResult<Value> {
        let status = response.status();
        let text = response
            .into_string()
            .map_err(|e| NotionApiError::Transport(e.to_string()))?;

        if status != 200 {
            return Err(NotionApiError::Upstream {
                status,
                message: text,
            });
        }

        serde_json::from_str(&text).map_err(NotionApiError::from)
    }

    /// Map a ureq error to a NotionApiError.
    fn map_error(error: ureq::Error) -> NotionApiError {
        match error {
            ureq::Error::Status(status, response) => NotionApiError::Upstream {
                status,
                message: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => NotionApiError::Transport(transport.to_string()),
        }
    }

    /// Path segment for an identifier, hyphens stripped.
    fn segment(id: &str) -> NotionApiResult<String> {
        let id = NotionId::new(id)?;
        Ok(urlencoding::encode(id.as_str()).into_owned())
    }

    fn count_results(response: &Value) -> usize {
        response["results"].as_array().map_or(0, Vec::len)
    }

    // ========================= Database Operations =========================

    /// Query a database with a prepared body (`filter`, `sorts`, `start_cursor`, `page_size`).
    pub fn query_database(&self, database_id: &str, body: &Value) -> NotionApiResult<Value> {
        let path = format!("/databases/{}/query", Self::segment(database_id)?);
        let response = self.send("POST", &path, &[], Some(body))?;
        self.metrics.record_pages_fetched(Self::count_results(&response));
        Ok(response)
    }

    /// Search pages and databases shared with the integration.
    pub fn search(&self, body: &Value) -> NotionApiResult<Value> {
        let response = self.send("POST", "/search", &[], Some(body))?;
        self.metrics.record_pages_fetched(Self::count_results(&response));
        Ok(response)
    }

    // ========================= Page Operations =========================

    /// Retrieve a page by ID.
    pub fn get_page(&self, page_id: &str) -> NotionApiResult<Value> {
        let path = format!("/pages/{}", Self::segment(page_id)?);
        self.send("GET", &path, &[], None)
    }

    /// Update page properties.
    pub fn update_page(&self, page_id: &str, properties: &Value) -> NotionApiResult<Value> {
        let path = format!("/pages/{}", Self::segment(page_id)?);
        let body = json!({ "properties": properties });
        self.send("PATCH", &path, &[], Some(&body))
    }

    /// Create a page from a prepared body (`parent`, `properties`, `children`).
    pub fn create_page(&self, body: &Value) -> NotionApiResult<Value> {
        self.send("POST", "/pages", &[], Some(body))
    }

    // ========================= Block Operations =========================

    /// Retrieve one page of a block's children.
    pub fn get_block_children(
        &self,
        block_id: &str,
        page_size: Option<u32>,
        start_cursor: Option<&str>,
    ) -> NotionApiResult<Value> {
        let path = format!("/blocks/{}/children", Self::segment(block_id)?);

        let mut query = Vec::new();
        if let Some(page_size) = page_size {
            query.push(("page_size", page_size.to_string()));
        }
        if let Some(cursor) = start_cursor {
            query.push(("start_cursor", cursor.to_string()));
        }

        let response = self.send("GET", &path, &query, None)?;
        self.metrics.record_blocks_fetched(Self::count_results(&response));
        Ok(response)
    }

    /// Append blocks to a page or block.
    pub fn append_block_children(&self, block_id: &str, children: &Value) -> NotionApiResult<Value> {
        let path = format!("/blocks/{}/children", Self::segment(block_id)?);
        let body = json!({ "children": children });
        self.send("PATCH", &path, &[], Some(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let client = NotionClient::with_base_url(
            "https://api.example.com/v1".to_string(),
            "test-key".to_string(),
        );

        assert_eq!(
            client.build_url("/pages/abc"),
            "https://api.example.com/v1/pages/abc"
        );
        assert_eq!(client.build_url("search"), "https://api.example.com/v1/search");

        let client_with_slash = NotionClient::with_base_url(
            "https://api.example.com/v1/".to_string(),
            "test-key".to_string(),
        );
        assert_eq!(
            client_with_slash.build_url("/search"),
            "https://api.example.com/v1/search"
        );
    }

    #[test]
    fn test_client_creation() {
        let config = Config {
            notion_api_key: "secret_123".to_string(),
            notion_version: "2025-09-03".to_string(),
            ..Config::default()
        };

        let client = NotionClient::new(&config);
        assert_eq!(client.base_url, "https://api.notion.com/v1");
        assert_eq!(client.api_key, "secret_123");
        assert_eq!(client.notion_version, "2025-09-03");
    }

    #[test]
    fn test_segment_strips_hyphens() {
        assert_eq!(NotionClient::segment("ab-cd-12").unwrap(), "abcd12");
        assert!(matches!(
            NotionClient::segment("-"),
            Err(NotionApiError::InvalidRequest(_))
        ));
    }
}
