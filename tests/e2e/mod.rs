//! End-to-end test utilities for tests that talk to the live Notion API.
//!
//! These tests are ignored by default. Run them with
//! `cargo test -- --ignored` after setting `NOTION_API_KEY` and
//! `TEST_PAGE_ID` (and optionally `NOTION_DATABASE_ID`) in `.env`.

use notion_mcp_server::config::DEFAULT_API_URL;
use notion_mcp_server::NotionClient;
use std::env;

/// Test configuration loaded from environment variables.
pub struct TestConfig {
    pub api_key: String,
    pub base_url: String,
}

impl TestConfig {
    /// Load configuration from .env file.
    ///
    /// # Panics
    /// Panics if NOTION_API_KEY is not set in the environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_key: env::var("NOTION_API_KEY")
                .expect("NOTION_API_KEY must be set in .env file for E2E tests"),
            base_url: env::var("NOTION_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        }
    }
}

/// Create a NotionClient configured for testing.
pub fn setup_test_client() -> NotionClient {
    let config = TestConfig::from_env();
    NotionClient::with_base_url(config.base_url, config.api_key)
}

/// Page shared with the integration, used as a read-only fixture.
pub fn test_page_id() -> String {
    env::var("TEST_PAGE_ID").expect("TEST_PAGE_ID must be set in .env file for E2E tests")
}

/// Task database, when one is configured.
#[allow(dead_code)]
pub fn test_database_id() -> Option<String> {
    env::var("NOTION_DATABASE_ID").ok()
}
