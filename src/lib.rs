//! Notion MCP Server - a Model Context Protocol server for the Notion API.
//!
//! This library lets AI assistants read and edit Notion pages, walk nested
//! block content, query databases, search the workspace and work with a
//! task database through MCP tools.
//!
//! # Architecture
//!
//! - **domain**: Validated identifiers
//! - **models**: Block views and property extractors over raw Notion JSON
//! - **error**: Error types and the normalized `{"error": ...}` shape
//! - **config**: Configuration management from environment variables
//! - **client**: Blocking HTTP client for the Notion API and its async wrapper
//! - **repositories**: Async data access traits used by the tools
//! - **tools**: MCP tool implementations
//! - **metrics**: Request counters
//! - **server**: MCP protocol server

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;
pub mod tools;

// Re-export commonly used types
pub use client::NotionClient;
pub use config::Config;
pub use domain::NotionId;
pub use error::{ConfigError, NotionApiError, NotionApiResult};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{Block, BlockChildren, ContentEntry, FormattedBlock};
pub use server::NotionMcpServer;
pub use tools::{
    BlockTreeResponse, CreatePageParams, DatabaseTools, FilterOperator, PageContentTools,
    PageTools, PaginatedContentResponse, PersonRole, QueryDatabaseParams, SearchParams,
    TaskTools,
};
