//! Configuration management for the Notion MCP Server.
//!
//! This module handles loading and validating configuration from environment variables.
//! It avoids polluting stdout (which MCP uses for communication) by loading the
//! .env file through `dotenvy`, which never prints.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Default base URL of the Notion REST API.
pub const DEFAULT_API_URL: &str = "https://api.notion.com/v1";

/// Notion-Version header sent with every request unless overridden.
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Configuration for the Notion MCP Server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Notion API base URL
    pub notion_api_url: String,

    /// Integration token sent as a bearer credential
    pub notion_api_key: String,

    /// Value of the Notion-Version header
    pub notion_version: String,

    /// Database used by the task tools when no id is passed explicitly
    pub database_id: Option<String>,

    /// HTTP request timeout in seconds (default: 30)
    pub request_timeout: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `NOTION_API_KEY`: integration token (`NOTIO_API_KEY` is accepted as a legacy alias)
    ///
    /// Optional environment variables:
    /// - `NOTION_API_BASE_URL`: API base URL (default: https://api.notion.com/v1)
    /// - `NOTION_VERSION`: Notion-Version header (default: 2022-06-28)
    /// - `NOTION_DATABASE_ID`: default task database
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 30)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        // A blank primary key still falls through to the legacy alias
        let notion_api_key = match env::var("NOTION_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            primary => match env::var("NOTIO_API_KEY") {
                Ok(key) if !key.trim().is_empty() => key,
                _ if primary.is_ok() => {
                    return Err(ConfigError::InvalidValue {
                        var: "NOTION_API_KEY".to_string(),
                        reason: "Cannot be empty".to_string(),
                    })
                }
                _ => return Err(ConfigError::MissingVar("NOTION_API_KEY".to_string())),
            },
        };

        let notion_api_url =
            env::var("NOTION_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        if !notion_api_url.starts_with("http://") && !notion_api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "NOTION_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let notion_version =
            env::var("NOTION_VERSION").unwrap_or_else(|_| DEFAULT_NOTION_VERSION.to_string());

        let database_id = env::var("NOTION_DATABASE_ID")
            .ok()
            .filter(|id| !id.trim().is_empty());

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 30)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            notion_api_url,
            notion_api_key,
            notion_version,
            database_id,
            request_timeout,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            notion_api_url: DEFAULT_API_URL.to_string(),
            notion_api_key: String::new(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            database_id: None,
            request_timeout: 30,
            log_level: "error".to_string(),
        }
    }
}
