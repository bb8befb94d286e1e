//! Error types for the Notion MCP Server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Every API failure is rendered to callers through the same `{"error": "..."}` shape.

use crate::domain::ValidationError;
use serde_json::{json, Value};
use thiserror::Error;

/// Errors that can occur when interacting with the Notion API.
#[derive(Error, Debug)]
pub enum NotionApiError {
    /// The API answered with a status other than 200
    #[error("Erro {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The request never produced a status (DNS, connection, timeout)
    #[error("Erro de conexão: {0}")]
    Transport(String),

    /// A 200 response (or caller-supplied payload) with an unexpected shape
    #[error("{0}")]
    InvalidResponse(String),

    /// Rejected locally before any request was made
    #[error("Requisição inválida: {0}")]
    InvalidRequest(String),
}

impl NotionApiError {
    /// Render the error in the shape tool callers expect.
    pub fn to_value(&self) -> Value {
        json!({ "error": self.to_string() })
    }

    /// HTTP status, when the failure came from the API itself.
    pub fn status(&self) -> Option<u16> {
        match self {
            NotionApiError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ValidationError> for NotionApiError {
    fn from(err: ValidationError) -> Self {
        NotionApiError::InvalidRequest(err.to_string())
    }
}

impl From<serde_json::Error> for NotionApiError {
    fn from(err: serde_json::Error) -> Self {
        NotionApiError::InvalidResponse(format!("Resposta inválida: {}", err))
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with NotionApiError
pub type NotionApiResult<T> = Result<T, NotionApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
