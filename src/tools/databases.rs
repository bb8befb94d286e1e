//! Database query and workspace search tools.

use crate::domain::NotionId;
use crate::error::{NotionApiError, NotionApiResult};
use crate::repositories::QueryRepository;
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Default page size for queries and searches.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Parameters for a database query.
#[derive(Debug, Clone, Default)]
pub struct QueryDatabaseParams {
    /// Notion filter object
    pub filter: Option<Value>,

    /// Sort descriptors
    pub sorts: Option<Vec<Value>>,

    /// Cursor returned by a previous query
    pub start_cursor: Option<String>,

    /// Maximum results; 0 leaves the API default in place
    pub page_size: u32,

    /// Database to query; falls back to the configured default
    pub database_id: Option<String>,
}

/// Parameters for a workspace search.
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub query: String,

    /// Object type to restrict to (`page` or `database`)
    pub filter_type: Option<String>,

    /// Sort descriptor, e.g. `{"direction": "descending", "timestamp": "last_edited_time"}`
    pub sort: Option<Value>,

    pub page_size: u32,
}

/// Tools for querying databases and searching the workspace.
pub struct DatabaseTools {
    query_repo: Arc<dyn QueryRepository>,
    default_database_id: Option<String>,
}

impl DatabaseTools {
    /// Create new database tools.
    ///
    /// # Arguments
    /// * `query_repo` - QueryRepository for query and search access
    /// * `default_database_id` - database used when a call names none
    pub fn new(query_repo: Arc<dyn QueryRepository>, default_database_id: Option<String>) -> Self {
        Self {
            query_repo,
            default_database_id,
        }
    }

    /// Query a database.
    pub async fn query_database(&self, params: QueryDatabaseParams) -> NotionApiResult<Value> {
        let database_id = self.resolve_database_id(params.database_id.as_deref())?;
        let body = query_body(&params);

        tracing::info!("Querying database {}", database_id);
        self.query_repo.query(database_id.as_str(), &body).await
    }

    /// Search pages and databases by title.
    pub async fn search(&self, params: SearchParams) -> NotionApiResult<Value> {
        let body = search_body(&params);

        tracing::info!("Searching workspace for {:?}", params.query);
        self.query_repo.search(&body).await
    }

    fn resolve_database_id(&self, requested: Option<&str>) -> NotionApiResult<NotionId> {
        let id = requested
            .filter(|id| !id.trim().is_empty())
            .or(self.default_database_id.as_deref())
            .ok_or_else(|| {
                NotionApiError::InvalidRequest(
                    "no database id given and NOTION_DATABASE_ID is not set".to_string(),
                )
            })?;
        Ok(NotionId::new(id)?)
    }
}

/// Request body for `POST /databases/{id}/query`; empty parts are omitted.
pub fn query_body(params: &QueryDatabaseParams) -> Value {
    let mut body = Map::new();

    if let Some(filter) = params.filter.as_ref().filter(|f| is_present(f)) {
        body.insert("filter".to_string(), filter.clone());
    }
    if let Some(sorts) = params.sorts.as_ref().filter(|s| !s.is_empty()) {
        body.insert("sorts".to_string(), Value::from(sorts.clone()));
    }
    if let Some(cursor) = params.start_cursor.as_ref().filter(|c| !c.is_empty()) {
        body.insert("start_cursor".to_string(), Value::from(cursor.clone()));
    }
    if params.page_size > 0 {
        body.insert("page_size".to_string(), Value::from(params.page_size));
    }

    Value::Object(body)
}

/// Request body for `POST /search`.
pub fn search_body(params: &SearchParams) -> Value {
    let mut body = json!({
        "query": params.query,
        "page_size": params.page_size,
    });

    if let Some(filter_type) = params.filter_type.as_ref().filter(|t| !t.is_empty()) {
        body["filter"] = json!({ "value": filter_type, "property": "object" });
    }
    if let Some(sort) = params.sort.as_ref().filter(|s| is_present(s)) {
        body["sort"] = sort.clone();
    }

    body
}

// Null, empty objects and empty arrays count as "not given".
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}
