//! Page tools: read, update, create and append.

use crate::domain::NotionId;
use crate::error::NotionApiResult;
use crate::repositories::{BlockRepository, PageRepository};
use serde_json::{json, Value};
use std::sync::Arc;

/// Parameters for creating a page.
#[derive(Debug, Clone)]
pub struct CreatePageParams {
    /// Database or page the new page lives under
    pub parent_id: String,

    /// Property values keyed by property name
    pub properties: Value,

    /// Initial block content
    pub content: Option<Vec<Value>>,

    /// Whether `parent_id` names a database (true) or a page (false)
    pub is_database: bool,
}

/// Tools for reading and writing pages.
pub struct PageTools {
    page_repo: Arc<dyn PageRepository>,
    block_repo: Arc<dyn BlockRepository>,
}

impl PageTools {
    pub fn new(page_repo: Arc<dyn PageRepository>, block_repo: Arc<dyn BlockRepository>) -> Self {
        Self {
            page_repo,
            block_repo,
        }
    }

    /// Retrieve a page with its properties.
    pub async fn get_page(&self, page_id: &str) -> NotionApiResult<Value> {
        self.page_repo.get(page_id).await
    }

    /// Replace the given property values on a page.
    pub async fn update_page_properties(
        &self,
        page_id: &str,
        properties: &Value,
    ) -> NotionApiResult<Value> {
        tracing::info!("Updating properties of page {}", page_id);
        self.page_repo.update(page_id, properties).await
    }

    /// Create a page under a database or another page.
    pub async fn create_page(&self, params: CreatePageParams) -> NotionApiResult<Value> {
        let body = create_page_body(&params)?;

        tracing::info!("Creating page under {}", params.parent_id);
        self.page_repo.create(&body).await
    }

    /// Append blocks to the end of a page.
    pub async fn append_page_content(
        &self,
        page_id: &str,
        blocks: Vec<Value>,
    ) -> NotionApiResult<Value> {
        tracing::info!("Appending {} blocks to page {}", blocks.len(), page_id);
        self.block_repo.append(page_id, &Value::Array(blocks)).await
    }
}

/// Request body for `POST /pages`.
pub fn create_page_body(params: &CreatePageParams) -> NotionApiResult<Value> {
    let parent_id = NotionId::new(&params.parent_id)?;
    let parent = if params.is_database {
        json!({ "database_id": parent_id })
    } else {
        json!({ "page_id": parent_id })
    };

    let mut body = json!({
        "parent": parent,
        "properties": params.properties,
    });

    if let Some(content) = params.content.as_ref().filter(|c| !c.is_empty()) {
        body["children"] = Value::from(content.clone());
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(is_database: bool, content: Option<Vec<Value>>) -> CreatePageParams {
        CreatePageParams {
            parent_id: "db-1234".to_string(),
            properties: json!({"Title": {"title": [{"text": {"content": "New"}}]}}),
            content,
            is_database,
        }
    }

    #[test]
    fn test_create_page_body_database_parent() {
        let body = create_page_body(&params(true, None)).unwrap();
        assert_eq!(body["parent"], json!({"database_id": "db1234"}));
        assert!(body.get("children").is_none());
        assert_eq!(body["properties"]["Title"]["title"][0]["text"]["content"], "New");
    }

    #[test]
    fn test_create_page_body_page_parent_with_children() {
        let blocks = vec![json!({"object": "block", "type": "divider", "divider": {}})];
        let body = create_page_body(&params(false, Some(blocks))).unwrap();
        assert_eq!(body["parent"], json!({"page_id": "db1234"}));
        assert_eq!(body["children"][0]["type"], "divider");
    }

    #[test]
    fn test_create_page_body_empty_content_omitted() {
        let body = create_page_body(&params(true, Some(vec![]))).unwrap();
        assert!(body.get("children").is_none());
    }

    #[test]
    fn test_create_page_body_rejects_empty_parent() {
        let mut p = params(true, None);
        p.parent_id = "-".to_string();
        assert!(create_page_body(&p).is_err());
    }
}
