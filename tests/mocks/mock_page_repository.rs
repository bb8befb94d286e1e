use async_trait::async_trait;
use notion_mcp_server::error::{NotionApiError, NotionApiResult};
use notion_mcp_server::repositories::PageRepository;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock page repository for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockPageRepository {
    pages: Arc<Mutex<HashMap<String, Value>>>,
    created: Arc<Mutex<Vec<Value>>>,
    updated: Arc<Mutex<Vec<(String, Value)>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockPageRepository {
    pub fn new() -> Self {
        Self {
            pages: Arc::new(Mutex::new(HashMap::new())),
            created: Arc::new(Mutex::new(Vec::new())),
            updated: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn add_page(&self, page: Value) {
        let id = page["id"].as_str().unwrap_or_default().to_string();
        self.pages.lock().unwrap().insert(id, page);
    }

    pub fn created(&self) -> Vec<Value> {
        self.created.lock().unwrap().clone()
    }

    pub fn updated(&self) -> Vec<(String, Value)> {
        self.updated.lock().unwrap().clone()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn not_found() -> NotionApiError {
        NotionApiError::Upstream {
            status: 404,
            message: "Not found".to_string(),
        }
    }
}

impl Default for MockPageRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageRepository for MockPageRepository {
    async fn get(&self, page_id: &str) -> NotionApiResult<Value> {
        self.track_call("get");

        let pages = self.pages.lock().unwrap();
        pages.get(page_id).cloned().ok_or_else(Self::not_found)
    }

    async fn update(&self, page_id: &str, properties: &Value) -> NotionApiResult<Value> {
        self.track_call("update");

        if !self.pages.lock().unwrap().contains_key(page_id) {
            return Err(Self::not_found());
        }

        self.updated
            .lock()
            .unwrap()
            .push((page_id.to_string(), properties.clone()));
        Ok(json!({"object": "page", "id": page_id, "properties": properties}))
    }

    async fn create(&self, body: &Value) -> NotionApiResult<Value> {
        self.track_call("create");

        self.created.lock().unwrap().push(body.clone());
        Ok(json!({"object": "page", "id": "new-page", "properties": body["properties"]}))
    }
}
