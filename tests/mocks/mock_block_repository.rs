use async_trait::async_trait;
use notion_mcp_server::error::{NotionApiError, NotionApiResult};
use notion_mcp_server::repositories::BlockRepository;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One recorded `children` call.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct ChildrenCall {
    pub block_id: String,
    pub page_size: Option<u32>,
    pub start_cursor: Option<String>,
}

type PageKey = (String, Option<String>);

/// Mock block repository for testing.
///
/// Children pages are keyed by block ID and start cursor. Unknown blocks
/// answer with a 404 like the real API.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockBlockRepository {
    pages: Arc<Mutex<HashMap<PageKey, Value>>>,
    failures: Arc<Mutex<HashMap<String, (u16, String)>>>,
    calls: Arc<Mutex<Vec<ChildrenCall>>>,
    appended: Arc<Mutex<Vec<(String, Value)>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockBlockRepository {
    pub fn new() -> Self {
        Self {
            pages: Arc::new(Mutex::new(HashMap::new())),
            failures: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            appended: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Register a single, complete page of children.
    pub fn add_children(&self, block_id: &str, results: Vec<Value>) {
        self.add_page(
            block_id,
            None,
            json!({"object": "list", "results": results, "has_more": false, "next_cursor": null}),
        );
    }

    /// Register the raw response for `block_id` at `cursor`.
    pub fn add_page(&self, block_id: &str, cursor: Option<&str>, response: Value) {
        let mut pages = self.pages.lock().unwrap();
        pages.insert(
            (block_id.to_string(), cursor.map(str::to_string)),
            response,
        );
    }

    /// Make every fetch of `block_id` fail with an upstream status.
    pub fn fail_block(&self, block_id: &str, status: u16, message: &str) {
        let mut failures = self.failures.lock().unwrap();
        failures.insert(block_id.to_string(), (status, message.to_string()));
    }

    pub fn calls(&self) -> Vec<ChildrenCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn appended(&self) -> Vec<(String, Value)> {
        self.appended.lock().unwrap().clone()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockBlockRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlockRepository for MockBlockRepository {
    async fn children(
        &self,
        block_id: &str,
        page_size: Option<u32>,
        start_cursor: Option<&str>,
    ) -> NotionApiResult<Value> {
        self.track_call("children");
        self.calls.lock().unwrap().push(ChildrenCall {
            block_id: block_id.to_string(),
            page_size,
            start_cursor: start_cursor.map(str::to_string),
        });

        if let Some((status, message)) = self.failures.lock().unwrap().get(block_id) {
            return Err(NotionApiError::Upstream {
                status: *status,
                message: message.clone(),
            });
        }

        let pages = self.pages.lock().unwrap();
        pages
            .get(&(block_id.to_string(), start_cursor.map(str::to_string)))
            .cloned()
            .ok_or_else(|| NotionApiError::Upstream {
                status: 404,
                message: "Not found".to_string(),
            })
    }

    async fn append(&self, block_id: &str, children: &Value) -> NotionApiResult<Value> {
        self.track_call("append");
        self.appended
            .lock()
            .unwrap()
            .push((block_id.to_string(), children.clone()));
        Ok(json!({"object": "list", "results": children}))
    }
}
