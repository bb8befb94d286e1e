use async_trait::async_trait;
use notion_mcp_server::error::{NotionApiError, NotionApiResult};
use notion_mcp_server::repositories::QueryRepository;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock query repository for testing.
///
/// Every query answers with the configured results; the request bodies are
/// kept so tests can check the filters that were sent.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockQueryRepository {
    results: Arc<Mutex<Vec<Value>>>,
    has_more: Arc<Mutex<bool>>,
    failure: Arc<Mutex<Option<(u16, String)>>>,
    queries: Arc<Mutex<Vec<(String, Value)>>>,
    searches: Arc<Mutex<Vec<Value>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockQueryRepository {
    pub fn new() -> Self {
        Self {
            results: Arc::new(Mutex::new(Vec::new())),
            has_more: Arc::new(Mutex::new(false)),
            failure: Arc::new(Mutex::new(None)),
            queries: Arc::new(Mutex::new(Vec::new())),
            searches: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn set_results(&self, results: Vec<Value>, has_more: bool) {
        *self.results.lock().unwrap() = results;
        *self.has_more.lock().unwrap() = has_more;
    }

    pub fn fail_with(&self, status: u16, message: &str) {
        *self.failure.lock().unwrap() = Some((status, message.to_string()));
    }

    pub fn queries(&self) -> Vec<(String, Value)> {
        self.queries.lock().unwrap().clone()
    }

    pub fn searches(&self) -> Vec<Value> {
        self.searches.lock().unwrap().clone()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn respond(&self) -> NotionApiResult<Value> {
        if let Some((status, message)) = self.failure.lock().unwrap().clone() {
            return Err(NotionApiError::Upstream { status, message });
        }

        Ok(json!({
            "object": "list",
            "results": self.results.lock().unwrap().clone(),
            "has_more": *self.has_more.lock().unwrap(),
            "next_cursor": null
        }))
    }
}

impl Default for MockQueryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryRepository for MockQueryRepository {
    async fn query(&self, database_id: &str, body: &Value) -> NotionApiResult<Value> {
        self.track_call("query");
        self.queries
            .lock()
            .unwrap()
            .push((database_id.to_string(), body.clone()));
        self.respond()
    }

    async fn search(&self, body: &Value) -> NotionApiResult<Value> {
        self.track_call("search");
        self.searches.lock().unwrap().push(body.clone());
        self.respond()
    }
}
