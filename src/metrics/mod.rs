//! Basic metrics instrumentation for tracking performance.
//!
//! Provides counters and duration tracking for HTTP requests and API operations.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Metrics collector for tracking API performance.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of HTTP requests made
    http_requests_total: Arc<AtomicU64>,

    /// Total number of HTTP errors
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    /// Number of blocks fetched
    blocks_fetched_total: Arc<AtomicU64>,

    /// Number of pages (database rows and search hits) fetched
    pages_fetched_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
            blocks_fetched_total: Arc::new(AtomicU64::new(0)),
            pages_fetched_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record blocks fetched.
    pub fn record_blocks_fetched(&self, count: usize) {
        self.blocks_fetched_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record pages fetched.
    pub fn record_pages_fetched(&self, count: usize) {
        self.pages_fetched_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Get total HTTP requests.
    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP errors.
    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.http_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Get total blocks fetched.
    pub fn blocks_fetched_total(&self) -> u64 {
        self.blocks_fetched_total.load(Ordering::Relaxed)
    }

    /// Get total pages fetched.
    pub fn pages_fetched_total(&self) -> u64 {
        self.pages_fetched_total.load(Ordering::Relaxed)
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            blocks_fetched_total: self.blocks_fetched_total(),
            pages_fetched_total: self.pages_fetched_total(),
        }
    }
}

/// Point-in-time snapshot of the collected metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_avg_ms: f64,
    pub blocks_fetched_total: u64,
    pub pages_fetched_total: u64,
}

impl std::fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "requests={} errors={} avg_ms={:.1} blocks={} pages={}",
            self.http_requests_total,
            self.http_errors_total,
            self.http_duration_avg_ms,
            self.blocks_fetched_total,
            self.pages_fetched_total
        )
    }
}
