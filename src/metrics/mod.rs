//! Request accounting for calls made against the Dolibarr API.
//!
//! Counts are kept per HTTP method, so the shutdown summary shows how much
//! of the traffic was reads versus writes and where the failures were.

use crate::client::Method;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

const METHODS: [Method; 4] = [Method::Get, Method::Post, Method::Put, Method::Delete];

fn slot(method: Method) -> usize {
    match method {
        Method::Get => 0,
        Method::Post => 1,
        Method::Put => 2,
        Method::Delete => 3,
    }
}

#[derive(Debug, Default)]
struct MethodCounters {
    requests: AtomicU64,
    errors: AtomicU64,
}

/// Shared, lock-free counters. Clones observe the same values.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    per_method: Arc<[MethodCounters; 4]>,
    duration_total_ms: Arc<AtomicU64>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished request; `failed` marks a non-2xx or transport failure.
    pub fn record(&self, method: Method, duration: Duration, failed: bool) {
        let counters = &self.per_method[slot(method)];
        counters.requests.fetch_add(1, Ordering::Relaxed);
        if failed {
            counters.errors.fetch_add(1, Ordering::Relaxed);
        }
        self.duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn requests(&self, method: Method) -> u64 {
        self.per_method[slot(method)].requests.load(Ordering::Relaxed)
    }

    pub fn errors(&self, method: Method) -> u64 {
        self.per_method[slot(method)].errors.load(Ordering::Relaxed)
    }

    pub fn http_requests_total(&self) -> u64 {
        METHODS.iter().map(|m| self.requests(*m)).sum()
    }

    pub fn http_errors_total(&self) -> u64 {
        METHODS.iter().map(|m| self.errors(*m)).sum()
    }

    pub fn http_duration_total_ms(&self) -> u64 {
        self.duration_total_ms.load(Ordering::Relaxed)
    }

    pub fn http_duration_avg_ms(&self) -> f64 {
        match self.http_requests_total() {
            0 => 0.0,
            count => self.http_duration_total_ms() as f64 / count as f64,
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            by_method: METHODS
                .iter()
                .map(|m| MethodSummary {
                    method: *m,
                    requests: self.requests(*m),
                    errors: self.errors(*m),
                })
                .collect(),
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodSummary {
    pub method: Method,
    pub requests: u64,
    pub errors: u64,
}

/// Snapshot logged when the server shuts down.
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub by_method: Vec<MethodSummary>,
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_avg_ms: f64,
}

impl fmt::Display for MetricsSummary {
    /// `12 requests (1 failed, avg 84.0 ms): GET 9/1, POST 2/0, PUT 1/0`
    ///
    /// Methods never used are left out; each pair is requests/failures.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} requests ({} failed, avg {:.1} ms)",
            self.http_requests_total, self.http_errors_total, self.http_duration_avg_ms
        )?;
        let used: Vec<String> = self
            .by_method
            .iter()
            .filter(|m| m.requests > 0)
            .map(|m| format!("{} {}/{}", m.method, m.requests, m.errors))
            .collect();
        if !used.is_empty() {
            write!(f, ": {}", used.join(", "))?;
        }
        Ok(())
    }
}

/// Times one request from construction to `complete`/`complete_with_error`.
pub struct HttpTimer {
    start: Instant,
    method: Method,
    metrics: Metrics,
}

impl HttpTimer {
    pub fn new(metrics: Metrics, method: Method) -> Self {
        Self {
            start: Instant::now(),
            method,
            metrics,
        }
    }

    pub fn complete(self) {
        self.metrics.record(self.method, self.start.elapsed(), false);
    }

    pub fn complete_with_error(self) {
        self.metrics.record(self.method, self.start.elapsed(), true);
    }
}
