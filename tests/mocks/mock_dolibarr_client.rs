use async_trait::async_trait;
use dolibarr_mcp_server::client::{AsyncDolibarrClient, Method};
use dolibarr_mcp_server::error::DolibarrApiResult;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A request seen by the mock client.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Mock Dolibarr client for testing.
///
/// Records every request and answers with queued responses in order. When the
/// queue is empty it answers with an empty JSON array.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockDolibarrClient {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responses: Arc<Mutex<VecDeque<DolibarrApiResult<Value>>>>,
}

#[allow(dead_code)]
impl MockDolibarrClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn respond_with(&self, value: Value) -> &Self {
        self.responses.lock().unwrap().push_back(Ok(value));
        self
    }

    /// Queue a failure.
    pub fn fail_with(&self, error: dolibarr_mcp_server::DolibarrApiError) -> &Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The most recent request; panics when there is none.
    pub fn last_request(&self) -> RecordedRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request recorded")
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl AsyncDolibarrClient for MockDolibarrClient {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> DolibarrApiResult<Value> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path: path.to_string(),
            body,
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Value::Array(Vec::new())))
    }
}
