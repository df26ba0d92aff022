//! Async wrapper around synchronous DolibarrClient.
//!
//! This module provides an async interface to the synchronous DolibarrClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::{DolibarrClient, Method};
use crate::error::{DolibarrApiError, DolibarrApiResult};
use crate::metrics::Metrics;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Async request primitive for the Dolibarr API.
///
/// Repositories depend on this trait only, so tests can substitute a
/// recording implementation for the HTTP client.
#[async_trait]
pub trait AsyncDolibarrClient: Send + Sync {
    /// Issue one request and return the parsed JSON response.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> DolibarrApiResult<Value>;
}

/// Async wrapper around synchronous DolibarrClient.
///
/// Uses `tokio::task::spawn_blocking` to run synchronous HTTP
/// operations on a dedicated thread pool, preventing blocking
/// the async runtime.
#[derive(Clone)]
pub struct AsyncDolibarrClientImpl {
    client: Arc<DolibarrClient>,
}

impl AsyncDolibarrClientImpl {
    pub fn new(client: DolibarrClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Metrics of the underlying HTTP client.
    pub fn metrics(&self) -> &Metrics {
        self.client.metrics()
    }
}

#[async_trait]
impl AsyncDolibarrClient for AsyncDolibarrClientImpl {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> DolibarrApiResult<Value> {
        let client = self.client.clone();
        let path = path.to_string();

        tokio::task::spawn_blocking(move || client.request(method, &path, body.as_ref()))
            .await
            .map_err(|e| DolibarrApiError::HttpError(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    #[tokio::test]
    async fn test_async_client_creation() {
        let config = Config {
            dolibarr_api_key: "test_key".to_string(),
            dolibarr_api_url: "https://erp.example.com/api/index.php".to_string(),
            ..Config::default()
        };
        let client = DolibarrClient::new(&config);
        let async_client = AsyncDolibarrClientImpl::new(client);

        // Should be able to clone and share metrics
        let cloned = async_client.clone();
        assert_eq!(cloned.metrics().http_requests_total(), 0);
    }

    #[tokio::test]
    async fn test_connection_failure_is_an_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP
        let client = DolibarrClient::with_base_url(
            "http://127.0.0.1:9".to_string(),
            "test_key".to_string(),
        );
        let async_client = AsyncDolibarrClientImpl::new(client);

        let result = async_client.request(Method::Get, "contacts", None).await;
        assert!(result.is_err());
        assert_eq!(async_client.metrics().http_errors_total(), 1);
    }
}
