//! HTTP client for the Dolibarr REST API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. Every resource operation goes through the single
//! [`DolibarrClient::request`] primitive, which handles authentication, JSON bodies and
//! error mapping.

mod async_wrapper;
pub use async_wrapper::{AsyncDolibarrClient, AsyncDolibarrClientImpl};

use crate::config::Config;
use crate::error::{DolibarrApiError, DolibarrApiResult};
use crate::metrics::{HttpTimer, Metrics};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Header carrying the Dolibarr API key.
pub const API_KEY_HEADER: &str = "DOLAPIKEY";

/// HTTP methods used against the Dolibarr API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP client for the Dolibarr REST API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct DolibarrClient {
    /// Base URL for the Dolibarr API
    base_url: String,

    /// API key for authentication
    api_key: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl DolibarrClient {
    /// Create a new DolibarrClient from configuration.
    pub fn new(config: &Config) -> Self {
        Self::build(
            config.dolibarr_api_url.clone(),
            config.dolibarr_api_key.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    /// Create a DolibarrClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        Self::build(base_url, api_key, Duration::from_secs(30))
    }

    fn build(base_url: String, api_key: String, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            base_url,
            api_key,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute one authenticated request and parse the JSON response.
    ///
    /// `path` is relative to the base URL and may carry a query string. Any
    /// status >= 400 becomes an error carrying the remote `error.message`
    /// when the body has one. An empty success body parses as `null`.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> DolibarrApiResult<Value> {
        let url = self.build_url(path);
        let timer = HttpTimer::new(self.metrics.clone(), method);

        tracing::debug!("{} {}", method, url);
        if let Some(body) = body {
            tracing::debug!(
                "Request body: {}",
                serde_json::to_string_pretty(body).unwrap_or_else(|_| "<invalid json>".to_string())
            );
        }

        let request = self
            .agent
            .request(method.as_str(), &url)
            .set(API_KEY_HEADER, &self.api_key)
            .set("Accept", "application/json")
            .set("Content-Type", "application/json");

        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };

        let response = match result {
            Ok(response) => {
                timer.complete();
                response
            }
            Err(e) => {
                timer.complete_with_error();
                let error = self.map_error(e);
                tracing::error!("{} {} - Error: {}", method, url, error);
                return Err(error);
            }
        };

        tracing::debug!("{} {} - Success (status: {})", method, url, response.status());

        let text = response
            .into_string()
            .map_err(|e| DolibarrApiError::HttpError(e.to_string()))?;

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(DolibarrApiError::JsonError)
    }

    /// Map a ureq error to a DolibarrApiError.
    fn map_error(&self, error: ureq::Error) -> DolibarrApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let body = response.into_string().unwrap_or_default();
                let message = match extract_error_message(&body) {
                    Some(message) => {
                        tracing::error!("HTTP error {}: {}", code, message);
                        tracing::debug!("Error details: {}", body);
                        message
                    }
                    None if !body.trim().is_empty() => {
                        tracing::error!("HTTP error {}: {}", code, body);
                        body.trim().to_string()
                    }
                    None => format!("HTTP error {}", code),
                };

                match code {
                    401 => DolibarrApiError::Unauthorized(message),
                    403 => DolibarrApiError::Forbidden(message),
                    404 => DolibarrApiError::NotFound(message),
                    _ => DolibarrApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    DolibarrApiError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io
                    && transport.to_string().contains("timed out")
                {
                    DolibarrApiError::Timeout
                } else {
                    DolibarrApiError::HttpError(transport.to_string())
                }
            }
        }
    }
}

/// Pull `error.message` out of a Dolibarr error body.
///
/// Dolibarr reports failures as `{"error": {"code": 404, "message": "..."}}`.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let client = DolibarrClient::with_base_url(
            "https://erp.example.com/api/index.php".to_string(),
            "test-key".to_string(),
        );

        assert_eq!(
            client.build_url("/contacts"),
            "https://erp.example.com/api/index.php/contacts"
        );

        assert_eq!(
            client.build_url("contacts?limit=1"),
            "https://erp.example.com/api/index.php/contacts?limit=1"
        );

        let client_with_slash = DolibarrClient::with_base_url(
            "https://erp.example.com/api/index.php/".to_string(),
            "test-key".to_string(),
        );

        assert_eq!(
            client_with_slash.build_url("/tickets/ref/TS001"),
            "https://erp.example.com/api/index.php/tickets/ref/TS001"
        );
    }

    #[test]
    fn test_client_creation() {
        let config = Config {
            dolibarr_api_url: "https://erp.example.com/api/index.php".to_string(),
            dolibarr_api_key: "test-key-123".to_string(),
            ..Config::default()
        };

        let client = DolibarrClient::new(&config);
        assert_eq!(client.base_url, "https://erp.example.com/api/index.php");
        assert_eq!(client.api_key, "test-key-123");
        assert_eq!(client.metrics().http_requests_total(), 0);
    }

    #[test]
    fn test_extract_error_message() {
        let body = r#"{"error": {"code": 404, "message": "Not Found: Object not found"}}"#;
        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("Not Found: Object not found")
        );

        assert_eq!(extract_error_message(r#"{"error": "flat"}"#), None);
        assert_eq!(extract_error_message("<html>Bad Gateway</html>"), None);
        assert_eq!(extract_error_message(""), None);
    }

    #[test]
    fn test_method_names() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }
}
