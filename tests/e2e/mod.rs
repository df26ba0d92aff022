//! End-to-end test utilities and shared configuration.
//!
//! These helpers drive a live Dolibarr instance. Tests using them are ignored
//! by default; run them with `cargo test -- --ignored` once `.env` points at a
//! disposable instance.

use dolibarr_mcp_server::{DolibarrClient, Method};
use serde_json::Value;
use std::env;

/// Test configuration loaded from environment variables.
pub struct TestConfig {
    pub api_key: String,
    pub base_url: String,
}

impl TestConfig {
    /// Load configuration from .env file.
    ///
    /// # Panics
    /// Panics if DOLIBARR_BASE_URL or DOLIBARR_API_KEY is not set.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_key: env::var("DOLIBARR_API_KEY")
                .expect("DOLIBARR_API_KEY must be set in .env file for E2E tests"),
            base_url: env::var("DOLIBARR_BASE_URL")
                .expect("DOLIBARR_BASE_URL must be set in .env file for E2E tests"),
        }
    }
}

/// Create a DolibarrClient configured for testing.
pub fn setup_test_client() -> DolibarrClient {
    let config = TestConfig::from_env();
    DolibarrClient::with_base_url(config.base_url, config.api_key)
}

/// Deletes a record when dropped, so failed assertions still clean up.
pub struct RecordGuard<'a> {
    client: &'a DolibarrClient,
    path: Option<String>,
}

impl<'a> RecordGuard<'a> {
    pub fn new(client: &'a DolibarrClient) -> Self {
        Self { client, path: None }
    }

    /// Register `endpoint/id` for deletion.
    pub fn track(&mut self, endpoint: &str, id: &str) {
        self.path = Some(format!("{}/{}", endpoint, id));
    }

    /// Forget the record, e.g. after the test deleted it itself.
    pub fn release(&mut self) {
        self.path = None;
    }
}

impl Drop for RecordGuard<'_> {
    fn drop(&mut self) {
        if let Some(ref path) = self.path {
            match self.client.request(Method::Delete, path, None) {
                Ok(_) => println!("  ✓ Cleaned up {}", path),
                Err(e) => eprintln!("  ⚠ Failed to clean up {}: {}", path, e),
            }
        }
    }
}

/// String form of an id field, whether the API sent it as number or string.
#[allow(dead_code)]
pub fn id_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
