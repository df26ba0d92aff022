//! Test doubles and helpers shared by the integration tests.

mod mock_dolibarr_client;

#[allow(unused_imports)]
pub use mock_dolibarr_client::{MockDolibarrClient, RecordedRequest};

use dolibarr_mcp_server::client::AsyncDolibarrClient;
use dolibarr_mcp_server::{Config, Repositories};
use std::sync::Arc;

/// Repositories wired to `mock` with the default configuration.
#[allow(dead_code)]
pub fn repositories(mock: &MockDolibarrClient) -> Repositories {
    let client = Arc::new(mock.clone()) as Arc<dyn AsyncDolibarrClient>;
    Repositories::new(client, &Config::default())
}

/// Endpoint part of a recorded path, without the query string.
#[allow(dead_code)]
pub fn endpoint(path: &str) -> &str {
    path.split_once('?').map_or(path, |(endpoint, _)| endpoint)
}

/// Decoded query parameters of a recorded path, in order.
#[allow(dead_code)]
pub fn query_pairs(path: &str) -> Vec<(String, String)> {
    let Some((_, query)) = path.split_once('?') else {
        return Vec::new();
    };

    query
        .split('&')
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (
                key.to_string(),
                urlencoding::decode(value).unwrap().into_owned(),
            )
        })
        .collect()
}

/// Decoded value of one query parameter.
#[allow(dead_code)]
pub fn query_param(path: &str, key: &str) -> Option<String> {
    query_pairs(path)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}
