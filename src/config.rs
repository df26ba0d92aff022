//! Configuration management for the Dolibarr MCP Server.
//!
//! This module handles loading and validating configuration from environment variables.
//! It avoids polluting stdout (which MCP uses for communication) by loading the
//! .env file through `dotenvy`, which never prints.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Configuration for the Dolibarr MCP Server.
///
/// Built once at startup and shared read-only with every component.
#[derive(Debug, Clone)]
pub struct Config {
    /// Dolibarr REST API base URL (e.g. `https://erp.example.com/api/index.php`)
    pub dolibarr_api_url: String,

    /// Dolibarr API key, sent as the `DOLAPIKEY` header
    pub dolibarr_api_key: String,

    /// Default result limit for list tools (default: 100, 0 = server default)
    pub default_limit: u32,

    /// Default sort order for list tools (default: "DESC")
    pub default_sort_order: String,

    /// Default result limit for agenda event listings (default: 100)
    pub default_agenda_limit: u32,

    /// HTTP request timeout in seconds (default: 30)
    pub request_timeout: u64,

    /// Owner assigned to agenda events created without `userownerid` (default: 5)
    pub default_event_owner_id: i64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `DOLIBARR_BASE_URL`: Base URL for the Dolibarr REST API
    /// - `DOLIBARR_API_KEY`: API key for authentication
    ///
    /// Optional environment variables:
    /// - `DEFAULT_LIMIT`: Default list limit (default: 100)
    /// - `DEFAULT_SORT_ORDER`: Default sort order (default: DESC)
    /// - `DEFAULT_AGENDA_LIMIT`: Default agenda list limit (default: 100)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 30)
    /// - `DEFAULT_EVENT_OWNER_ID`: Fallback agenda event owner (default: 5)
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let dolibarr_api_url = env::var("DOLIBARR_BASE_URL")
            .map_err(|_| ConfigError::MissingVar("DOLIBARR_BASE_URL".to_string()))?;

        let dolibarr_api_key = env::var("DOLIBARR_API_KEY")
            .map_err(|_| ConfigError::MissingVar("DOLIBARR_API_KEY".to_string()))?;

        if !dolibarr_api_url.starts_with("http://") && !dolibarr_api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "DOLIBARR_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        if dolibarr_api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "DOLIBARR_API_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let default_limit = Self::parse_env("DEFAULT_LIMIT", 100u32)?;
        let default_agenda_limit = Self::parse_env("DEFAULT_AGENDA_LIMIT", 100u32)?;
        let request_timeout = Self::parse_env("REQUEST_TIMEOUT", 30u64)?;
        let default_event_owner_id = Self::parse_env("DEFAULT_EVENT_OWNER_ID", 5i64)?;
        let default_sort_order =
            env::var("DEFAULT_SORT_ORDER").unwrap_or_else(|_| "DESC".to_string());

        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        Ok(Config {
            dolibarr_api_url,
            dolibarr_api_key,
            default_limit,
            default_sort_order,
            default_agenda_limit,
            request_timeout,
            default_event_owner_id,
        })
    }

    /// The API key with everything but its last four characters masked, for logs.
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.dolibarr_api_key.chars().collect();
        if chars.len() <= 4 {
            return "***".to_string();
        }
        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), visible)
    }

    /// Parse an environment variable with a default value.
    fn parse_env<T: std::str::FromStr>(var_name: &str, default: T) -> ConfigResult<T> {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dolibarr_api_url: String::new(),
            dolibarr_api_key: String::new(),
            default_limit: 100,
            default_sort_order: "DESC".to_string(),
            default_agenda_limit: 100,
            request_timeout: 30,
            default_event_owner_id: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_limit, 100);
        assert_eq!(config.default_sort_order, "DESC");
        assert_eq!(config.default_agenda_limit, 100);
        assert_eq!(config.request_timeout, 30);
        assert_eq!(config.default_event_owner_id, 5);
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_url() {
        let mut guard = EnvGuard::new();
        guard.set("DOLIBARR_BASE_URL", "not-a-url");
        guard.set("DOLIBARR_API_KEY", "test-key");

        let result = Config::from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "DOLIBARR_BASE_URL"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_empty_api_key() {
        let mut guard = EnvGuard::new();
        guard.set("DOLIBARR_BASE_URL", "https://erp.example.com/api/index.php");
        guard.set("DOLIBARR_API_KEY", "   ");

        let result = Config::from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "DOLIBARR_API_KEY"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("DOLIBARR_BASE_URL", "https://erp.example.com/api/index.php");
        guard.set("DOLIBARR_API_KEY", "test-key-123");
        guard.set("DEFAULT_LIMIT", "25");
        guard.set("DEFAULT_SORT_ORDER", "asc");
        guard.set("DEFAULT_EVENT_OWNER_ID", "12");

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.dolibarr_api_url, "https://erp.example.com/api/index.php");
        assert_eq!(config.dolibarr_api_key, "test-key-123");
        assert_eq!(config.default_limit, 25);
        assert_eq!(config.default_sort_order, "asc");
        assert_eq!(config.default_event_owner_id, 12);
    }

    #[test]
    #[serial]
    fn test_config_rejects_non_numeric_limit() {
        let mut guard = EnvGuard::new();
        guard.set("DOLIBARR_BASE_URL", "https://erp.example.com/api/index.php");
        guard.set("DOLIBARR_API_KEY", "test-key");
        guard.set("DEFAULT_AGENDA_LIMIT", "lots");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "DEFAULT_AGENDA_LIMIT"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_rejects_zero_timeout() {
        let mut guard = EnvGuard::new();
        guard.set("DOLIBARR_BASE_URL", "https://erp.example.com/api/index.php");
        guard.set("DOLIBARR_API_KEY", "test-key");
        guard.set("REQUEST_TIMEOUT", "0");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "REQUEST_TIMEOUT"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_parse_env() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_DOLIBARR_U32", "42");

        assert_eq!(Config::parse_env("TEST_DOLIBARR_U32", 10u32).unwrap(), 42);
        assert_eq!(Config::parse_env("TEST_DOLIBARR_MISSING", 10u32).unwrap(), 10);
    }

    #[test]
    #[serial]
    fn test_parse_env_rejects_negative_for_unsigned() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_DOLIBARR_NEGATIVE", "-1");

        assert!(Config::parse_env("TEST_DOLIBARR_NEGATIVE", 10u32).is_err());
    }

    #[test]
    fn test_masked_api_key() {
        let config = Config {
            dolibarr_api_key: "abcdef123456".to_string(),
            ..Config::default()
        };
        assert_eq!(config.masked_api_key(), "********3456");

        let short = Config {
            dolibarr_api_key: "abc".to_string(),
            ..Config::default()
        };
        assert_eq!(short.masked_api_key(), "***");
    }
}
