//! Configuration management for the CRM LLM tools.
//!
//! This module handles loading and validating configuration from environment variables.
//! It avoids polluting stdout (which MCP uses for communication) by loading the
//! .env file through `dotenvy`, which never prints.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::time::Duration;

/// Default backend address (local development server).
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the CRM backend.
///
/// Built once, validated once, and shared read-only by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// CRM API base URL (default: `http://localhost:8080`)
    pub crm_api_url: String,

    /// Bearer credential sent as `Authorization: Bearer <key>` when present
    pub crm_api_key: Option<String>,

    /// HTTP request timeout in seconds (default: 30)
    pub request_timeout: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Create a configuration for the given base URL with default settings.
    pub fn new(crm_api_url: impl Into<String>) -> Self {
        Self {
            crm_api_url: crm_api_url.into(),
            ..Self::default()
        }
    }

    /// Set the bearer credential. Blank keys are treated as absent.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        self.crm_api_key = if key.trim().is_empty() {
            None
        } else {
            Some(key)
        };
        self
    }

    /// Set the request timeout in seconds.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout = seconds;
        self
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Check the invariants every client relies on.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.crm_api_url.starts_with("http://") && !self.crm_api_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                var: "CRM_API_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "CRM_REQUEST_TIMEOUT".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `CRM_API_URL`: Base URL for the CRM API (default: `http://localhost:8080`)
    /// - `CRM_API_KEY`: Bearer credential (default: none)
    /// - `CRM_REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 30)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let crm_api_url = env::var("CRM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let request_timeout = Self::parse_env_u64("CRM_REQUEST_TIMEOUT", DEFAULT_TIMEOUT_SECS)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        let mut config = Config {
            crm_api_url,
            crm_api_key: None,
            request_timeout,
            log_level,
        };
        if let Ok(key) = env::var("CRM_API_KEY") {
            config = config.with_api_key(key);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            crm_api_url: DEFAULT_API_URL.to_string(),
            crm_api_key: None,
            request_timeout: DEFAULT_TIMEOUT_SECS,
            log_level: "error".to_string(),
        }
    }
}
