//! HTTP client for the CRM backend API.
//!
//! This module provides a synchronous HTTP client built on `ureq`. The client
//! handles authentication, timeouts, JSON encoding and error mapping; it never
//! retries. Async callers run it through `tokio::task::spawn_blocking`.

mod request;
pub use request::{BackendCall, Method};

use crate::config::Config;
use crate::error::{CrmApiError, CrmApiResult};
use crate::metrics::Metrics;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Executes backend calls.
///
/// `CrmClient` is the production implementation; tests substitute recording
/// doubles so dispatch logic can be checked without a server.
pub trait Backend: Send + Sync {
    fn execute(&self, call: &BackendCall) -> CrmApiResult<Value>;
}

/// HTTP client for the CRM API.
///
/// The underlying `ureq::Agent` keeps a connection pool that is shared by
/// clones and released when the last clone is dropped.
#[derive(Clone)]
pub struct CrmClient {
    /// Base URL for the CRM API
    base_url: String,

    /// Optional bearer credential
    api_key: Option<String>,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl CrmClient {
    /// Create a new CrmClient from configuration.
    pub fn new(config: &Config) -> Self {
        Self::with_metrics(config, Metrics::new())
    }

    /// Create a client that records into an existing metrics collector.
    pub fn with_metrics(config: &Config, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout()).build();

        Self {
            base_url: config.crm_api_url.clone(),
            api_key: config.crm_api_key.clone(),
            agent: Arc::new(agent),
            metrics,
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

    /// Execute a GET request with query parameters.
    pub fn get(&self, path: &str, query: &[(String, String)]) -> CrmApiResult<Value> {
        let call = BackendCall {
            method: Method::Get,
            path: path.to_string(),
            query: query.to_vec(),
            body: None,
        };
        self.send(&call)
    }

    /// Execute a POST request with a JSON body.
    pub fn post(&self, path: &str, body: &Value) -> CrmApiResult<Value> {
        self.send(&BackendCall::post(path, body.clone()))
    }

    /// Execute a PATCH request with a JSON body.
    pub fn patch(&self, path: &str, body: &Value) -> CrmApiResult<Value> {
        self.send(&BackendCall::patch(path, body.clone()))
    }

    /// Execute a DELETE request.
    pub fn delete(&self, path: &str) -> CrmApiResult<Value> {
        self.send(&BackendCall::delete(path))
    }

    fn send(&self, call: &BackendCall) -> CrmApiResult<Value> {
        let start = Instant::now();
        let url = self.build_url(&call.path);

        let mut request = self
            .agent
            .request(call.method.as_str(), &url)
            .set("Accept", "application/json");
        if let Some(api_key) = &self.api_key {
            request = request.set("Authorization", &format!("Bearer {}", api_key));
        }
        for (key, value) in &call.query {
            request = request.query(key, value);
        }

        tracing::debug!("{} {}", call.method, url);
        let result = match &call.body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };

        let duration = start.elapsed();
        self.metrics.record_http_request(duration);

        let outcome = match result {
            Ok(response) => Self::read_response(response),
            Err(e) => Err(self.map_error(e)),
        };

        match &outcome {
            Ok(_) => {
                tracing::debug!(
                    "{} {} - Success ({}ms)",
                    call.method,
                    url,
                    duration.as_millis()
                );
            }
            Err(e) => {
                tracing::error!("{} {} - Error: {}", call.method, url, e);
                self.metrics.record_http_error();
            }
        }

        outcome
    }

    /// Turn a completed response into JSON, rejecting non-2xx statuses.
    fn read_response(response: ureq::Response) -> CrmApiResult<Value> {
        let status = response.status();
        let body = response
            .into_string()
            .map_err(|e| CrmApiError::HttpError(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(CrmApiError::ApiError {
                status,
                message: body,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(CrmApiError::JsonError)
    }

    /// Map a ureq error to a CrmApiError.
    fn map_error(&self, error: ureq::Error) -> CrmApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());
                CrmApiError::ApiError {
                    status: code,
                    message,
                }
            }
            ureq::Error::Transport(transport) => {
                let detail = transport.to_string();
                if transport.kind() == ureq::ErrorKind::Io && detail.contains("timed out") {
                    CrmApiError::Timeout
                } else if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    CrmApiError::HttpError(format!("Connection failed: {}", detail))
                } else {
                    CrmApiError::HttpError(detail)
                }
            }
        }
    }
}

impl Backend for CrmClient {
    fn execute(&self, call: &BackendCall) -> CrmApiResult<Value> {
        self.send(call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_joins_slashes() {
        let client = CrmClient::new(&Config::new("http://localhost:8080/"));
        assert_eq!(
            client.build_url("/api/contacts"),
            "http://localhost:8080/api/contacts"
        );
        assert_eq!(
            client.build_url("api/timeline"),
            "http://localhost:8080/api/timeline"
        );
    }

    #[test]
    fn test_clones_share_metrics() {
        let client = CrmClient::new(&Config::default());
        let clone = client.clone();
        clone.metrics().record_http_error();
        assert_eq!(client.metrics().http_errors_total(), 1);
    }
}
