//! The dispatcher: the single execution funnel for every calling convention.
//!
//! `dispatch` returns typed errors for programmatic callers; `execute` folds the
//! same outcome into a `ToolResult` envelope that never fails.

use crate::catalog::Catalog;
use crate::client::Backend;
use crate::error::{ToolkitError, ToolkitResult};
use crate::metrics::Metrics;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Error half of a `ToolResult`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolError {
    /// Stable kind: `ValidationError`, `BackendError`, `UnknownOperation`, ...
    pub kind: String,
    pub message: String,
    /// HTTP status of a backend failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl From<&ToolkitError> for ToolError {
    fn from(error: &ToolkitError) -> Self {
        let message = match error {
            ToolkitError::UnknownOperation(name) => name.clone(),
            other => other.to_string(),
        };
        Self {
            kind: error.kind().to_string(),
            message,
            status: error.status(),
        }
    }
}

/// Normalized outcome of one dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResult {
    pub ok: bool,
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
}

impl ToolResult {
    pub fn success(value: Value) -> Self {
        Self {
            ok: true,
            value,
            error: None,
        }
    }

    pub fn failure(error: ToolError) -> Self {
        Self {
            ok: false,
            value: Value::Null,
            error: Some(error),
        }
    }

    pub fn into_result(self) -> Result<Value, ToolError> {
        match self.error {
            Some(error) if !self.ok => Err(error),
            _ => Ok(self.value),
        }
    }

    /// Text handed back to a model in an agent loop.
    ///
    /// Success is the pretty-printed value; failure is `{"error", "kind"}`.
    pub fn to_agent_string(&self) -> String {
        let payload = match &self.error {
            Some(error) if !self.ok => json!({"error": error.message, "kind": error.kind}),
            _ => self.value.clone(),
        };
        serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string())
    }
}

impl From<ToolkitResult<Value>> for ToolResult {
    fn from(result: ToolkitResult<Value>) -> Self {
        match result {
            Ok(value) => Self::success(value),
            Err(e) => Self::failure(ToolError::from(&e)),
        }
    }
}

/// Runs catalog operations against a backend.
#[derive(Clone)]
pub struct Dispatcher {
    catalog: Arc<Catalog>,
    backend: Arc<dyn Backend>,
    metrics: Metrics,
}

impl Dispatcher {
    pub fn new(catalog: Arc<Catalog>, backend: Arc<dyn Backend>) -> Self {
        Self {
            catalog,
            backend,
            metrics: Metrics::new(),
        }
    }

    /// Record dispatches into an existing metrics collector.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Validate, plan and execute an operation, returning typed errors.
    pub fn dispatch(&self, name: &str, arguments: &Value) -> ToolkitResult<Value> {
        let result = self.run_operation(name, arguments);
        self.metrics.record_dispatch(result.is_ok());

        if let Err(e) = &result {
            tracing::warn!(operation = %name, kind = e.kind(), "Dispatch failed: {}", e);
        }
        result
    }

    /// Same as `dispatch`, folded into a `ToolResult`. Never fails.
    pub fn execute(&self, name: &str, arguments: &Value) -> ToolResult {
        self.dispatch(name, arguments).into()
    }

    fn run_operation(&self, name: &str, arguments: &Value) -> ToolkitResult<Value> {
        let operation = self
            .catalog
            .get(name)
            .ok_or_else(|| ToolkitError::UnknownOperation(name.to_string()))?;

        let plan = operation.plan(arguments)?;
        tracing::debug!(operation = %name, calls = plan.calls().count(), "Dispatching");

        Ok(plan.execute(self.backend.as_ref())?)
    }
}
