//! Framework-tool adapter.
//!
//! Each `FrameworkTool` is a bindable callable: it carries the operation's
//! name and description, an `InputModel` that validates arguments, and an
//! `invoke` entry point that runs through the dispatcher. With the `mcp`
//! feature enabled the tools convert to `rmcp` tool definitions.

use super::parameters_schema;
use crate::catalog::{validate_arguments, Arguments, Operation, ParameterSpec};
use crate::dispatcher::{Dispatcher, ToolError};
use crate::error::ValidationError;
use serde_json::{Map, Value};
use thiserror::Error;

/// Tool-level failure signal. Never an empty success.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ToolFailure {
    pub kind: String,
    pub message: String,
    pub status: Option<u16>,
}

impl From<ToolError> for ToolFailure {
    fn from(error: ToolError) -> Self {
        Self {
            kind: error.kind,
            message: error.message,
            status: error.status,
        }
    }
}

/// Parameter-validating input model for one operation.
#[derive(Debug, Clone)]
pub struct InputModel {
    parameters: Vec<ParameterSpec>,
    schema: Map<String, Value>,
}

impl InputModel {
    fn for_operation(operation: &Operation) -> Self {
        let schema = match parameters_schema(operation, true) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            parameters: operation.parameters.clone(),
            schema,
        }
    }

    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    /// JSON-Schema object for the input.
    pub fn json_schema(&self) -> &Map<String, Value> {
        &self.schema
    }

    pub fn validate(&self, arguments: &Value) -> Result<Arguments, ValidationError> {
        validate_arguments(&self.parameters, arguments)
    }
}

/// A callable tool bound to a dispatcher.
#[derive(Clone)]
pub struct FrameworkTool {
    name: &'static str,
    description: &'static str,
    input: InputModel,
    dispatcher: Dispatcher,
}

impl FrameworkTool {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn input_model(&self) -> &InputModel {
        &self.input
    }

    /// Run the operation, returning the pretty-printed result value.
    pub fn invoke(&self, arguments: &Value) -> Result<String, ToolFailure> {
        let value = self
            .dispatcher
            .execute(self.name, arguments)
            .into_result()
            .map_err(ToolFailure::from)?;

        serde_json::to_string_pretty(&value).map_err(|e| ToolFailure {
            kind: "SerializationError".to_string(),
            message: e.to_string(),
            status: None,
        })
    }

    /// `rmcp` tool definition for `tools/list`.
    #[cfg(feature = "mcp")]
    pub fn to_mcp_tool(&self) -> rmcp::model::Tool {
        rmcp::model::Tool::new(
            self.name,
            self.description,
            std::sync::Arc::new(self.input.schema.clone()),
        )
    }
}

impl std::fmt::Debug for FrameworkTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameworkTool")
            .field("name", &self.name)
            .field("input", &self.input)
            .finish()
    }
}

/// One framework tool per catalog operation, in catalog order.
pub fn framework_tools(dispatcher: &Dispatcher) -> Vec<FrameworkTool> {
    dispatcher
        .catalog()
        .operations()
        .iter()
        .map(|op| FrameworkTool {
            name: op.name,
            description: op.description,
            input: InputModel::for_operation(op),
            dispatcher: dispatcher.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::client::{Backend, BackendCall};
    use crate::error::{CrmApiError, CrmApiResult};
    use serde_json::json;
    use std::sync::Arc;

    struct FixedBackend(Option<Value>);

    impl Backend for FixedBackend {
        fn execute(&self, _call: &BackendCall) -> CrmApiResult<Value> {
            self.0.clone().ok_or(CrmApiError::ApiError {
                status: 500,
                message: "internal".to_string(),
            })
        }
    }

    fn tools(response: Option<Value>) -> Vec<FrameworkTool> {
        let catalog = Arc::new(Catalog::standard().unwrap());
        let dispatcher = Dispatcher::new(catalog, Arc::new(FixedBackend(response)));
        framework_tools(&dispatcher)
    }

    #[test]
    fn test_invoke_success_returns_pretty_json() {
        let tools = tools(Some(json!({"total": 3})));
        let summary = tools
            .iter()
            .find(|t| t.name() == "get_pipeline_summary")
            .unwrap();

        let output = summary.invoke(&json!({"time_range": "7d"})).unwrap();
        assert_eq!(output, "{\n  \"total\": 3\n}");
    }

    #[test]
    fn test_invoke_backend_failure_is_signalled() {
        let tools = tools(None);
        let failure = tools[0].invoke(&json!({})).unwrap_err();
        assert_eq!(failure.kind, "BackendError");
        assert_eq!(failure.status, Some(500));
    }

    #[test]
    fn test_input_model_validates() {
        let tools = tools(Some(json!({})));
        let create = tools.iter().find(|t| t.name() == "create_contact").unwrap();

        let err = create
            .input_model()
            .validate(&json!({"first_name": "Ada"}))
            .unwrap_err();
        assert_eq!(err.parameter(), Some("last_name"));
        assert_eq!(
            create.input_model().json_schema()["required"],
            json!(["first_name", "last_name"])
        );
    }
}
