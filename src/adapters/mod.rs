//! Schema adapters: translate the catalog into each tool-calling convention.
//!
//! All adapters are pure functions of the catalog. They preserve catalog order
//! and produce identical output on every call.

pub mod framework;
pub mod function_calling;
pub mod tool_use;

pub use framework::{framework_tools, FrameworkTool, InputModel, ToolFailure};
pub use function_calling::{function_calling_schemas, FunctionSchema, SchemaOptions};
pub use tool_use::{tool_use_schemas, ToolUseSchema};

use crate::catalog::{Operation, ParamKind, ParameterSpec};
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;

/// The calling conventions this crate can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterKind {
    /// `{name, description, parameters}`
    FunctionCalling,
    /// `{name, description, input_schema}`
    ToolUse,
    /// MCP tool objects served through `rmcp`
    Mcp,
}

impl AdapterKind {
    pub const ALL: [AdapterKind; 3] = [Self::FunctionCalling, Self::ToolUse, Self::Mcp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FunctionCalling => "function-calling",
            Self::ToolUse => "tool-use",
            Self::Mcp => "mcp",
        }
    }
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdapterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "function-calling" | "functions" | "openai" => Ok(Self::FunctionCalling),
            "tool-use" | "tools" | "anthropic" => Ok(Self::ToolUse),
            "mcp" | "framework" => Ok(Self::Mcp),
            other => Err(format!("Unknown adapter: {}", other)),
        }
    }
}

/// Which optional integrations were compiled in. Resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Integrations {
    pub mcp: bool,
}

impl Integrations {
    pub fn detect() -> Self {
        Self {
            mcp: cfg!(feature = "mcp"),
        }
    }

    pub fn is_available(&self, kind: AdapterKind) -> bool {
        match kind {
            AdapterKind::FunctionCalling | AdapterKind::ToolUse => true,
            AdapterKind::Mcp => self.mcp,
        }
    }

    /// Adapters usable in this build.
    pub fn available(&self) -> Vec<AdapterKind> {
        AdapterKind::ALL
            .into_iter()
            .filter(|kind| self.is_available(*kind))
            .collect()
    }
}

impl Default for Integrations {
    fn default() -> Self {
        Self::detect()
    }
}

/// JSON-Schema property for one parameter.
fn property_schema(spec: &ParameterSpec, with_description: bool) -> Value {
    let mut property = Map::new();
    property.insert("type".into(), json!(spec.kind.json_type()));

    if spec.kind == ParamKind::StringArray {
        property.insert("items".into(), json!({"type": "string"}));
    }
    if let Some(allowed) = spec.allowed_values {
        property.insert("enum".into(), json!(allowed));
    }
    if spec.non_empty {
        property.insert("minLength".into(), json!(1));
    }
    if let Some(default) = &spec.default {
        property.insert("default".into(), default.clone());
    }
    if with_description {
        property.insert("description".into(), json!(spec.description));
    }

    Value::Object(property)
}

/// JSON-Schema object describing an operation's parameters.
pub(crate) fn parameters_schema(operation: &Operation, with_descriptions: bool) -> Value {
    let properties: Map<String, Value> = operation
        .parameters
        .iter()
        .map(|spec| (spec.name.to_string(), property_schema(spec, with_descriptions)))
        .collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": operation.required(),
    })
}
