//! Tool-use adapter: `{name, description, input_schema}`.
//!
//! Same parameter block as function calling, nested under `input_schema`,
//! with a description on every property.

use super::parameters_schema;
use crate::catalog::Catalog;
use serde::Serialize;
use serde_json::Value;

/// One tool definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolUseSchema {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

pub fn tool_use_schemas(catalog: &Catalog) -> Vec<ToolUseSchema> {
    catalog
        .operations()
        .iter()
        .map(|op| ToolUseSchema {
            name: op.name.to_string(),
            description: op.description.to_string(),
            input_schema: parameters_schema(op, true),
        })
        .collect()
}
