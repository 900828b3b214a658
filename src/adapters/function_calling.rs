//! Function-calling adapter: `{name, description, parameters}`.

use super::parameters_schema;
use crate::catalog::Catalog;
use serde::Serialize;
use serde_json::Value;

/// Rendering options for function-calling schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaOptions {
    /// Emit a `description` on every property (default: true)
    pub property_descriptions: bool,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            property_descriptions: true,
        }
    }
}

/// One function definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionSchema {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Describe every catalog operation as a function definition.
pub fn function_calling_schemas(catalog: &Catalog, options: SchemaOptions) -> Vec<FunctionSchema> {
    catalog
        .operations()
        .iter()
        .map(|op| FunctionSchema {
            name: op.name.to_string(),
            description: op.description.to_string(),
            parameters: parameters_schema(op, options.property_descriptions),
        })
        .collect()
}
