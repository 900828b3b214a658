//! The operation catalog: one declarative source of truth for every CRM tool.
//!
//! Each `Operation` names itself, documents its parameters, and knows how to
//! turn validated arguments into backend calls. Schema adapters and the
//! dispatcher both read from the same `Catalog`, so the three calling
//! conventions cannot drift apart.

pub mod operations;
pub mod params;
pub mod plan;

pub use params::{validate_arguments, Arguments, ParamKind, ParameterSpec};
pub use plan::CallPlan;

use crate::error::{CatalogError, ValidationError};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Builds the call plan from validated arguments.
pub type PlanBuilder = fn(&Arguments) -> Result<CallPlan, ValidationError>;

/// One canonical CRM action.
#[derive(Clone)]
pub struct Operation {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Vec<ParameterSpec>,
    build: PlanBuilder,
}

impl Operation {
    pub fn new(
        name: &'static str,
        description: &'static str,
        parameters: Vec<ParameterSpec>,
        build: PlanBuilder,
    ) -> Self {
        Self {
            name,
            description,
            parameters,
            build,
        }
    }

    /// Names of required parameters, in declaration order.
    pub fn required(&self) -> Vec<&'static str> {
        self.parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect()
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Validate raw arguments and apply defaults.
    pub fn validate(&self, arguments: &Value) -> Result<Arguments, ValidationError> {
        validate_arguments(&self.parameters, arguments)
    }

    /// Validate raw arguments and build the call plan.
    pub fn plan(&self, arguments: &Value) -> Result<CallPlan, ValidationError> {
        let arguments = self.validate(arguments)?;
        (self.build)(&arguments)
    }

    fn check(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for spec in &self.parameters {
            if !seen.insert(spec.name) {
                return Err(CatalogError::InvalidParameter {
                    operation: self.name.to_string(),
                    param: spec.name.to_string(),
                    reason: "declared twice".to_string(),
                });
            }
            spec.check().map_err(|reason| CatalogError::InvalidParameter {
                operation: self.name.to_string(),
                param: spec.name.to_string(),
                reason,
            })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// Ordered, immutable registry of operations.
#[derive(Debug, Clone)]
pub struct Catalog {
    operations: Vec<Operation>,
    index: HashMap<&'static str, usize>,
}

impl Catalog {
    /// Register operations in order, rejecting duplicates and malformed specs.
    pub fn new(operations: Vec<Operation>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(operations.len());
        for (position, operation) in operations.iter().enumerate() {
            operation.check()?;
            if index.insert(operation.name, position).is_some() {
                return Err(CatalogError::DuplicateOperation(operation.name.to_string()));
            }
        }

        Ok(Self { operations, index })
    }

    /// The built-in CRM operations.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::new(operations::all())
    }

    pub fn get(&self, name: &str) -> Option<&Operation> {
        self.index.get(name).map(|&i| &self.operations[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Operations in registration order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.operations.iter().map(|op| op.name).collect()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
