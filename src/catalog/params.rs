//! Parameter specifications and argument validation.

use crate::error::ValidationError;
use serde_json::{Map, Value};

/// JSON kind of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    String,
    Integer,
    Number,
    Boolean,
    /// Array of strings
    StringArray,
    Object,
}

impl ParamKind {
    /// JSON-Schema `type` keyword for this kind.
    pub fn json_type(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::StringArray => "array",
            Self::Object => "object",
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::StringArray => "array of strings",
            other => other.json_type(),
        }
    }

    /// Coerce `value` into this kind, or `None` if it does not fit.
    ///
    /// Integers written as whole floats (`20.0`) are accepted and normalized.
    fn coerce(&self, value: &Value) -> Option<Value> {
        match self {
            Self::String => value.is_string().then(|| value.clone()),
            Self::Integer => {
                if value.is_i64() {
                    Some(value.clone())
                } else if value.is_u64() {
                    // Above i64::MAX
                    None
                } else {
                    value
                        .as_f64()
                        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                        .map(|f| Value::from(f as i64))
                }
            }
            Self::Number => value.is_number().then(|| value.clone()),
            Self::Boolean => value.is_boolean().then(|| value.clone()),
            Self::StringArray => value
                .as_array()
                .filter(|items| items.iter().all(Value::is_string))
                .map(|_| value.clone()),
            Self::Object => value.is_object().then(|| value.clone()),
        }
    }
}

/// Declarative description of one operation parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub default: Option<Value>,
    /// Enum constraint, only meaningful for `ParamKind::String`
    pub allowed_values: Option<&'static [&'static str]>,
    /// Reject empty or whitespace-only strings
    pub non_empty: bool,
    pub description: &'static str,
}

impl ParameterSpec {
    pub fn required(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            allowed_values: None,
            non_empty: false,
            description,
        }
    }

    pub fn optional(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind, description)
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed_values = Some(allowed);
        self
    }

    /// Require a non-blank string, e.g. an id used as a path segment.
    pub fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    /// Check the spec's own invariants. Returns the reason on failure.
    pub(crate) fn check(&self) -> Result<(), String> {
        if self.required && self.default.is_some() {
            return Err("required parameters cannot have a default".to_string());
        }
        if self.allowed_values.is_some() && self.kind != ParamKind::String {
            return Err("allowed values only apply to string parameters".to_string());
        }
        if self.non_empty && self.kind != ParamKind::String {
            return Err("non-empty only applies to string parameters".to_string());
        }
        if let Some(default) = &self.default {
            if self.kind.coerce(default).is_none() {
                return Err(format!("default does not match kind {}", self.kind.json_type()));
            }
            if let (Some(allowed), Some(s)) = (self.allowed_values, default.as_str()) {
                if !allowed.contains(&s) {
                    return Err(format!("default {:?} is not an allowed value", s));
                }
            }
        }
        Ok(())
    }

    fn validate_value(&self, value: &Value) -> Result<Value, ValidationError> {
        let value = self
            .kind
            .coerce(value)
            .ok_or_else(|| ValidationError::InvalidType {
                param: self.name.to_string(),
                expected: self.kind.describe().to_string(),
            })?;

        if self.non_empty && value.as_str().is_some_and(|s| s.trim().is_empty()) {
            return Err(ValidationError::Empty(self.name.to_string()));
        }

        if let (Some(allowed), Some(s)) = (self.allowed_values, value.as_str()) {
            if !allowed.contains(&s) {
                return Err(ValidationError::NotAllowed {
                    param: self.name.to_string(),
                    value: s.to_string(),
                    allowed: allowed.join(", "),
                });
            }
        }

        Ok(value)
    }
}

/// Validate loosely-typed arguments against a parameter list.
///
/// `null` arguments count as an empty object and `null` values count as
/// absent. Defaults fill missing optional parameters. Undeclared keys are
/// dropped.
pub fn validate_arguments(
    parameters: &[ParameterSpec],
    arguments: &Value,
) -> Result<Arguments, ValidationError> {
    let empty = Map::new();
    let supplied = match arguments {
        Value::Object(map) => map,
        Value::Null => &empty,
        _ => return Err(ValidationError::NotAnObject),
    };

    let mut values = Map::new();
    for spec in parameters {
        match supplied.get(spec.name).filter(|v| !v.is_null()) {
            Some(value) => {
                values.insert(spec.name.to_string(), spec.validate_value(value)?);
            }
            None if spec.required => {
                return Err(ValidationError::MissingParameter(spec.name.to_string()));
            }
            None => {
                if let Some(default) = &spec.default {
                    values.insert(spec.name.to_string(), default.clone());
                }
            }
        }
    }

    for key in supplied.keys() {
        if !parameters.iter().any(|spec| spec.name == key) {
            tracing::debug!("Ignoring undeclared argument: {}", key);
        }
    }

    Ok(Arguments { values })
}

/// Arguments that passed validation, with defaults applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: Map<String, Value>,
}

impl Arguments {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// String value, skipping empty strings.
    pub fn non_empty_str(&self, name: &str) -> Option<&str> {
        self.str(name).filter(|s| !s.is_empty())
    }

    /// String value of a required parameter.
    pub fn require_str(&self, name: &str) -> Result<&str, ValidationError> {
        self.str(name)
            .ok_or_else(|| ValidationError::MissingParameter(name.to_string()))
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    pub fn string_list(&self, name: &str) -> Option<Vec<&str>> {
        self.get(name)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
    }

    pub fn object(&self, name: &str) -> Option<&Map<String, Value>> {
        self.get(name).and_then(Value::as_object)
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.values
    }
}
