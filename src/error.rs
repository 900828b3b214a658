//! Error types for the CRM LLM tools.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Every error that can reach an agent exposes a stable `kind()` string.

use thiserror::Error;

/// Errors that can occur when talking to the CRM backend.
#[derive(Error, Debug)]
pub enum CrmApiError {
    /// Backend answered with a non-2xx status
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Response parsed but did not have the expected shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl CrmApiError {
    /// HTTP status code, when the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised when caller-supplied arguments violate a parameter spec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required parameter was not supplied
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// A parameter had the wrong JSON type
    #[error("Invalid type for parameter {param}: expected {expected}")]
    InvalidType { param: String, expected: String },

    /// A string parameter was outside its enum
    #[error("Invalid value for parameter {param}: {value:?} (allowed: {allowed})")]
    NotAllowed {
        param: String,
        value: String,
        allowed: String,
    },

    /// A string parameter that must carry a value was blank
    #[error("Parameter {0} must not be empty")]
    Empty(String),

    /// The argument payload itself was not a JSON object
    #[error("Arguments must be a JSON object")]
    NotAnObject,
}

impl ValidationError {
    /// Name of the offending parameter, if the error concerns one.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::MissingParameter(param)
            | Self::Empty(param)
            | Self::InvalidType { param, .. }
            | Self::NotAllowed { param, .. } => Some(param),
            Self::NotAnObject => None,
        }
    }
}

/// Errors that can occur while building the operation catalog.
///
/// These are programming errors and surface when the toolkit is constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two operations were registered under the same name
    #[error("Operation registered twice: {0}")]
    DuplicateOperation(String),

    /// A parameter spec breaks one of its invariants
    #[error("Invalid parameter spec {operation}.{param}: {reason}")]
    InvalidParameter {
        operation: String,
        param: String,
        reason: String,
    },
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Top-level error returned by the toolkit and dispatcher.
#[derive(Error, Debug)]
pub enum ToolkitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Backend(#[from] CrmApiError),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Integration not available: {0}")]
    IntegrationUnavailable(String),

    /// Typed input or result could not be converted to JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ToolkitError {
    /// Stable machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::Backend(_) => "BackendError",
            Self::UnknownOperation(_) => "UnknownOperation",
            Self::IntegrationUnavailable(_) => "IntegrationUnavailable",
            Self::Serialization(_) => "SerializationError",
            Self::Catalog(_) => "CatalogError",
            Self::Config(_) => "ConfigError",
        }
    }

    /// HTTP status of the underlying backend failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Backend(e) => e.status(),
            _ => None,
        }
    }
}

/// Convenience type alias for Results with CrmApiError
pub type CrmApiResult<T> = Result<T, CrmApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with ToolkitError
pub type ToolkitResult<T> = Result<T, ToolkitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValidationError::MissingParameter("contact_id".to_string());
        assert_eq!(err.to_string(), "Missing required parameter: contact_id");

        let err = ConfigError::InvalidValue {
            var: "CRM_API_URL".to_string(),
            reason: "Must start with http:// or https://".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for CRM_API_URL: Must start with http:// or https://"
        );

        let err = CatalogError::DuplicateOperation("get_contact".to_string());
        assert_eq!(err.to_string(), "Operation registered twice: get_contact");
    }

    #[test]
    fn test_api_error_variants() {
        let err = CrmApiError::ApiError {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("boom"));
        assert_eq!(err.status(), Some(500));
        assert_eq!(CrmApiError::Timeout.status(), None);
    }

    #[test]
    fn test_toolkit_error_kinds() {
        let err: ToolkitError = ValidationError::NotAnObject.into();
        assert_eq!(err.kind(), "ValidationError");

        let err: ToolkitError = CrmApiError::Timeout.into();
        assert_eq!(err.kind(), "BackendError");

        let err = ToolkitError::UnknownOperation("nope".to_string());
        assert_eq!(err.kind(), "UnknownOperation");
        assert_eq!(err.to_string(), "Unknown operation: nope");

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ToolkitError = json_err.into();
        assert_eq!(err.kind(), "SerializationError");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_validation_error_parameter() {
        let err = ValidationError::NotAllowed {
            param: "status".to_string(),
            value: "vip".to_string(),
            allowed: "lead, customer".to_string(),
        };
        assert_eq!(err.parameter(), Some("status"));
        assert_eq!(ValidationError::NotAnObject.parameter(), None);
        assert_eq!(
            ValidationError::Empty("contact_id".to_string()).parameter(),
            Some("contact_id")
        );
    }
}
