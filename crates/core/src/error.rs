//! Error types for Opsdeck
//!
//! This module provides unified error handling across the console,
//! including schema validation errors, route errors, configuration
//! errors, and serialization errors.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Opsdeck
#[derive(Debug, Error)]
pub enum ConsoleError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Field validation failed
    #[error("Field validation failed for '{field}': {message}")]
    FieldValidation { field: String, message: String },

    /// Form schema validation failed
    #[error("Schema validation failed for '{schema}': {message}")]
    SchemaValidation { schema: String, message: String },

    // ========================================================================
    // Route Errors
    // ========================================================================
    /// A route template is malformed or missing a required placeholder
    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    /// Resource not found in the configured resource set
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// An operation was requested that the resource does not configure
    #[error("Operation '{operation}' is not configured for resource '{resource}'")]
    OperationNotConfigured { resource: String, operation: String },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read
    #[error("Failed to read config '{path}': {message}")]
    ConfigRead { path: PathBuf, message: String },

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    // ========================================================================
    // IO / Serialization Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl ConsoleError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        ConsoleError::Validation(msg.into())
    }

    /// Create a field validation error
    pub fn field_validation(field: impl Into<String>, msg: impl Into<String>) -> Self {
        ConsoleError::FieldValidation {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create a schema validation error
    pub fn schema_validation(schema: impl Into<String>, msg: impl Into<String>) -> Self {
        ConsoleError::SchemaValidation {
            schema: schema.into(),
            message: msg.into(),
        }
    }

    /// Create an invalid-route error
    pub fn invalid_route(msg: impl Into<String>) -> Self {
        ConsoleError::InvalidRoute(msg.into())
    }

    /// Create an invalid-config error
    pub fn config(msg: impl Into<String>) -> Self {
        ConsoleError::InvalidConfig(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        ConsoleError::Internal(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        ConsoleError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ConsoleError::Validation(_)
                | ConsoleError::FieldValidation { .. }
                | ConsoleError::SchemaValidation { .. }
        )
    }

    /// Check if this error is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            ConsoleError::InvalidConfig(_)
                | ConsoleError::ConfigRead { .. }
                | ConsoleError::ConfigParse(_)
                | ConsoleError::ConfigSerialize(_)
        )
    }

    /// Check if this error is a route error
    pub fn is_route(&self) -> bool {
        matches!(
            self,
            ConsoleError::InvalidRoute(_)
                | ConsoleError::ResourceNotFound(_)
                | ConsoleError::OperationNotConfigured { .. }
        )
    }
}

/// Result type alias using ConsoleError
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> ConsoleResult<T>;
}

impl<T, E: Into<ConsoleError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> ConsoleResult<T> {
        self.map_err(|e| {
            let err: ConsoleError = e.into();
            ConsoleError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = ConsoleError::validation("Name is required");
        assert!(err.is_validation());
        assert!(!err.is_route());
        assert_eq!(err.to_string(), "Validation error: Name is required");
    }

    #[test]
    fn test_field_validation_error() {
        let err = ConsoleError::field_validation("email", "Invalid email format");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Field validation failed for 'email': Invalid email format"
        );
    }

    #[test]
    fn test_route_errors() {
        let err = ConsoleError::invalid_route("update route is missing {id}");
        assert!(err.is_route());
        assert!(!err.is_validation());

        let err = ConsoleError::OperationNotConfigured {
            resource: "categories".to_string(),
            operation: "restore".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Operation 'restore' is not configured for resource 'categories'"
        );
    }

    #[test]
    fn test_config_error() {
        let err = ConsoleError::config("server.base_url must start with http");
        assert!(err.is_config());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: server.base_url must start with http"
        );
    }

    #[test]
    fn test_error_with_context() {
        let err = ConsoleError::with_context("Loading config", "Permission denied");
        assert_eq!(err.to_string(), "Loading config: Permission denied");
    }

    #[test]
    fn test_result_ext() {
        let res: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        let err = res.with_context("Reading opsdeck.toml").unwrap_err();
        assert!(err.to_string().starts_with("Reading opsdeck.toml:"));
    }
}
