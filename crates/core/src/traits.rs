//! Core traits for Opsdeck
//!
//! The console keeps one trait at its seams: everything that carries
//! user- or operator-supplied structure (form schemas, route sets,
//! resource and app configuration) can check its own consistency
//! before it is wired into the UI.

use crate::error::ConsoleResult;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
///
/// # Example
///
/// ```rust,ignore
/// use opsdeck_core::{Validatable, ConsoleResult, ConsoleError};
///
/// struct ServerEndpoint {
///     base_url: String,
/// }
///
/// impl Validatable for ServerEndpoint {
///     fn validate(&self) -> ConsoleResult<()> {
///         if !self.base_url.starts_with("http") {
///             return Err(ConsoleError::config("base_url must start with http"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `ConsoleError` describing the problem.
    fn validate(&self) -> ConsoleResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct TestValidatable {
        valid: bool,
    }

    impl Validatable for TestValidatable {
        fn validate(&self) -> ConsoleResult<()> {
            if self.valid {
                Ok(())
            } else {
                Err(crate::error::ConsoleError::validation("Invalid state"))
            }
        }
    }

    #[test]
    fn test_validatable_trait() {
        let valid = TestValidatable { valid: true };
        assert!(valid.is_valid());
        assert!(valid.validation_errors().is_empty());

        let invalid = TestValidatable { valid: false };
        assert!(!invalid.is_valid());
        assert_eq!(
            invalid.validation_errors(),
            vec!["Validation error: Invalid state".to_string()]
        );
    }
}
