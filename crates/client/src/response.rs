//! Response normalization
//!
//! The backend is not consistent about its reply shapes: success text
//! arrives as `msg` or `message`, the validation map arrives as
//! `errors: {...}`, `errors: null`, or not at all, and fetch replies
//! wrap their record in `{status, data}`. All of that is normalized
//! here, at the client boundary, into one canonical [`ApiOutcome`] so
//! no caller ever inspects a raw body.

use std::collections::BTreeMap;

use serde::Deserialize;

use opsdeck_core::{RecordMap, ValidationErrorSet};

// ============================================================================
// Raw Wire Shape
// ============================================================================

/// Superset of every reply body the backend produces.
///
/// Each reply uses some subset of these keys; absent keys and explicit
/// nulls are equivalent.
#[derive(Debug, Default, Deserialize)]
struct RawReply {
    status: Option<u16>,
    success: Option<bool>,
    msg: Option<String>,
    message: Option<String>,
    errors: Option<BTreeMap<String, Vec<String>>>,
    data: Option<serde_json::Value>,
}

// ============================================================================
// Normalized Outcome
// ============================================================================

/// The canonical result of one request, regardless of reply shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiOutcome {
    /// Whether the request succeeded. HTTP 2xx is necessary but not
    /// sufficient; a body carrying `success: false` fails a 2xx reply.
    pub ok: bool,
    /// HTTP status code of the reply
    pub http_status: u16,
    /// Flat human-readable message, when the body carried one
    pub message: Option<String>,
    /// Per-field validation messages; empty on success and on flat errors
    pub field_errors: ValidationErrorSet,
    /// Record payload of a fetch reply (`data` object), when present
    pub data: Option<RecordMap>,
}

impl ApiOutcome {
    /// Normalize a reply body.
    ///
    /// Any body parses: an unparseable error body degrades to a flat
    /// generic failure instead of propagating a parse error, and an
    /// unparseable success body counts as success with no message.
    pub fn from_response(http_status: u16, body: &str) -> Self {
        let is_2xx = (200..300).contains(&http_status);

        let raw: RawReply = match serde_json::from_str(body) {
            Ok(raw) => raw,
            Err(_) if is_2xx => RawReply::default(),
            Err(_) => {
                return Self {
                    ok: false,
                    http_status,
                    message: Some(format!(
                        "The server returned an unexpected response (HTTP {http_status})"
                    )),
                    field_errors: ValidationErrorSet::new(),
                    data: None,
                };
            }
        };

        // message takes precedence over msg when a body carries both
        let message = raw.message.or(raw.msg);

        let field_errors = match raw.errors {
            Some(map) if !map.is_empty() => ValidationErrorSet::from_map(map),
            // `errors: null`, `errors: {}` and an absent key are the same
            _ => ValidationErrorSet::new(),
        };

        let data = match raw.data {
            Some(serde_json::Value::Object(map)) => Some(map),
            _ => None,
        };

        // Some replies mirror their status in the body; where present it
        // gates success the same way `success: false` does.
        let body_status_ok = raw.status.is_none_or(|s| (200..300).contains(&s));
        let ok = is_2xx && raw.success != Some(false) && body_status_ok;

        Self {
            ok,
            http_status,
            message,
            field_errors,
            data,
        }
    }

    /// Whether the reply carried per-field validation messages
    pub fn has_field_errors(&self) -> bool {
        !self.field_errors.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fetch_reply_with_data() {
        let outcome = ApiOutcome::from_response(
            200,
            r#"{"status": 200, "data": {"name": "Ana", "active": 1}}"#,
        );
        assert!(outcome.ok);
        assert_eq!(outcome.http_status, 200);
        let data = outcome.data.unwrap();
        assert_eq!(data.get("name").unwrap(), "Ana");
        assert_eq!(data.get("active").unwrap(), 1);
    }

    #[test]
    fn test_mutation_success_with_msg() {
        let outcome = ApiOutcome::from_response(200, r#"{"status": 200, "msg": "Deleted"}"#);
        assert!(outcome.ok);
        assert_eq!(outcome.message.as_deref(), Some("Deleted"));
        assert!(!outcome.has_field_errors());
    }

    #[test]
    fn test_mutation_success_with_message_alias() {
        let outcome =
            ApiOutcome::from_response(200, r#"{"success": true, "message": "User restored"}"#);
        assert!(outcome.ok);
        assert_eq!(outcome.message.as_deref(), Some("User restored"));
    }

    #[test]
    fn test_success_false_fails_a_2xx_reply() {
        let outcome =
            ApiOutcome::from_response(200, r#"{"success": false, "message": "No password provided"}"#);
        assert!(!outcome.ok);
        assert_eq!(outcome.message.as_deref(), Some("No password provided"));
    }

    #[test]
    fn test_validation_failure_with_error_map() {
        let outcome = ApiOutcome::from_response(
            422,
            r#"{"errors": {"name": ["required"], "email": ["invalid", "taken"]}}"#,
        );
        assert!(!outcome.ok);
        assert!(outcome.has_field_errors());
        assert_eq!(outcome.field_errors.for_field("name"), &["required"]);
        assert_eq!(outcome.field_errors.for_field("email"), &["invalid", "taken"]);
        assert_eq!(outcome.field_errors.message_count(), 3);
    }

    #[test]
    fn test_flat_error_with_null_error_map() {
        let outcome =
            ApiOutcome::from_response(400, r#"{"errors": null, "msg": "Something went wrong"}"#);
        assert!(!outcome.ok);
        assert!(!outcome.has_field_errors());
        assert_eq!(outcome.message.as_deref(), Some("Something went wrong"));
    }

    #[test]
    fn test_flat_error_with_omitted_error_map() {
        let outcome = ApiOutcome::from_response(400, r#"{"msg": "Bad request"}"#);
        assert!(!outcome.ok);
        assert!(!outcome.has_field_errors());
        assert_eq!(outcome.message.as_deref(), Some("Bad request"));
    }

    #[test]
    fn test_unparseable_error_body_degrades_to_flat_error() {
        let outcome = ApiOutcome::from_response(502, "<html>Bad Gateway</html>");
        assert!(!outcome.ok);
        assert!(!outcome.has_field_errors());
        assert_eq!(
            outcome.message.as_deref(),
            Some("The server returned an unexpected response (HTTP 502)")
        );
    }

    #[test]
    fn test_unparseable_success_body_counts_as_success() {
        let outcome = ApiOutcome::from_response(204, "");
        assert!(outcome.ok);
        assert!(outcome.message.is_none());
        assert!(outcome.data.is_none());
    }

    #[test]
    fn test_body_status_gates_success() {
        let outcome = ApiOutcome::from_response(200, r#"{"status": 500, "msg": "boom"}"#);
        assert!(!outcome.ok);
        assert_eq!(outcome.message.as_deref(), Some("boom"));
    }

    #[test]
    fn test_message_takes_precedence_over_msg() {
        let outcome =
            ApiOutcome::from_response(200, r#"{"msg": "short", "message": "long form"}"#);
        assert_eq!(outcome.message.as_deref(), Some("long form"));
    }

    #[test]
    fn test_non_object_data_is_dropped() {
        let outcome = ApiOutcome::from_response(200, r#"{"data": [1, 2, 3]}"#);
        assert!(outcome.ok);
        assert!(outcome.data.is_none());
    }
}
