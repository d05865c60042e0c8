//! Field, form, and record types for Opsdeck
//!
//! This module defines the data model shared by the HTTP layer and the UI:
//! HTTP methods, form field schemas, action descriptors for pending
//! mutations, record payloads received from the server, and the
//! validation-error map rendered under form fields.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Records
// ============================================================================

/// A record payload as received from the server: field name to JSON value.
///
/// Unknown keys are tolerated everywhere a `RecordMap` is consumed; only
/// keys matching a bound field are applied to a form.
pub type RecordMap = serde_json::Map<String, serde_json::Value>;

/// Render a JSON value the way it should appear in a text input or a
/// grid cell. Strings pass through unquoted, scalars are stringified,
/// null and composites collapse to an empty string.
pub fn json_to_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => {
            if *b {
                "1".to_string()
            } else {
                "0".to_string()
            }
        }
        _ => String::new(),
    }
}

/// Whether a JSON value counts as the "on" state for a status checkbox.
///
/// The server encodes active flags as `1`; loosely-typed backends also
/// send `"1"` or `true` for the same flag.
pub fn is_checked_value(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Number(n) => n.as_i64() == Some(1) || n.as_f64() == Some(1.0),
        serde_json::Value::String(s) => s == "1",
        serde_json::Value::Bool(b) => *b,
        _ => false,
    }
}

// ============================================================================
// HTTP Methods
// ============================================================================

/// HTTP methods the console issues against the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Uppercase wire name of the method
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Safe methods never receive a CSRF token header
    pub fn is_safe(&self) -> bool {
        matches!(self, HttpMethod::Get)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Action Descriptors
// ============================================================================

/// What kind of mutation a pending form submit performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Create a new record
    Add,
    /// Update an existing record
    Update,
}

/// Ephemeral description of the mutation a form will issue on save.
///
/// Created when a trigger is activated, consumed at submit time, and
/// discarded when the form closes.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDescriptor {
    /// Target endpoint for the submit
    pub url: String,
    /// HTTP method for the submit
    pub method: HttpMethod,
    /// Whether this is an add or an update
    pub kind: ActionKind,
}

impl ActionDescriptor {
    /// Descriptor for creating a new record (always POST)
    pub fn add(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Post,
            kind: ActionKind::Add,
        }
    }

    /// Descriptor for updating an existing record (PUT or PATCH)
    pub fn update(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            kind: ActionKind::Update,
        }
    }

    /// Default success message when the server reply carries none
    pub fn default_success_message(&self) -> &'static str {
        match self.kind {
            ActionKind::Add => "Added successfully",
            ActionKind::Update => "Updated successfully",
        }
    }
}

// ============================================================================
// Field Schemas
// ============================================================================

/// One choice of a select field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectChoice {
    pub value: String,
    pub label: String,
}

impl SelectChoice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The input widget a bound field renders as
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Single-line text input
    Text,
    /// Text input with email format pre-check
    Email,
    /// Masked text input
    Password,
    /// Numeric text input
    Number,
    /// Multi-line text input
    TextArea,
    /// Boolean checkbox, serialized as "1"/"0"
    Checkbox,
    /// Native file picker, forces multipart submits
    File,
    /// Dropdown with fixed choices
    Select(Vec<SelectChoice>),
}

/// A form binding: one field of a resource form, keyed by the payload
/// name the server uses for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Payload key, unique within a schema
    pub name: String,
    /// Human-readable label
    pub label: String,
    /// Input widget
    pub kind: FieldKind,
    /// Whether the field must be non-empty before submit
    pub required: bool,
}

impl FieldSpec {
    /// Create a field spec
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
        }
    }

    /// Mark the field required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// An ordered collection of field specs describing one resource form.
///
/// Key order is irrelevant for payload application; it only fixes the
/// rendering order of the form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormSchema {
    pub fields: Vec<FieldSpec>,
}

impl FormSchema {
    /// Create a schema from a list of fields
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Look up a field by payload key
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether the schema binds the given key
    pub fn binds(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Whether any bound field is a file input.
    ///
    /// Submits switch to multipart encoding exactly when this is true.
    pub fn has_file_field(&self) -> bool {
        self.fields.iter().any(|f| matches!(f.kind, FieldKind::File))
    }
}

impl crate::traits::Validatable for FormSchema {
    fn validate(&self) -> crate::error::ConsoleResult<()> {
        let mut seen = std::collections::HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(crate::error::ConsoleError::validation(
                    "Field name cannot be empty",
                ));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(crate::error::ConsoleError::validation(format!(
                    "Duplicate field name: '{}'",
                    field.name
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Field Roles
// ============================================================================

/// How an incoming payload value is applied to its bound field.
///
/// Most keys are plain values; two classes get special rendering:
/// `active` drives a checkbox, and image-ish keys inject an inline
/// preview instead of a text value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// Apply the value as text
    Plain,
    /// Check the bound checkbox iff the value equals 1
    ActiveFlag,
    /// Render the value as an inline image preview
    ImagePreview,
}

impl FieldRole {
    /// Classify a payload key
    pub fn for_key(name: &str) -> Self {
        const IMAGE_MARKERS: [&str; 4] = ["image", "logo", "cover", "avatar"];
        if IMAGE_MARKERS.iter().any(|m| name.contains(m)) {
            FieldRole::ImagePreview
        } else if name == "active" {
            FieldRole::ActiveFlag
        } else {
            FieldRole::Plain
        }
    }
}

// ============================================================================
// Validation Errors
// ============================================================================

/// Per-field validation messages from a failed submit.
///
/// Messages keep their server order under each field. The set is cleared
/// at the next form open or submit attempt, never accumulated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationErrorSet {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrorSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a field → messages map
    pub fn from_map(map: BTreeMap<String, Vec<String>>) -> Self {
        Self { errors: map }
    }

    /// Append one message under a field
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_default().push(message.into());
    }

    /// Messages for one field, in server order
    pub fn for_field(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether no messages are present
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total message count across all fields
    pub fn message_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// Remove all messages
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Iterate fields and their messages
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.errors.iter()
    }
}

// ============================================================================
// Grid Ordering
// ============================================================================

/// Sort direction for a grid column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderDir {
    Asc,
    Desc,
}

impl OrderDir {
    /// Wire name used in list-endpoint query params
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderDir::Asc => "asc",
            OrderDir::Desc => "desc",
        }
    }

    /// The opposite direction
    pub fn flipped(&self) -> Self {
        match self {
            OrderDir::Asc => OrderDir::Desc,
            OrderDir::Desc => OrderDir::Asc,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Validatable;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_json_to_text() {
        assert_eq!(json_to_text(&json!("Ana")), "Ana");
        assert_eq!(json_to_text(&json!(42)), "42");
        assert_eq!(json_to_text(&json!(true)), "1");
        assert_eq!(json_to_text(&json!(false)), "0");
        assert_eq!(json_to_text(&json!(null)), "");
        assert_eq!(json_to_text(&json!({"a": 1})), "");
    }

    #[test]
    fn test_is_checked_value() {
        assert!(is_checked_value(&json!(1)));
        assert!(is_checked_value(&json!("1")));
        assert!(is_checked_value(&json!(true)));
        assert!(!is_checked_value(&json!(0)));
        assert!(!is_checked_value(&json!("0")));
        assert!(!is_checked_value(&json!(false)));
        assert!(!is_checked_value(&json!(2)));
        assert!(!is_checked_value(&json!(null)));
    }

    #[test]
    fn test_http_method() {
        assert_eq!(HttpMethod::Patch.as_str(), "PATCH");
        assert!(HttpMethod::Get.is_safe());
        assert!(!HttpMethod::Post.is_safe());
        assert!(!HttpMethod::Delete.is_safe());
    }

    #[test]
    fn test_action_descriptor_add_is_post() {
        let action = ActionDescriptor::add("/panel/users/create/");
        assert_eq!(action.method, HttpMethod::Post);
        assert_eq!(action.kind, ActionKind::Add);
        assert_eq!(action.default_success_message(), "Added successfully");
    }

    #[test]
    fn test_action_descriptor_update() {
        let action = ActionDescriptor::update("/panel/users/5/update/", HttpMethod::Put);
        assert_eq!(action.method, HttpMethod::Put);
        assert_eq!(action.kind, ActionKind::Update);
        assert_eq!(action.default_success_message(), "Updated successfully");
    }

    #[test]
    fn test_field_role_classification() {
        assert_eq!(FieldRole::for_key("name"), FieldRole::Plain);
        assert_eq!(FieldRole::for_key("active"), FieldRole::ActiveFlag);
        assert_eq!(FieldRole::for_key("image"), FieldRole::ImagePreview);
        assert_eq!(FieldRole::for_key("site_logo"), FieldRole::ImagePreview);
        assert_eq!(FieldRole::for_key("cover_photo"), FieldRole::ImagePreview);
        assert_eq!(FieldRole::for_key("avatar"), FieldRole::ImagePreview);
        // "active" embedded in a longer key is not the status flag
        assert_eq!(FieldRole::for_key("activestreak"), FieldRole::Plain);
    }

    #[test]
    fn test_schema_lookup_and_file_detection() {
        let schema = FormSchema::new(vec![
            FieldSpec::new("name", "Name", FieldKind::Text).required(),
            FieldSpec::new("active", "Active", FieldKind::Checkbox),
        ]);
        assert!(schema.binds("name"));
        assert!(!schema.binds("unknown"));
        assert!(!schema.has_file_field());

        let schema = FormSchema::new(vec![
            FieldSpec::new("name", "Name", FieldKind::Text),
            FieldSpec::new("avatar", "Avatar", FieldKind::File),
        ]);
        assert!(schema.has_file_field());
    }

    #[test]
    fn test_schema_validation_rejects_duplicates() {
        let schema = FormSchema::new(vec![
            FieldSpec::new("name", "Name", FieldKind::Text),
            FieldSpec::new("name", "Name again", FieldKind::Text),
        ]);
        assert!(!schema.is_valid());

        let schema = FormSchema::new(vec![FieldSpec::new("", "Blank", FieldKind::Text)]);
        assert!(!schema.is_valid());

        let schema = FormSchema::new(vec![FieldSpec::new("name", "Name", FieldKind::Text)]);
        assert!(schema.is_valid());
    }

    #[test]
    fn test_validation_error_set() {
        let mut set = ValidationErrorSet::new();
        assert!(set.is_empty());

        set.push("name", "required");
        set.push("name", "too short");
        set.push("email", "invalid");

        assert_eq!(set.for_field("name"), &["required", "too short"]);
        assert_eq!(set.for_field("email"), &["invalid"]);
        assert!(set.for_field("unknown").is_empty());
        assert_eq!(set.message_count(), 3);

        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.message_count(), 0);
    }

    #[test]
    fn test_order_dir() {
        assert_eq!(OrderDir::Asc.as_str(), "asc");
        assert_eq!(OrderDir::Desc.flipped(), OrderDir::Asc);
    }
}
