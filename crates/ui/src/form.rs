//! Record form state machine
//!
//! [`RecordFormState`] is the headless core of the CRUD dialog: it owns
//! the bound field values, the pending action descriptor, the per-field
//! error annotations, and the phase of the
//! `Closed → Loading → Open → Submitting` cycle. The Dioxus component
//! around it only renders this state and forwards events.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::OnceLock;

use opsdeck_client::{FilePart, MultipartBody, RequestBody};
use opsdeck_core::{
    is_checked_value, json_to_text, ActionDescriptor, FieldKind, FieldRole, FormSchema,
    RecordMap, ValidationErrorSet,
};

// ============================================================================
// Field Values
// ============================================================================

/// The value a bound field currently holds
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    /// Text-like inputs (text, email, password, number, textarea, select)
    Text(String),
    /// Checkbox state
    Checked(bool),
    /// Picked file, if any
    File(Option<PathBuf>),
}

impl FormValue {
    /// Blank value for a field kind
    fn blank_for(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Checkbox => FormValue::Checked(false),
            FieldKind::File => FormValue::File(None),
            _ => FormValue::Text(String::new()),
        }
    }
}

// ============================================================================
// Phases
// ============================================================================

/// Where in the open/populate/submit cycle the form is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Closed,
    /// Edit fetch in flight
    Loading,
    /// Accepting input
    Open,
    /// Submit in flight
    Submitting,
}

// ============================================================================
// RecordFormState
// ============================================================================

/// State of one record form interaction.
///
/// Everything here is scoped to a single modal cycle; `close` restores
/// the blank slate the next open starts from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordFormState {
    pub phase: FormPhase,
    values: BTreeMap<String, FormValue>,
    previews: BTreeMap<String, String>,
    errors: ValidationErrorSet,
    action: Option<ActionDescriptor>,
}

impl RecordFormState {
    /// Closed, blank state
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Opening
    // ------------------------------------------------------------------

    /// Open blank for creating a record. No fetch happens; the form is
    /// immediately interactive and will POST to the create endpoint.
    pub fn open_for_add(&mut self, schema: &FormSchema, create_url: impl Into<String>) {
        self.reset_fields(schema);
        self.action = Some(ActionDescriptor::add(create_url));
        self.phase = FormPhase::Open;
    }

    /// Open for editing: the form starts blank in the `Loading` phase
    /// while the record fetch is in flight, and will PUT/PATCH to the
    /// update endpoint.
    pub fn open_for_edit(&mut self, schema: &FormSchema, action: ActionDescriptor) {
        self.reset_fields(schema);
        self.action = Some(action);
        self.phase = FormPhase::Loading;
    }

    /// Open a blank auxiliary form submitting to a dedicated endpoint
    /// (change-password style); no fetch, no populate.
    pub fn open_for_secondary(&mut self, schema: &FormSchema, action: ActionDescriptor) {
        self.reset_fields(schema);
        self.action = Some(action);
        self.phase = FormPhase::Open;
    }

    /// Apply a fetched payload to the bound fields and reveal the form.
    ///
    /// Keys without a binding are ignored. Image-ish keys inject a
    /// preview, the `active` key drives its checkbox, everything else
    /// lands as text.
    pub fn populate(&mut self, schema: &FormSchema, payload: &RecordMap) {
        for (key, value) in payload {
            if !schema.binds(key) {
                continue;
            }
            match FieldRole::for_key(key) {
                FieldRole::ImagePreview => {
                    let url = json_to_text(value);
                    if !url.is_empty() {
                        self.previews.insert(key.clone(), url);
                    }
                }
                FieldRole::ActiveFlag => {
                    self.values
                        .insert(key.clone(), FormValue::Checked(is_checked_value(value)));
                }
                FieldRole::Plain => match self.values.get_mut(key) {
                    Some(FormValue::Checked(checked)) => *checked = is_checked_value(value),
                    Some(FormValue::File(_)) | None => {}
                    Some(FormValue::Text(text)) => *text = json_to_text(value),
                },
            }
        }
        self.phase = FormPhase::Open;
    }

    /// The fetch failed; reveal the blank form anyway so the user can
    /// retype or cancel.
    pub fn populate_failed(&mut self) {
        self.phase = FormPhase::Open;
    }

    // ------------------------------------------------------------------
    // Field access
    // ------------------------------------------------------------------

    /// Text value of a field (empty for non-text fields)
    pub fn text(&self, name: &str) -> &str {
        match self.values.get(name) {
            Some(FormValue::Text(text)) => text,
            _ => "",
        }
    }

    /// Checkbox state of a field
    pub fn checked(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(FormValue::Checked(true)))
    }

    /// Picked file of a file field
    pub fn file(&self, name: &str) -> Option<&PathBuf> {
        match self.values.get(name) {
            Some(FormValue::File(path)) => path.as_ref(),
            _ => None,
        }
    }

    /// Injected image preview for a field, if any
    pub fn preview(&self, name: &str) -> Option<&str> {
        self.previews.get(name).map(String::as_str)
    }

    /// The pending action descriptor, if the form is open
    pub fn action(&self) -> Option<&ActionDescriptor> {
        self.action.as_ref()
    }

    /// Error annotations for one field, in order
    pub fn field_errors(&self, name: &str) -> &[String] {
        self.errors.for_field(name)
    }

    /// Whether any error annotations are rendered
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        self.values
            .insert(name.to_string(), FormValue::Text(value.into()));
    }

    pub fn set_checked(&mut self, name: &str, checked: bool) {
        self.values
            .insert(name.to_string(), FormValue::Checked(checked));
    }

    /// Pick a file; a new pick replaces the server-side preview
    pub fn set_file(&mut self, name: &str, path: PathBuf) {
        self.previews.remove(name);
        self.values
            .insert(name.to_string(), FormValue::File(Some(path)));
    }

    // ------------------------------------------------------------------
    // Submitting
    // ------------------------------------------------------------------

    /// Client-side pre-checks mirroring what the server will reject
    /// anyway: required fields, email format, numeric format.
    pub fn client_validate(&self, schema: &FormSchema) -> ValidationErrorSet {
        let mut errors = ValidationErrorSet::new();
        for field in &schema.fields {
            match &field.kind {
                FieldKind::Checkbox => {}
                FieldKind::File => {
                    // an existing preview satisfies "required" on edit
                    if field.required
                        && self.file(&field.name).is_none()
                        && self.preview(&field.name).is_none()
                    {
                        errors.push(&field.name, "This field is required.");
                    }
                }
                kind => {
                    let text = self.text(&field.name);
                    if text.trim().is_empty() {
                        if field.required {
                            errors.push(&field.name, "This field is required.");
                        }
                        continue;
                    }
                    match kind {
                        FieldKind::Email if !is_email(text) => {
                            errors.push(&field.name, "Enter a valid email address.");
                        }
                        FieldKind::Number if text.trim().parse::<f64>().is_err() => {
                            errors.push(&field.name, "Enter a number.");
                        }
                        _ => {}
                    }
                }
            }
        }
        errors
    }

    /// Replace the rendered annotations (clear-then-append)
    pub fn set_field_errors(&mut self, errors: ValidationErrorSet) {
        self.errors = errors;
    }

    /// Start the submit: prior annotations are cleared before the
    /// request goes out. Returns the descriptor to issue, or `None`
    /// when the form is not in a submittable phase.
    pub fn begin_submit(&mut self) -> Option<ActionDescriptor> {
        if self.phase != FormPhase::Open {
            return None;
        }
        self.errors.clear();
        self.phase = FormPhase::Submitting;
        self.action.clone()
    }

    /// The submit came back with per-field errors: render them and keep
    /// the entered values so corrections need no re-entry.
    pub fn submit_failed(&mut self, errors: ValidationErrorSet) {
        self.errors = errors;
        self.phase = FormPhase::Open;
    }

    /// The submit failed without a field map (flat error / transport
    /// failure); the toast carries the message, the form stays open.
    pub fn submit_recovered(&mut self) {
        self.phase = FormPhase::Open;
    }

    /// Close the form. Blanks every field, removes injected previews,
    /// clears annotations, and discards the action descriptor, so the
    /// next open starts clean however this cycle ended.
    pub fn close(&mut self) {
        self.values.clear();
        self.previews.clear();
        self.errors.clear();
        self.action = None;
        self.phase = FormPhase::Closed;
    }

    /// Serialize the bound fields for the pending submit.
    ///
    /// Multipart exactly when the schema binds a file field; the
    /// logical method then travels as a `_method` override part on a
    /// POST. Without file fields the body is URL-encoded.
    pub fn serialize(&self, schema: &FormSchema) -> RequestBody {
        let mut fields = Vec::new();
        let mut files = Vec::new();

        for field in &schema.fields {
            match self.values.get(&field.name) {
                Some(FormValue::Text(text)) => {
                    fields.push((field.name.clone(), text.clone()));
                }
                Some(FormValue::Checked(checked)) => {
                    fields.push((
                        field.name.clone(),
                        if *checked { "1" } else { "0" }.to_string(),
                    ));
                }
                Some(FormValue::File(Some(path))) => {
                    files.push(FilePart {
                        name: field.name.clone(),
                        path: path.clone(),
                    });
                }
                Some(FormValue::File(None)) | None => {}
            }
        }

        if schema.has_file_field() {
            RequestBody::Multipart(MultipartBody {
                fields,
                files,
                method_override: self.action.as_ref().map(|a| a.method),
            })
        } else {
            RequestBody::Form(fields)
        }
    }

    fn reset_fields(&mut self, schema: &FormSchema) {
        self.values = schema
            .fields
            .iter()
            .map(|f| (f.name.clone(), FormValue::blank_for(&f.kind)))
            .collect();
        self.previews.clear();
        self.errors.clear();
        self.action = None;
    }
}

fn is_email(text: &str) -> bool {
    static EMAIL_RE: OnceLock<regex::Regex> = OnceLock::new();
    let re = EMAIL_RE
        .get_or_init(|| regex::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"));
    re.is_match(text.trim())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use opsdeck_core::{ActionKind, FieldSpec, HttpMethod};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn user_schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec::new("name", "Name", FieldKind::Text).required(),
            FieldSpec::new("email", "Email", FieldKind::Email),
            FieldSpec::new("active", "Active", FieldKind::Checkbox),
        ])
    }

    fn avatar_schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec::new("name", "Name", FieldKind::Text),
            FieldSpec::new("avatar", "Avatar", FieldKind::File),
        ])
    }

    fn payload(pairs: &[(&str, serde_json::Value)]) -> RecordMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_add_opens_blank_with_post_descriptor() {
        let mut form = RecordFormState::new();
        form.open_for_add(&user_schema(), "/panel/users/create/");

        assert_eq!(form.phase, FormPhase::Open);
        let action = form.action().unwrap();
        assert_eq!(action.method, HttpMethod::Post);
        assert_eq!(action.kind, ActionKind::Add);
        assert_eq!(form.text("name"), "");
        assert!(!form.checked("active"));
        assert!(!form.has_errors());
    }

    #[test]
    fn test_edit_populates_per_field_rules() {
        // GET /users/5 → {status:200, data:{name:"Ana", active:1}}
        let mut form = RecordFormState::new();
        let schema = user_schema();
        form.open_for_edit(
            &schema,
            ActionDescriptor::update("/panel/users/5/update/", HttpMethod::Put),
        );
        assert_eq!(form.phase, FormPhase::Loading);

        form.populate(
            &schema,
            &payload(&[("name", json!("Ana")), ("active", json!(1))]),
        );

        assert_eq!(form.phase, FormPhase::Open);
        assert_eq!(form.text("name"), "Ana");
        assert!(form.checked("active"));
        let action = form.action().unwrap();
        assert_eq!(action.method, HttpMethod::Put);
        assert_eq!(action.kind, ActionKind::Update);
    }

    #[test]
    fn test_populate_ignores_unknown_keys() {
        let mut form = RecordFormState::new();
        let schema = user_schema();
        form.open_for_add(&schema, "/panel/users/create/");
        form.populate(
            &schema,
            &payload(&[("name", json!("Ana")), ("secret_field", json!("x"))]),
        );
        assert_eq!(form.text("name"), "Ana");
        assert_eq!(form.text("secret_field"), "");
    }

    #[test]
    fn test_populate_active_unchecked_for_zero() {
        let mut form = RecordFormState::new();
        let schema = user_schema();
        form.open_for_add(&schema, "/panel/users/create/");
        form.populate(&schema, &payload(&[("active", json!(0))]));
        assert!(!form.checked("active"));

        form.populate(&schema, &payload(&[("active", json!("1"))]));
        assert!(form.checked("active"));
    }

    #[test]
    fn test_populate_image_key_becomes_preview() {
        let mut form = RecordFormState::new();
        let schema = avatar_schema();
        form.open_for_add(&schema, "/panel/users/create/");
        form.populate(
            &schema,
            &payload(&[("avatar", json!("/media/avatars/ana.png"))]),
        );
        assert_eq!(form.preview("avatar"), Some("/media/avatars/ana.png"));
        // the file slot stays empty; nothing is re-uploaded on save
        assert!(form.file("avatar").is_none());
    }

    #[test]
    fn test_new_file_pick_replaces_preview() {
        let mut form = RecordFormState::new();
        let schema = avatar_schema();
        form.open_for_add(&schema, "/panel/users/create/");
        form.populate(&schema, &payload(&[("avatar", json!("/media/a.png"))]));

        form.set_file("avatar", PathBuf::from("/tmp/new.png"));
        assert!(form.preview("avatar").is_none());
        assert!(form.file("avatar").is_some());
    }

    #[test]
    fn test_serialize_url_encoded_without_file_fields() {
        let mut form = RecordFormState::new();
        let schema = user_schema();
        form.open_for_add(&schema, "/panel/users/create/");
        form.set_text("name", "Ana");
        form.set_checked("active", true);

        match form.serialize(&schema) {
            RequestBody::Form(pairs) => {
                assert!(pairs.contains(&("name".to_string(), "Ana".to_string())));
                assert!(pairs.contains(&("active".to_string(), "1".to_string())));
                assert!(pairs.contains(&("email".to_string(), String::new())));
            }
            other => panic!("expected url-encoded body, got {other:?}"),
        }
    }

    #[test]
    fn test_serialize_multipart_with_file_field() {
        let mut form = RecordFormState::new();
        let schema = avatar_schema();
        form.open_for_edit(
            &schema,
            ActionDescriptor::update("/panel/users/5/update/", HttpMethod::Put),
        );
        form.set_text("name", "Ana");
        form.set_file("avatar", PathBuf::from("/tmp/new.png"));

        match form.serialize(&schema) {
            RequestBody::Multipart(body) => {
                assert_eq!(body.method_override, Some(HttpMethod::Put));
                assert_eq!(body.files.len(), 1);
                assert_eq!(body.files[0].name, "avatar");
                assert!(body
                    .fields
                    .contains(&("name".to_string(), "Ana".to_string())));
            }
            other => panic!("expected multipart body, got {other:?}"),
        }
    }

    #[test]
    fn test_serialize_multipart_without_picked_file() {
        // schema has a file field but nothing was picked: still multipart,
        // just with no file part
        let mut form = RecordFormState::new();
        let schema = avatar_schema();
        form.open_for_add(&schema, "/panel/users/create/");

        match form.serialize(&schema) {
            RequestBody::Multipart(body) => assert!(body.files.is_empty()),
            other => panic!("expected multipart body, got {other:?}"),
        }
    }

    #[test]
    fn test_submit_cycle_with_field_errors() {
        // PUT returns {errors:{name:["required"]}} → one annotation under
        // name, form stays open with values intact
        let mut form = RecordFormState::new();
        let schema = user_schema();
        form.open_for_edit(
            &schema,
            ActionDescriptor::update("/panel/users/5/update/", HttpMethod::Put),
        );
        form.populate(&schema, &payload(&[("name", json!("Ana"))]));
        form.set_text("email", "ana@example.com");

        let action = form.begin_submit().unwrap();
        assert_eq!(form.phase, FormPhase::Submitting);
        assert_eq!(action.method, HttpMethod::Put);

        let mut errors = ValidationErrorSet::new();
        errors.push("name", "required");
        form.submit_failed(errors);

        assert_eq!(form.phase, FormPhase::Open);
        assert_eq!(form.field_errors("name"), &["required"]);
        assert_eq!(form.field_errors("name").len(), 1);
        // user-entered values survive
        assert_eq!(form.text("email"), "ana@example.com");
    }

    #[test]
    fn test_begin_submit_clears_prior_annotations() {
        let mut form = RecordFormState::new();
        let schema = user_schema();
        form.open_for_add(&schema, "/panel/users/create/");

        let mut errors = ValidationErrorSet::new();
        errors.push("name", "required");
        form.set_field_errors(errors);
        assert!(form.has_errors());

        form.begin_submit();
        assert!(!form.has_errors());
    }

    #[test]
    fn test_begin_submit_only_from_open() {
        let mut form = RecordFormState::new();
        assert!(form.begin_submit().is_none());

        let schema = user_schema();
        form.open_for_edit(
            &schema,
            ActionDescriptor::update("/panel/users/5/update/", HttpMethod::Patch),
        );
        // still loading, not submittable
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn test_close_restores_blank_slate() {
        let mut form = RecordFormState::new();
        let schema = avatar_schema();
        form.open_for_edit(
            &schema,
            ActionDescriptor::update("/panel/users/5/update/", HttpMethod::Put),
        );
        form.populate(
            &schema,
            &payload(&[("name", json!("Ana")), ("avatar", json!("/media/a.png"))]),
        );
        let mut errors = ValidationErrorSet::new();
        errors.push("name", "required");
        form.set_field_errors(errors);

        form.close();
        assert_eq!(form.phase, FormPhase::Closed);
        assert!(form.action().is_none());

        // reopening for add starts clean: blank fields, no previews,
        // zero annotations
        form.open_for_add(&schema, "/panel/users/create/");
        assert_eq!(form.text("name"), "");
        assert!(form.preview("avatar").is_none());
        assert!(!form.has_errors());
    }

    #[test]
    fn test_client_validate() {
        let mut form = RecordFormState::new();
        let schema = user_schema();
        form.open_for_add(&schema, "/panel/users/create/");

        let errors = form.client_validate(&schema);
        assert_eq!(errors.for_field("name"), &["This field is required."]);
        // email is optional and empty: no message
        assert!(errors.for_field("email").is_empty());

        form.set_text("name", "Ana");
        form.set_text("email", "not-an-email");
        let errors = form.client_validate(&schema);
        assert!(errors.for_field("name").is_empty());
        assert_eq!(errors.for_field("email"), &["Enter a valid email address."]);

        form.set_text("email", "ana@example.com");
        assert!(form.client_validate(&schema).is_empty());
    }

    #[test]
    fn test_client_validate_required_file_satisfied_by_preview() {
        let schema = FormSchema::new(vec![
            FieldSpec::new("avatar", "Avatar", FieldKind::File).required()
        ]);
        let mut form = RecordFormState::new();
        form.open_for_add(&schema, "/panel/users/create/");
        assert!(!form.client_validate(&schema).is_empty());

        form.populate(&schema, &payload(&[("avatar", json!("/media/a.png"))]));
        assert!(form.client_validate(&schema).is_empty());
    }

    #[test]
    fn test_is_email() {
        assert!(is_email("ana@example.com"));
        assert!(is_email("  ana@example.com  "));
        assert!(!is_email("ana"));
        assert!(!is_email("ana@example"));
        assert!(!is_email("ana @example.com"));
    }
}
