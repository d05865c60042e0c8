//! # Record Form Dialog
//!
//! The generic CRUD modal: open → (fetch → populate) → submit →
//! (close + grid refresh | inline errors). One component serves every
//! resource; the schema decides which inputs render, and
//! [`RecordFormState`] owns the lifecycle.
//!
//! Closing by any path (save, cancel, ✕, backdrop) runs the reset, so
//! the next open always starts from a blank slate.

use std::sync::Arc;

use dioxus::prelude::*;

use opsdeck_client::{ApiClient, RequestBody};
use opsdeck_core::{ActionDescriptor, FieldKind, FieldSpec, HttpMethod, ResourceConfig};

use crate::components::inputs::{CheckboxInput, FileInput, SelectInput, TextArea, TextInput};
use crate::form::{FormPhase, RecordFormState};
use crate::grid::GridHandle;
use crate::state::{RecordFormMode, Toasts};

// ============================================================================
// Component Props
// ============================================================================

/// Properties for RecordFormDialog
#[derive(Props, Clone, PartialEq)]
pub struct RecordFormDialogProps {
    /// The resource being administered
    pub resource: ResourceConfig,

    /// How the dialog was opened
    pub mode: RecordFormMode,

    /// Fired after the dialog has reset itself, on every close path
    #[props(default)]
    pub on_close: EventHandler<()>,
}

// ============================================================================
// Main Component
// ============================================================================

/// Add/edit/secondary record form dialog
#[component]
pub fn RecordFormDialog(props: RecordFormDialogProps) -> Element {
    let api = use_context::<Arc<ApiClient>>();
    let grid = use_context::<GridHandle>();
    let toasts = use_context::<Toasts>();

    let mut form = use_signal(RecordFormState::new);

    // The secondary mode swaps in the auxiliary schema
    let schema = match props.mode {
        RecordFormMode::Secondary(_) => props
            .resource
            .secondary
            .as_ref()
            .map(|s| s.schema.clone())
            .unwrap_or_default(),
        _ => props.resource.schema.clone(),
    };

    let title = match props.mode {
        RecordFormMode::Add => format!("Add {}", props.resource.title),
        RecordFormMode::Edit(_) => format!("Edit {}", props.resource.title),
        RecordFormMode::Secondary(_) => props
            .resource
            .secondary
            .as_ref()
            .map(|s| s.title.clone())
            .unwrap_or_default(),
    };

    let save_label = match props.mode {
        RecordFormMode::Edit(_) => "Update",
        _ => "Save",
    };

    // Open (and fetch, for edits) on mount
    {
        let resource = props.resource.clone();
        let schema = schema.clone();
        let api = api.clone();
        let mode = props.mode;
        use_effect(move || match mode {
            RecordFormMode::Add => {
                form.write()
                    .open_for_add(&schema, resource.routes.create.as_str());
            }
            RecordFormMode::Edit(id) => {
                let action = ActionDescriptor::update(
                    resource.routes.update.with_id(id),
                    resource.routes.update_method,
                );
                form.write().open_for_edit(&schema, action);

                let fetch_url = resource.routes.fetch.with_id(id);
                let api = api.clone();
                let schema = schema.clone();
                let mut toasts = toasts;
                spawn(async move {
                    match api.fetch_record(&fetch_url).await {
                        Ok(outcome) if outcome.ok => match outcome.data {
                            Some(data) => form.write().populate(&schema, &data),
                            None => form.write().populate_failed(),
                        },
                        Ok(outcome) => {
                            toasts.error(
                                outcome
                                    .message
                                    .unwrap_or_else(|| "Failed to load record".to_string()),
                            );
                            form.write().populate_failed();
                        }
                        Err(e) => {
                            toasts.error(e.to_string());
                            form.write().populate_failed();
                        }
                    }
                });
            }
            RecordFormMode::Secondary(id) => {
                if let Some(secondary) = &resource.secondary {
                    let action = ActionDescriptor::update(
                        secondary.route.with_id(id),
                        secondary.method,
                    );
                    form.write().open_for_secondary(&secondary.schema, action);
                }
            }
        });
    }

    // Close: reset first, then tell the page
    let close = {
        let on_close = props.on_close;
        move |_| {
            form.write().close();
            on_close.call(());
        }
    };

    // Submit: pre-check, clear annotations, serialize, dispatch
    let submit = {
        let api = api.clone();
        let grid = grid.clone();
        let schema = schema.clone();
        let on_close = props.on_close;
        move |e: Event<FormData>| {
            e.prevent_default();

            let pre = form.read().client_validate(&schema);
            if !pre.is_empty() {
                form.write().set_field_errors(pre);
                return;
            }

            let Some(action) = form.write().begin_submit() else {
                return;
            };
            let body = form.read().serialize(&schema);
            // multipart tunnels the logical method through POST
            let wire_method = match &body {
                RequestBody::Multipart(_) => HttpMethod::Post,
                _ => action.method,
            };

            let api = api.clone();
            let grid = grid.clone();
            let mut toasts = toasts;
            spawn(async move {
                match api.request(wire_method, &action.url, body).await {
                    Ok(outcome) if outcome.ok => {
                        let message = outcome
                            .message
                            .unwrap_or_else(|| action.default_success_message().to_string());
                        toasts.success(message);
                        form.write().close();
                        grid.refresh();
                        on_close.call(());
                    }
                    Ok(outcome) if outcome.has_field_errors() => {
                        form.write().submit_failed(outcome.field_errors);
                    }
                    Ok(outcome) => {
                        toasts.error(
                            outcome
                                .message
                                .unwrap_or_else(|| "The request failed".to_string()),
                        );
                        form.write().submit_recovered();
                    }
                    Err(e) => {
                        toasts.error(e.to_string());
                        form.write().submit_recovered();
                    }
                }
            });
        }
    };

    let state = form.read().clone();
    let loading = state.phase == FormPhase::Loading;
    let submitting = state.phase == FormPhase::Submitting;

    rsx! {
        // Backdrop; clicking it cancels the cycle
        div {
            style: "position: fixed; inset: 0; background: rgba(31, 41, 51, 0.5); z-index: 100; \
                    display: flex; align-items: flex-start; justify-content: center; padding-top: 60px;",
            onclick: close,

            div {
                style: "background: #ffffff; border-radius: 8px; width: 520px; max-width: 92vw; \
                        max-height: 80vh; overflow-y: auto; box-shadow: 0 12px 32px rgba(0, 0, 0, 0.25);",
                onclick: move |e: Event<MouseData>| e.stop_propagation(),

                // Header
                div {
                    style: "display: flex; align-items: center; justify-content: space-between; \
                            padding: 14px 18px; border-bottom: 1px solid #e4e7eb;",
                    h2 {
                        style: "margin: 0; font-size: 16px; color: #1f2933;",
                        "{title}"
                    }
                    button {
                        r#type: "button",
                        style: "all: unset; cursor: pointer; color: #9aa5b1; padding: 4px;",
                        onclick: close,
                        "✕"
                    }
                }

                if loading {
                    div {
                        style: "display: flex; align-items: center; justify-content: center; \
                                gap: 8px; padding: 40px; color: #3e4c59;",
                        span { class: "spinner" }
                        "Loading…"
                    }
                } else {
                    form {
                        style: "padding: 18px;",
                        onsubmit: submit,

                        for field in schema.fields.iter() {
                            {render_field(field, &state, form, &api)}
                        }

                        // Footer
                        div {
                            style: "display: flex; justify-content: flex-end; gap: 8px; \
                                    padding-top: 10px; border-top: 1px solid #e4e7eb;",

                            button {
                                r#type: "button",
                                style: "padding: 7px 14px; border: 1px solid #cbd2d9; border-radius: 6px; \
                                        background: #ffffff; color: #3e4c59;",
                                disabled: submitting,
                                onclick: close,
                                "Cancel"
                            }

                            button {
                                r#type: "submit",
                                style: "padding: 7px 14px; border: none; border-radius: 6px; \
                                        background: #2563eb; color: #ffffff; display: inline-flex; \
                                        align-items: center; gap: 6px;",
                                disabled: submitting,

                                if submitting {
                                    span { class: "spinner" }
                                    "Saving…"
                                } else {
                                    "{save_label}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Field Rendering
// ============================================================================

/// Render one bound field as its input widget, wired to the form state.
fn render_field(
    field: &FieldSpec,
    state: &RecordFormState,
    mut form: Signal<RecordFormState>,
    api: &ApiClient,
) -> Element {
    let name = field.name.clone();
    let errors = state.field_errors(&name).to_vec();

    match &field.kind {
        FieldKind::Text | FieldKind::Email | FieldKind::Password | FieldKind::Number => {
            let input_type = match field.kind {
                FieldKind::Email => "email",
                FieldKind::Password => "password",
                FieldKind::Number => "number",
                _ => "text",
            };
            rsx! {
                TextInput {
                    value: state.text(&name).to_string(),
                    label: field.label.clone(),
                    input_type: input_type.to_string(),
                    required: field.required,
                    errors,
                    on_change: move |v: String| form.write().set_text(&name, v),
                }
            }
        }
        FieldKind::TextArea => {
            rsx! {
                TextArea {
                    value: state.text(&name).to_string(),
                    label: field.label.clone(),
                    required: field.required,
                    errors,
                    on_change: move |v: String| form.write().set_text(&name, v),
                }
            }
        }
        FieldKind::Select(choices) => {
            rsx! {
                SelectInput {
                    value: state.text(&name).to_string(),
                    label: field.label.clone(),
                    choices: choices.clone(),
                    required: field.required,
                    errors,
                    on_change: move |v: String| form.write().set_text(&name, v),
                }
            }
        }
        FieldKind::Checkbox => {
            rsx! {
                CheckboxInput {
                    checked: state.checked(&name),
                    label: field.label.clone(),
                    errors,
                    on_change: move |v: bool| form.write().set_checked(&name, v),
                }
            }
        }
        FieldKind::File => {
            let file_name = state
                .file(&name)
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned());
            let preview_url = state.preview(&name).map(|p| api.absolute_url(p));
            rsx! {
                FileInput {
                    label: field.label.clone(),
                    file_name,
                    preview_url,
                    required: field.required,
                    errors,
                    on_pick: move |path| form.write().set_file(&name, path),
                }
            }
        }
    }
}
