//! # Input Components
//!
//! Form input components for the Opsdeck dialogs:
//! - **TextInput**: single-line text input (text, email, password, number)
//! - **TextArea**: multi-line text input
//! - **SelectInput**: dropdown with fixed choices
//! - **CheckboxInput**: boolean checkbox
//! - **FileInput**: native file picker with inline image preview
//!
//! Every input renders its field's error annotations as a list of
//! messages under the widget, in server order.

use std::path::PathBuf;

use dioxus::prelude::*;
use rfd::AsyncFileDialog;

use opsdeck_core::SelectChoice;

// ============================================================================
// Shared Styles
// ============================================================================

const LABEL_STYLE: &str =
    "display: block; font-weight: 600; font-size: 13px; color: #3e4c59; margin-bottom: 4px;";

const ERROR_STYLE: &str = "display: block; color: #dc2626; font-size: 12px; margin-top: 3px;";

/// Widget style, switching the border to the error accent when the
/// field carries annotations.
fn control_style(has_error: bool) -> String {
    let border = if has_error { "#dc2626" } else { "#cbd2d9" };
    format!(
        "width: 100%; padding: 7px 10px; border: 1px solid {border}; border-radius: 6px; \
         background: #ffffff; color: #1f2933; outline: none;"
    )
}

// ============================================================================
// Error Annotations
// ============================================================================

/// Properties for FieldErrors
#[derive(Props, Clone, PartialEq)]
pub struct FieldErrorsProps {
    /// Messages in server order; renders nothing when empty
    pub messages: Vec<String>,
}

/// Error annotations rendered under a field
#[component]
pub fn FieldErrors(props: FieldErrorsProps) -> Element {
    rsx! {
        for message in props.messages.iter() {
            span {
                style: ERROR_STYLE,
                "{message}"
            }
        }
    }
}

// ============================================================================
// Text Input
// ============================================================================

/// Properties for TextInput
#[derive(Props, Clone, PartialEq)]
pub struct TextInputProps {
    pub value: String,
    pub label: String,

    /// HTML input type (text, email, password, number)
    #[props(default = "text".to_string())]
    pub input_type: String,

    #[props(default = false)]
    pub required: bool,

    #[props(default = false)]
    pub disabled: bool,

    /// Error annotations for this field
    #[props(default)]
    pub errors: Vec<String>,

    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Single-line text input
#[component]
pub fn TextInput(props: TextInputProps) -> Element {
    let style = control_style(!props.errors.is_empty());

    rsx! {
        div {
            style: "margin-bottom: 14px;",

            label {
                style: LABEL_STYLE,
                "{props.label}"
                if props.required {
                    span { style: "color: #dc2626; margin-left: 2px;", "*" }
                }
            }

            input {
                style: "{style}",
                r#type: "{props.input_type}",
                value: "{props.value}",
                disabled: props.disabled,
                oninput: move |e| props.on_change.call(e.value()),
            }

            FieldErrors { messages: props.errors.clone() }
        }
    }
}

// ============================================================================
// Text Area
// ============================================================================

/// Properties for TextArea
#[derive(Props, Clone, PartialEq)]
pub struct TextAreaProps {
    pub value: String,
    pub label: String,

    #[props(default = 4)]
    pub rows: usize,

    #[props(default = false)]
    pub required: bool,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub errors: Vec<String>,

    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Multi-line text input
#[component]
pub fn TextArea(props: TextAreaProps) -> Element {
    let style = format!("{} resize: vertical;", control_style(!props.errors.is_empty()));

    rsx! {
        div {
            style: "margin-bottom: 14px;",

            label {
                style: LABEL_STYLE,
                "{props.label}"
                if props.required {
                    span { style: "color: #dc2626; margin-left: 2px;", "*" }
                }
            }

            textarea {
                style: "{style}",
                rows: "{props.rows}",
                disabled: props.disabled,
                oninput: move |e| props.on_change.call(e.value()),
                "{props.value}"
            }

            FieldErrors { messages: props.errors.clone() }
        }
    }
}

// ============================================================================
// Select
// ============================================================================

/// Properties for SelectInput
#[derive(Props, Clone, PartialEq)]
pub struct SelectInputProps {
    pub value: String,
    pub label: String,
    pub choices: Vec<SelectChoice>,

    #[props(default = false)]
    pub required: bool,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub errors: Vec<String>,

    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Dropdown with fixed choices. An empty-value option is always
/// rendered first so "nothing selected" stays expressible.
#[component]
pub fn SelectInput(props: SelectInputProps) -> Element {
    let style = control_style(!props.errors.is_empty());

    rsx! {
        div {
            style: "margin-bottom: 14px;",

            label {
                style: LABEL_STYLE,
                "{props.label}"
                if props.required {
                    span { style: "color: #dc2626; margin-left: 2px;", "*" }
                }
            }

            select {
                style: "{style}",
                disabled: props.disabled,
                onchange: move |e| props.on_change.call(e.value()),

                option {
                    value: "",
                    selected: props.value.is_empty(),
                    "—"
                }

                for choice in props.choices.iter() {
                    option {
                        key: "{choice.value}",
                        value: "{choice.value}",
                        selected: props.value == choice.value,
                        "{choice.label}"
                    }
                }
            }

            FieldErrors { messages: props.errors.clone() }
        }
    }
}

// ============================================================================
// Checkbox
// ============================================================================

/// Properties for CheckboxInput
#[derive(Props, Clone, PartialEq)]
pub struct CheckboxInputProps {
    pub checked: bool,
    pub label: String,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub errors: Vec<String>,

    #[props(default)]
    pub on_change: EventHandler<bool>,
}

/// Boolean checkbox
#[component]
pub fn CheckboxInput(props: CheckboxInputProps) -> Element {
    rsx! {
        div {
            style: "margin-bottom: 14px;",

            label {
                style: "display: inline-flex; align-items: center; gap: 8px; cursor: pointer; \
                        font-size: 13px; color: #3e4c59;",

                input {
                    r#type: "checkbox",
                    checked: props.checked,
                    disabled: props.disabled,
                    onchange: move |_| {
                        if !props.disabled {
                            props.on_change.call(!props.checked);
                        }
                    },
                }

                "{props.label}"
            }

            FieldErrors { messages: props.errors.clone() }
        }
    }
}

// ============================================================================
// File Input
// ============================================================================

/// Properties for FileInput
#[derive(Props, Clone, PartialEq)]
pub struct FileInputProps {
    pub label: String,

    /// Name of the picked file, if any
    #[props(default)]
    pub file_name: Option<String>,

    /// Server-side image preview URL, shown until a new file is picked
    #[props(default)]
    pub preview_url: Option<String>,

    #[props(default = false)]
    pub required: bool,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub errors: Vec<String>,

    /// Fired with the picked path
    #[props(default)]
    pub on_pick: EventHandler<PathBuf>,
}

/// Native file picker with inline image preview
#[component]
pub fn FileInput(props: FileInputProps) -> Element {
    let disabled = props.disabled;
    let on_pick = props.on_pick;

    let pick = move |_| {
        if disabled {
            return;
        }
        spawn(async move {
            if let Some(file) = AsyncFileDialog::new().pick_file().await {
                on_pick.call(file.path().to_path_buf());
            }
        });
    };

    rsx! {
        div {
            style: "margin-bottom: 14px;",

            label {
                style: LABEL_STYLE,
                "{props.label}"
                if props.required {
                    span { style: "color: #dc2626; margin-left: 2px;", "*" }
                }
            }

            div {
                style: "display: flex; align-items: center; gap: 10px;",

                button {
                    r#type: "button",
                    style: "padding: 6px 12px; border: 1px solid #cbd2d9; border-radius: 6px; \
                            background: #f5f7fa; color: #3e4c59;",
                    disabled: props.disabled,
                    onclick: pick,
                    "Choose file…"
                }

                if let Some(name) = &props.file_name {
                    span { style: "font-size: 13px; color: #3e4c59;", "{name}" }
                } else {
                    span { style: "font-size: 13px; color: #9aa5b1;", "No file selected" }
                }
            }

            if let Some(url) = &props.preview_url {
                img {
                    style: "display: block; margin-top: 8px; max-width: 160px; max-height: 120px; \
                            border: 1px solid #e4e7eb; border-radius: 6px;",
                    src: "{url}",
                }
            }

            FieldErrors { messages: props.errors.clone() }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_style_switches_border_on_error() {
        let normal = control_style(false);
        assert!(normal.contains("#cbd2d9"));
        assert!(!normal.contains("#dc2626"));

        let error = control_style(true);
        assert!(error.contains("#dc2626"));
    }
}
