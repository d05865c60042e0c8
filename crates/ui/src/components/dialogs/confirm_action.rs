//! # Confirm Action Dialog
//!
//! Confirmation step for destructive and toggle actions (delete,
//! restore, status change). These bypass the record form entirely: on
//! confirmation the request is issued directly, then the grid is
//! refreshed on success or an error toast is shown.

use std::sync::Arc;

use dioxus::prelude::*;

use opsdeck_client::ApiClient;

use crate::grid::GridHandle;
use crate::state::{PendingAction, Toasts};

// ============================================================================
// Component Props
// ============================================================================

/// Properties for ConfirmActionDialog
#[derive(Props, Clone, PartialEq)]
pub struct ConfirmActionDialogProps {
    /// The action awaiting confirmation
    pub pending: PendingAction,

    /// Fired when the dialog is done (confirmed and settled, or cancelled)
    #[props(default)]
    pub on_close: EventHandler<()>,
}

// ============================================================================
// Main Component
// ============================================================================

/// Confirmation dialog for destructive/toggle actions
#[component]
pub fn ConfirmActionDialog(props: ConfirmActionDialogProps) -> Element {
    let api = use_context::<Arc<ApiClient>>();
    let grid = use_context::<GridHandle>();
    let toasts = use_context::<Toasts>();

    let mut busy = use_signal(|| false);

    let prompt = props.pending.action.prompt();
    let confirm_label = props.pending.action.confirm_label();

    let cancel = {
        let on_close = props.on_close;
        move |_| {
            if !*busy.read() {
                on_close.call(());
            }
        }
    };

    let confirm = {
        let api = api.clone();
        let grid = grid.clone();
        let pending = props.pending.clone();
        let on_close = props.on_close;
        move |_| {
            if *busy.read() {
                return;
            }
            busy.set(true);

            let api = api.clone();
            let grid = grid.clone();
            let pending = pending.clone();
            let mut toasts = toasts;
            spawn(async move {
                match api
                    .request(pending.action.method(), &pending.url, pending.action.body())
                    .await
                {
                    Ok(outcome) if outcome.ok => {
                        let message = outcome
                            .message
                            .unwrap_or_else(|| pending.action.default_success_message().to_string());
                        toasts.success(message);
                        grid.refresh();
                    }
                    Ok(outcome) => {
                        toasts.error(
                            outcome
                                .message
                                .unwrap_or_else(|| "The request failed".to_string()),
                        );
                    }
                    Err(e) => {
                        toasts.error(e.to_string());
                    }
                }
                busy.set(false);
                on_close.call(());
            });
        }
    };

    let is_busy = *busy.read();

    rsx! {
        div {
            style: "position: fixed; inset: 0; background: rgba(31, 41, 51, 0.5); z-index: 100; \
                    display: flex; align-items: flex-start; justify-content: center; padding-top: 120px;",
            onclick: cancel,

            div {
                style: "background: #ffffff; border-radius: 8px; width: 380px; max-width: 92vw; \
                        box-shadow: 0 12px 32px rgba(0, 0, 0, 0.25); padding: 18px;",
                onclick: move |e: Event<MouseData>| e.stop_propagation(),

                div {
                    style: "display: flex; align-items: flex-start; gap: 12px; margin-bottom: 16px;",

                    span { style: "font-size: 22px;", "⚠️" }

                    div {
                        h2 {
                            style: "margin: 0 0 6px 0; font-size: 15px; color: #1f2933;",
                            "Notification"
                        }
                        p {
                            style: "margin: 0; font-size: 13px; color: #3e4c59;",
                            "{prompt}"
                        }
                    }
                }

                div {
                    style: "display: flex; justify-content: flex-end; gap: 8px;",

                    button {
                        r#type: "button",
                        style: "padding: 7px 14px; border: 1px solid #cbd2d9; border-radius: 6px; \
                                background: #ffffff; color: #3e4c59;",
                        disabled: is_busy,
                        onclick: cancel,
                        "Cancel"
                    }

                    button {
                        r#type: "button",
                        style: "padding: 7px 14px; border: none; border-radius: 6px; \
                                background: #dc2626; color: #ffffff; display: inline-flex; \
                                align-items: center; gap: 6px;",
                        disabled: is_busy,
                        onclick: confirm,

                        if is_busy {
                            span { class: "spinner" }
                            "Working…"
                        } else {
                            "{confirm_label}"
                        }
                    }
                }
            }
        }
    }
}
