//! Main Application Component for Opsdeck
//!
//! The root component wires the dependency graph together: the API
//! client and toast stack are provided as contexts, the sidebar picks
//! the active resource, and each resource page owns its grid handle
//! and dialog state.

use std::sync::Arc;

use dioxus::prelude::*;

use opsdeck_client::ApiClient;
use opsdeck_core::ResourceConfig;

use crate::components::{ConfirmActionDialog, DataGrid, RecordFormDialog, ToastHost};
use crate::grid::GridHandle;
use crate::resources;
use crate::state::{Dialog, GridState, RecordFormMode, Toasts};

// ============================================================================
// Main App Component
// ============================================================================

/// Root application component
#[component]
pub fn App() -> Element {
    let config = crate::launch_config();

    // The configured base URL was validated at load time; the fallback
    // only exists so a bad runtime edit degrades instead of crashing.
    let api = use_hook(|| {
        Arc::new(match ApiClient::new(&config.server.base_url) {
            Ok(client) => client,
            Err(e) => {
                tracing::error!(error = %e, "invalid base URL in config, using default");
                ApiClient::new("http://127.0.0.1:8000").expect("default base URL is valid")
            }
        })
    });
    use_context_provider(|| api.clone());
    use_context_provider(Toasts::new);

    let resource_set = use_hook(resources::default_resources);
    let mut active = use_signal(|| {
        resource_set
            .first()
            .map(|r| r.key.clone())
            .unwrap_or_default()
    });

    let current = resource_set
        .iter()
        .find(|r| r.key == *active.read())
        .cloned();

    let base_url = api.base_url().to_string();

    rsx! {
        div {
            style: "height: 100vh; display: flex; flex-direction: column; background: #f5f7fa;",

            Topbar { base_url }

            div {
                style: "flex: 1; display: flex; overflow: hidden;",

                Sidebar {
                    resources: resource_set.clone(),
                    active: active.read().clone(),
                    on_select: move |key: String| active.set(key),
                }

                main {
                    style: "flex: 1; overflow-y: auto; padding: 20px;",

                    if let Some(resource) = current {
                        ResourcePage { key: "{resource.key}", resource: resource.clone() }
                    }
                }
            }

            ToastHost {}
        }
    }
}

// ============================================================================
// Topbar Component
// ============================================================================

/// Top bar with the app identity and the connected backend
#[component]
fn Topbar(base_url: String) -> Element {
    rsx! {
        header {
            style: "height: 48px; background: #1f2933; color: #f5f7fa; display: flex; \
                    align-items: center; justify-content: space-between; padding: 0 16px; flex-shrink: 0;",

            div {
                style: "display: flex; align-items: center; gap: 8px;",
                span { style: "font-size: 18px;", "🗂" }
                span { style: "font-weight: 600;", "Opsdeck" }
            }

            span {
                style: "font-size: 12px; color: #9aa5b1;",
                "{base_url}"
            }
        }
    }
}

// ============================================================================
// Sidebar Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
struct SidebarProps {
    resources: Vec<ResourceConfig>,
    active: String,
    on_select: EventHandler<String>,
}

/// Resource navigation
#[component]
fn Sidebar(props: SidebarProps) -> Element {
    rsx! {
        nav {
            style: "width: 200px; background: #ffffff; border-right: 1px solid #e4e7eb; \
                    padding: 12px 0; flex-shrink: 0;",

            for resource in props.resources.iter() {
                button {
                    key: "{resource.key}",
                    r#type: "button",
                    style: sidebar_item_style(props.active == resource.key),
                    onclick: {
                        let key = resource.key.clone();
                        let on_select = props.on_select;
                        move |_| on_select.call(key.clone())
                    },
                    "{resource.title}"
                }
            }
        }
    }
}

fn sidebar_item_style(active: bool) -> String {
    let (background, color, weight) = if active {
        ("#eef2ff", "#2563eb", "600")
    } else {
        ("transparent", "#3e4c59", "400")
    };
    format!(
        "display: block; width: 100%; text-align: left; border: none; padding: 9px 16px; \
         background: {background}; color: {color}; font-weight: {weight}; font-size: 14px;"
    )
}

// ============================================================================
// Resource Page Component
// ============================================================================

/// One resource's admin page: grid, add trigger, and the dialogs.
///
/// Keyed by resource key in `App`, so switching resources remounts the
/// page with fresh grid and dialog state.
#[component]
fn ResourcePage(resource: ResourceConfig) -> Element {
    let api = use_context::<Arc<ApiClient>>();

    let grid_state = use_signal(|| GridState::new(resource.default_order));
    let grid = use_context_provider(|| GridHandle::bound(api.clone(), &resource, grid_state));

    let mut dialog = use_signal(|| None::<Dialog>);

    // first page load
    {
        let grid = grid.clone();
        use_effect(move || grid.refresh());
    }

    let title = resource.title.clone();

    let dialog_view = match dialog.read().clone() {
        Some(Dialog::RecordForm(mode)) => {
            let dialog_key = match mode {
                RecordFormMode::Add => "form-add".to_string(),
                RecordFormMode::Edit(id) => format!("form-edit-{id}"),
                RecordFormMode::Secondary(id) => format!("form-secondary-{id}"),
            };
            rsx! {
                RecordFormDialog {
                    key: "{dialog_key}",
                    resource: resource.clone(),
                    mode,
                    on_close: move |_| dialog.set(None),
                }
            }
        }
        Some(Dialog::Confirm(pending)) => rsx! {
            ConfirmActionDialog {
                pending,
                on_close: move |_| dialog.set(None),
            }
        },
        None => rsx! {},
    };

    rsx! {
        section {
            div {
                style: "display: flex; align-items: center; justify-content: space-between; \
                        margin-bottom: 14px;",

                h1 {
                    style: "margin: 0; font-size: 20px; color: #1f2933;",
                    "{title}"
                }

                button {
                    r#type: "button",
                    style: "padding: 8px 16px; border: none; border-radius: 6px; \
                            background: #2563eb; color: #ffffff; font-weight: 600;",
                    onclick: move |_| dialog.set(Some(Dialog::RecordForm(RecordFormMode::Add))),
                    "+ Add"
                }
            }

            DataGrid {
                resource: resource.clone(),
                on_edit: move |id| dialog.set(Some(Dialog::RecordForm(RecordFormMode::Edit(id)))),
                on_secondary: move |id| {
                    dialog.set(Some(Dialog::RecordForm(RecordFormMode::Secondary(id))))
                },
                on_row_action: move |pending| dialog.set(Some(Dialog::Confirm(pending))),
            }

            {dialog_view}
        }
    }
}
