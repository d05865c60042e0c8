//! # Data Grid Component
//!
//! The paginated record grid: server-side paging, per-column footer
//! filters, column ordering, and per-row action buttons. The grid
//! never mutates records itself; row actions are surfaced through
//! explicit `EventHandler` props and handled by the page that owns the
//! dialogs.

use std::sync::Arc;

use dioxus::prelude::*;

use opsdeck_client::ApiClient;
use opsdeck_core::{is_checked_value, json_to_text, FieldRole, OrderDir, RecordMap, ResourceConfig};

use crate::grid::GridHandle;
use crate::state::{PendingAction, RowAction, PAGE_LENGTHS};

// ============================================================================
// Component Props
// ============================================================================

/// Properties for DataGrid
#[derive(Props, Clone, PartialEq)]
pub struct DataGridProps {
    /// The resource whose records the grid shows
    pub resource: ResourceConfig,

    /// Fired with the record id when the edit trigger is activated
    #[props(default)]
    pub on_edit: EventHandler<i64>,

    /// Fired with the record id when the secondary-form trigger is
    /// activated (only rendered when the resource configures one)
    #[props(default)]
    pub on_secondary: EventHandler<i64>,

    /// Fired when a destructive/toggle trigger is activated; the page
    /// shows the confirmation dialog
    #[props(default)]
    pub on_row_action: EventHandler<PendingAction>,
}

// ============================================================================
// Main Component
// ============================================================================

/// Paginated, filterable record grid
#[component]
pub fn DataGrid(props: DataGridProps) -> Element {
    let grid = use_context::<GridHandle>();
    let api = use_context::<Arc<ApiClient>>();
    let Some(state_signal) = grid.state() else {
        // no grid bound on this page
        return rsx! {};
    };

    let state = state_signal.read().clone();
    let resource = props.resource.clone();

    // precomputed bits the markup interpolates
    let colspan = resource.columns.len() + 1;
    let info = state.info_text();
    let page_label = format!(
        "Page {} of {}",
        state.current_page() + 1,
        state.page_count()
    );
    let keyed_rows: Vec<(String, RecordMap)> = state
        .rows
        .iter()
        .enumerate()
        .map(|(i, r)| (row_key(r, i), r.clone()))
        .collect();

    let header_cell = "text-align: left; padding: 9px 12px; font-size: 12px; color: #3e4c59; \
                       text-transform: uppercase; letter-spacing: 0.04em; border-bottom: 2px solid #e4e7eb;";
    let body_cell = "padding: 8px 12px; border-bottom: 1px solid #eef1f4; color: #1f2933;";

    rsx! {
        div {
            style: "background: #ffffff; border: 1px solid #e4e7eb; border-radius: 8px; overflow: hidden;",

            // Length selector and summary
            div {
                style: "display: flex; justify-content: space-between; align-items: center; padding: 10px 12px;",

                label {
                    style: "font-size: 13px; color: #3e4c59; display: flex; align-items: center; gap: 6px;",
                    "Show"
                    select {
                        style: "padding: 4px 6px; border: 1px solid #cbd2d9; border-radius: 4px;",
                        onchange: {
                            let grid = grid.clone();
                            let mut state_signal = state_signal;
                            move |e: Event<FormData>| {
                                if let Ok(length) = e.value().parse::<u64>() {
                                    state_signal.write().set_page_length(length);
                                    grid.refresh();
                                }
                            }
                        },
                        for length in PAGE_LENGTHS {
                            option {
                                key: "{length}",
                                value: "{length}",
                                selected: state.length == length,
                                "{length}"
                            }
                        }
                    }
                    "entries"
                }

                if state.loading {
                    span {
                        style: "display: inline-flex; align-items: center; gap: 6px; font-size: 13px; color: #3e4c59;",
                        span { class: "spinner" }
                        "Loading…"
                    }
                }
            }

            table {
                thead {
                    tr {
                        for (index, column) in resource.columns.iter().enumerate() {
                            th {
                                key: "{column.field}",
                                style: "{header_cell}",

                                if column.orderable {
                                    button {
                                        r#type: "button",
                                        style: "all: unset; cursor: pointer; display: inline-flex; gap: 4px; \
                                                align-items: center; text-transform: inherit; letter-spacing: inherit;",
                                        onclick: {
                                            let grid = grid.clone();
                                            let mut state_signal = state_signal;
                                            move |_| {
                                                state_signal.write().toggle_order(index);
                                                grid.refresh();
                                            }
                                        },
                                        "{column.title}"
                                        span {
                                            style: "color: #9aa5b1;",
                                            {order_marker(state.order, index)}
                                        }
                                    }
                                } else {
                                    "{column.title}"
                                }
                            }
                        }
                        th { style: "{header_cell}", "Actions" }
                    }
                }

                tbody {
                    if let Some(error) = &state.load_error {
                        tr {
                            td {
                                colspan: "{colspan}",
                                style: "padding: 16px; color: #dc2626; text-align: center;",
                                "{error}"
                            }
                        }
                    } else if state.rows.is_empty() && !state.loading {
                        tr {
                            td {
                                colspan: "{colspan}",
                                style: "padding: 16px; color: #9aa5b1; text-align: center;",
                                "No records"
                            }
                        }
                    }

                    for (tr_key, row) in keyed_rows.iter() {
                        tr {
                            key: "{tr_key}",

                            for column in resource.columns.iter() {
                                td {
                                    key: "{column.field}",
                                    style: "{body_cell}",
                                    {render_cell(&api, row, &column.field)}
                                }
                            }

                            td {
                                style: "{body_cell} white-space: nowrap;",
                                RowActions {
                                    resource: resource.clone(),
                                    row: row.clone(),
                                    on_edit: props.on_edit,
                                    on_secondary: props.on_secondary,
                                    on_row_action: props.on_row_action,
                                }
                            }
                        }
                    }
                }

                // Per-column footer filters
                tfoot {
                    tr {
                        for column in resource.columns.iter() {
                            td {
                                key: "{column.field}",
                                style: "padding: 6px 8px; border-top: 2px solid #e4e7eb;",
                                if column.searchable {
                                    input {
                                        r#type: "text",
                                        placeholder: "Filter {column.title}",
                                        style: "width: 100%; padding: 4px 6px; border: 1px solid #cbd2d9; \
                                                border-radius: 4px; font-size: 12px;",
                                        value: state.filters.get(&column.field).cloned().unwrap_or_default(),
                                        onchange: {
                                            let grid = grid.clone();
                                            let mut state_signal = state_signal;
                                            let field = column.field.clone();
                                            move |e: Event<FormData>| {
                                                state_signal.write().set_filter(field.clone(), e.value());
                                                grid.refresh();
                                            }
                                        },
                                    }
                                }
                            }
                        }
                        td { style: "border-top: 2px solid #e4e7eb;" }
                    }
                }
            }

            // Pagination bar
            div {
                style: "display: flex; justify-content: space-between; align-items: center; padding: 10px 12px;",

                span {
                    style: "font-size: 13px; color: #3e4c59;",
                    "{info}"
                }

                div {
                    style: "display: flex; align-items: center; gap: 8px;",

                    button {
                        r#type: "button",
                        style: "padding: 4px 10px; border: 1px solid #cbd2d9; border-radius: 4px; background: #ffffff;",
                        disabled: state.current_page() == 0,
                        onclick: {
                            let grid = grid.clone();
                            let mut state_signal = state_signal;
                            move |_| {
                                let page = state_signal.read().current_page().saturating_sub(1);
                                state_signal.write().goto_page(page);
                                grid.refresh();
                            }
                        },
                        "Previous"
                    }

                    span {
                        style: "font-size: 13px; color: #3e4c59;",
                        "{page_label}"
                    }

                    button {
                        r#type: "button",
                        style: "padding: 4px 10px; border: 1px solid #cbd2d9; border-radius: 4px; background: #ffffff;",
                        disabled: state.current_page() + 1 >= state.page_count(),
                        onclick: {
                            let grid = grid.clone();
                            let mut state_signal = state_signal;
                            move |_| {
                                let page = state_signal.read().current_page() + 1;
                                state_signal.write().goto_page(page);
                                grid.refresh();
                            }
                        },
                        "Next"
                    }
                }
            }
        }
    }
}

// ============================================================================
// Row Actions Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
struct RowActionsProps {
    resource: ResourceConfig,
    row: RecordMap,
    on_edit: EventHandler<i64>,
    on_secondary: EventHandler<i64>,
    on_row_action: EventHandler<PendingAction>,
}

/// Per-row trigger buttons. Each trigger is bound explicitly; which
/// triggers exist follows from the resource's configured routes.
#[component]
fn RowActions(props: RowActionsProps) -> Element {
    let Some(id) = row_id(&props.row) else {
        // rows without a numeric id cannot be addressed
        return rsx! {};
    };

    let routes = &props.resource.routes;
    let active = props
        .row
        .get("active")
        .map(is_checked_value)
        .unwrap_or(false);

    let button_style = "padding: 4px 8px; margin-right: 4px; border: 1px solid #cbd2d9; \
                        border-radius: 4px; background: #ffffff; font-size: 12px; color: #3e4c59;";

    let delete_url = routes.delete.as_ref().map(|r| r.with_id(id));
    let restore_url = routes.restore.as_ref().map(|r| r.with_id(id));
    let status_url = routes.status.as_ref().map(|r| r.with_id(id));
    let has_secondary = props.resource.secondary.is_some();

    rsx! {
        button {
            r#type: "button",
            style: "{button_style}",
            onclick: move |_| props.on_edit.call(id),
            "Edit"
        }

        if has_secondary {
            button {
                r#type: "button",
                style: "{button_style}",
                onclick: move |_| props.on_secondary.call(id),
                {props.resource.secondary.as_ref().map(|s| s.title.clone()).unwrap_or_default()}
            }
        }

        if let Some(url) = status_url {
            button {
                r#type: "button",
                style: "{button_style}",
                onclick: {
                    let on_row_action = props.on_row_action;
                    move |_| {
                        // toggle: send the opposite of the current flag
                        let value = if active { "0" } else { "1" };
                        on_row_action.call(PendingAction {
                            action: RowAction::SetStatus(value.to_string()),
                            url: url.clone(),
                        });
                    }
                },
                if active { "Deactivate" } else { "Activate" }
            }
        }

        if let Some(url) = restore_url {
            button {
                r#type: "button",
                style: "{button_style}",
                onclick: {
                    let on_row_action = props.on_row_action;
                    move |_| {
                        on_row_action.call(PendingAction {
                            action: RowAction::Restore,
                            url: url.clone(),
                        });
                    }
                },
                "Restore"
            }
        }

        if let Some(url) = delete_url {
            button {
                r#type: "button",
                style: "{button_style} color: #dc2626; border-color: #f5c2c2;",
                onclick: {
                    let on_row_action = props.on_row_action;
                    move |_| {
                        on_row_action.call(PendingAction {
                            action: RowAction::Delete,
                            url: url.clone(),
                        });
                    }
                },
                "Delete"
            }
        }
    }
}

// ============================================================================
// Cell Rendering
// ============================================================================

/// Render one cell by field role: image keys become thumbnails, the
/// active flag becomes a badge, timestamps are shortened, everything
/// else is plain text.
fn render_cell(api: &ApiClient, row: &RecordMap, field: &str) -> Element {
    let Some(value) = row.get(field) else {
        return rsx! { span { style: "color: #9aa5b1;", "—" } };
    };

    match FieldRole::for_key(field) {
        FieldRole::ImagePreview => {
            let path = json_to_text(value);
            if path.is_empty() {
                return rsx! { span { style: "color: #9aa5b1;", "—" } };
            }
            let url = api.absolute_url(&path);
            rsx! {
                img {
                    style: "max-width: 48px; max-height: 32px; border-radius: 4px;",
                    src: "{url}",
                }
            }
        }
        FieldRole::ActiveFlag => {
            if is_checked_value(value) {
                rsx! {
                    span {
                        style: "padding: 2px 8px; border-radius: 10px; background: #dcf5e7; \
                                color: #16a34a; font-size: 12px;",
                        "Active"
                    }
                }
            } else {
                rsx! {
                    span {
                        style: "padding: 2px 8px; border-radius: 10px; background: #f1f3f5; \
                                color: #7b8794; font-size: 12px;",
                        "Inactive"
                    }
                }
            }
        }
        FieldRole::Plain => {
            let text = json_to_text(value);
            let text = if field.ends_with("_at") {
                format_timestamp(&text).unwrap_or(text)
            } else {
                text
            };
            rsx! { "{text}" }
        }
    }
}

/// Numeric id of a row, when the payload carries one
fn row_id(row: &RecordMap) -> Option<i64> {
    match row.get("id") {
        Some(serde_json::Value::Number(n)) => n.as_i64(),
        Some(serde_json::Value::String(s)) => s.parse().ok(),
        _ => None,
    }
}

/// Stable iteration key for a row
fn row_key(row: &RecordMap, index: usize) -> String {
    match row_id(row) {
        Some(id) => format!("id-{id}"),
        None => format!("row-{index}"),
    }
}

/// Shorten a server timestamp to minute precision. Accepts RFC 3339
/// and the two naive formats the backend emits.
fn format_timestamp(raw: &str) -> Option<String> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.format("%Y-%m-%d %H:%M").to_string());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.format("%Y-%m-%d %H:%M").to_string());
        }
    }
    None
}

/// Ordering marker for a header: the active column shows its
/// direction, the rest show nothing.
fn order_marker(order: (usize, OrderDir), column: usize) -> &'static str {
    if order.0 != column {
        ""
    } else {
        match order.1 {
            OrderDir::Asc => "▲",
            OrderDir::Desc => "▼",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
