//! UI state for Opsdeck
//!
//! This module holds the transient state the console juggles between
//! requests: which dialog is open, which destructive action is waiting
//! for confirmation, the toast stack, and the grid's paging/filter/sort
//! state.

use std::collections::BTreeMap;
use std::time::Duration;

use dioxus::prelude::*;
use uuid::Uuid;

use opsdeck_client::{GridPage, GridQuery, RequestBody};
use opsdeck_core::{HttpMethod, OrderDir, RecordMap};

// ============================================================================
// Dialogs
// ============================================================================

/// How the record form dialog was opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormMode {
    /// Blank form posting to the create endpoint
    Add,
    /// Fetch-and-populate form submitting to the update endpoint
    Edit(i64),
    /// Blank auxiliary form submitting to the resource's secondary
    /// endpoint (e.g. change password); never fetches
    Secondary(i64),
}

/// A destructive or toggle action awaiting confirmation
#[derive(Debug, Clone, PartialEq)]
pub enum RowAction {
    /// Remove the record
    Delete,
    /// Bring back a soft-deleted record
    Restore,
    /// Toggle the record's status flag; the payload value is sent as-is
    SetStatus(String),
}

impl RowAction {
    /// Confirmation prompt shown before the request is issued
    pub fn prompt(&self) -> &'static str {
        match self {
            RowAction::Delete => "Do you want to delete this data?",
            RowAction::Restore => "Do you want to restore this data?",
            RowAction::SetStatus(_) => "Do you want to change the status of this data?",
        }
    }

    /// Label of the confirm button
    pub fn confirm_label(&self) -> &'static str {
        match self {
            RowAction::Delete => "Delete",
            RowAction::Restore => "Restore",
            RowAction::SetStatus(_) => "Change status",
        }
    }

    /// Method the action issues
    pub fn method(&self) -> HttpMethod {
        match self {
            RowAction::Delete => HttpMethod::Delete,
            RowAction::Restore | RowAction::SetStatus(_) => HttpMethod::Patch,
        }
    }

    /// Body the action issues
    pub fn body(&self) -> RequestBody {
        match self {
            RowAction::SetStatus(value) => {
                RequestBody::Form(vec![("status".to_string(), value.clone())])
            }
            _ => RequestBody::Empty,
        }
    }

    /// Toast text when the server reply carries no message
    pub fn default_success_message(&self) -> &'static str {
        match self {
            RowAction::Delete => "Deleted successfully",
            RowAction::Restore => "Restored successfully",
            RowAction::SetStatus(_) => "Updated successfully",
        }
    }
}

/// A row action bound to its target endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAction {
    pub action: RowAction,
    pub url: String,
}

/// The dialog currently covering the page, if any
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    /// Add/edit/secondary record form
    RecordForm(RecordFormMode),
    /// Confirmation for a destructive or toggle action
    Confirm(PendingAction),
}

// ============================================================================
// Notifications
// ============================================================================

/// How long a toast stays on screen
pub const TOAST_TTL: Duration = Duration::from_secs(4);

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

impl NoticeLevel {
    /// Accent color of the toast card
    pub fn accent(&self) -> &'static str {
        match self {
            NoticeLevel::Info => "#2563eb",
            NoticeLevel::Success => "#16a34a",
            NoticeLevel::Error => "#dc2626",
        }
    }
}

/// One transient notification
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: Uuid,
    pub text: String,
    pub level: NoticeLevel,
}

/// Handle to the toast stack.
///
/// Cheap to copy into event handlers; every push schedules its own
/// expiry so the stack drains without a sweeper.
#[derive(Clone, Copy)]
pub struct Toasts {
    notices: Signal<Vec<Notice>>,
}

impl Toasts {
    /// Create the toast stack. Must run inside a component scope.
    pub fn new() -> Self {
        Self {
            notices: Signal::new(Vec::new()),
        }
    }

    /// Current stack contents, oldest first
    pub fn list(&self) -> Vec<Notice> {
        self.notices.read().clone()
    }

    /// Show a success toast
    pub fn success(&mut self, text: impl Into<String>) {
        self.push(text.into(), NoticeLevel::Success);
    }

    /// Show an error toast
    pub fn error(&mut self, text: impl Into<String>) {
        self.push(text.into(), NoticeLevel::Error);
    }

    /// Show an info toast
    pub fn info(&mut self, text: impl Into<String>) {
        self.push(text.into(), NoticeLevel::Info);
    }

    /// Remove one toast immediately
    pub fn dismiss(&mut self, id: Uuid) {
        self.notices.write().retain(|n| n.id != id);
    }

    fn push(&mut self, text: String, level: NoticeLevel) {
        let id = Uuid::new_v4();
        self.notices.write().push(Notice { id, text, level });

        // Expiry must outlive whatever dialog scope pushed the toast.
        let mut notices = self.notices;
        spawn_forever(async move {
            tokio::time::sleep(TOAST_TTL).await;
            notices.write().retain(|n| n.id != id);
        });
    }
}

// ============================================================================
// Grid State
// ============================================================================

/// Default page length, matching the backend grid's default
pub const DEFAULT_PAGE_LENGTH: u64 = 10;

/// Selectable page lengths
pub const PAGE_LENGTHS: [u64; 4] = [10, 25, 50, 100];

/// Paging, filter, and sort state of the resource grid, plus the rows
/// of the current page.
///
/// The `draw` counter makes refreshes idempotent against out-of-order
/// replies: a reply tagged with an older draw is discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct GridState {
    pub rows: Vec<RecordMap>,
    pub draw: u64,
    pub start: u64,
    pub length: u64,
    pub records_total: u64,
    pub records_filtered: u64,
    pub order: (usize, OrderDir),
    pub filters: BTreeMap<String, String>,
    pub loading: bool,
    pub load_error: Option<String>,
}

impl GridState {
    /// Fresh state with no rows loaded yet
    pub fn new(order: (usize, OrderDir)) -> Self {
        Self {
            rows: Vec::new(),
            draw: 0,
            start: 0,
            length: DEFAULT_PAGE_LENGTH,
            records_total: 0,
            records_filtered: 0,
            order,
            filters: BTreeMap::new(),
            loading: false,
            load_error: None,
        }
    }

    /// Start one refresh: bump the draw counter and build the query that
    /// reproduces the current page/filter/sort state.
    pub fn begin_request(&mut self) -> GridQuery {
        self.draw += 1;
        self.loading = true;
        self.load_error = None;
        GridQuery {
            draw: self.draw,
            start: self.start,
            length: self.length,
            order: self.order,
            filters: self.filters.clone(),
        }
    }

    /// Apply a reply. Returns false when the reply is stale and was
    /// discarded.
    pub fn apply_page(&mut self, page: GridPage) -> bool {
        if let Some(draw) = page.draw {
            if draw != self.draw {
                return false;
            }
        }
        self.records_filtered = page.filtered_count();
        self.records_total = page.records_total.unwrap_or(self.records_filtered);
        self.rows = page.data;
        self.loading = false;
        self.load_error = None;
        true
    }

    /// Record a failed refresh. Ignored when a newer request is already
    /// in flight.
    pub fn apply_error(&mut self, draw: u64, message: impl Into<String>) {
        if draw != self.draw {
            return;
        }
        self.loading = false;
        self.load_error = Some(message.into());
    }

    /// Set or clear one column filter; filtering restarts from page one
    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        if value.is_empty() {
            self.filters.remove(&field);
        } else {
            self.filters.insert(field, value);
        }
        self.start = 0;
    }

    /// Toggle ordering on a column: first click sorts ascending, the
    /// second flips direction
    pub fn toggle_order(&mut self, column: usize) {
        if self.order.0 == column {
            self.order.1 = self.order.1.flipped();
        } else {
            self.order = (column, OrderDir::Asc);
        }
        self.start = 0;
    }

    /// Change the page length, restarting from page one
    pub fn set_page_length(&mut self, length: u64) {
        self.length = length.max(1);
        self.start = 0;
    }

    /// Zero-based index of the current page
    pub fn current_page(&self) -> u64 {
        self.start / self.length.max(1)
    }

    /// Number of pages after filtering (at least one)
    pub fn page_count(&self) -> u64 {
        self.records_filtered.div_ceil(self.length.max(1)).max(1)
    }

    /// Jump to a zero-based page index, clamped to the last page
    pub fn goto_page(&mut self, page: u64) {
        let page = page.min(self.page_count().saturating_sub(1));
        self.start = page * self.length;
    }

    /// "Showing X to Y of Z entries" summary for the grid footer
    pub fn info_text(&self) -> String {
        if self.records_filtered == 0 {
            return "No entries to show".to_string();
        }
        let first = self.start + 1;
        let last = (self.start + self.rows.len() as u64).max(first);
        format!(
            "Showing {first} to {last} of {} entries",
            self.records_filtered
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
