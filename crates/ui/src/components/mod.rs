//! # UI Components
//!
//! Reusable Dioxus components for the Opsdeck console:
//! - **DataGrid**: paginated record grid with footer filters and row actions
//! - **Inputs**: form input components (text, select, checkbox, file, ...)
//! - **Dialogs**: the record form modal and the confirm-action modal
//! - **Toasts**: transient notification stack
//!
//! ## Component Hierarchy
//!
//! ```text
//! ResourcePage
//! ├── DataGrid
//! │   └── RowActions (per row)
//! ├── RecordFormDialog (when open)
//! │   └── TextInput / TextArea / SelectInput / CheckboxInput / FileInput
//! └── ConfirmActionDialog (when open)
//!
//! App
//! └── ToastHost
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod dialogs;
pub mod grid_view;
pub mod inputs;
pub mod toasts;

// ============================================================================
// Re-exports
// ============================================================================

pub use dialogs::{ConfirmActionDialog, RecordFormDialog};
pub use grid_view::DataGrid;
pub use inputs::{CheckboxInput, FieldErrors, FileInput, SelectInput, TextArea, TextInput};
pub use toasts::ToastHost;
