//! # Opsdeck UI
//!
//! Dioxus Desktop UI for the Opsdeck admin console.
//!
//! This crate provides the grid, the generic CRUD dialogs, and the
//! notification stack, wired against `opsdeck_client` for transport
//! and `opsdeck_core` for resource configuration.
//!
//! ## Features
//!
//! - Server-side paginated record grid with per-column filters
//! - Schema-driven add/edit modal with inline validation errors
//! - Confirmation flow for delete/restore/status-toggle actions
//! - Transient success/error toasts
//!

use std::sync::OnceLock;

use opsdeck_core::AppConfig;

// ============================================================================
// Modules
// ============================================================================

pub mod app;
pub mod components;
pub mod form;
pub mod grid;
pub mod resources;
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

// Re-export internal crates for convenience
pub use opsdeck_client;
pub use opsdeck_core;

// Re-export main components
pub use app::App;
pub use components::{
    CheckboxInput, ConfirmActionDialog, DataGrid, FieldErrors, FileInput, RecordFormDialog,
    SelectInput, TextArea, TextInput, ToastHost,
};
pub use form::{FormPhase, FormValue, RecordFormState};
pub use grid::GridHandle;
pub use state::{
    Dialog, GridState, Notice, NoticeLevel, PendingAction, RecordFormMode, RowAction, Toasts,
    DEFAULT_PAGE_LENGTH, PAGE_LENGTHS, TOAST_TTL,
};

// ============================================================================
// Constants
// ============================================================================

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = "Opsdeck";

/// Application display title
pub const TITLE: &str = "Opsdeck - Admin Console";

/// CSS styles for the application, included at build time
const STYLES: &str = include_str!("../assets/main.css");

/// Configuration the desktop app was launched with
static LAUNCH_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// The configuration `launch` was called with (defaults before launch,
/// e.g. in tests)
pub fn launch_config() -> &'static AppConfig {
    LAUNCH_CONFIG.get_or_init(AppConfig::default)
}

// ============================================================================
// Launch Function
// ============================================================================

/// Launch the Opsdeck desktop application against a loaded
/// configuration.
///
/// # Example
///
/// ```rust,ignore
/// fn main() {
///     let config = opsdeck_core::AppConfig::load_from("opsdeck.toml").unwrap();
///     opsdeck_ui::launch(config);
/// }
/// ```
pub fn launch(config: AppConfig) {
    tracing::info!(
        base_url = %config.server.base_url,
        "Starting {} v{}",
        NAME,
        VERSION
    );

    let window = config.window.clone();
    let _ = LAUNCH_CONFIG.set(config);

    let custom_head = format!(r#"<style type="text/css">{}</style>"#, STYLES);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new()
                        .with_title(TITLE)
                        .with_resizable(true)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(
                            window.width,
                            window.height,
                        ))
                        .with_min_inner_size(dioxus::desktop::LogicalSize::new(720.0, 480.0)),
                )
                .with_menu(None)
                .with_custom_head(custom_head),
        )
        .launch(App);
}

/// Get the embedded CSS styles
pub fn get_styles() -> &'static str {
    STYLES
}

// ============================================================================
// Tests
// ============================================================================
