//! # Opsdeck Core
//!
//! Core types, traits, and error handling for Opsdeck.
//!
//! This crate provides the foundational building blocks used throughout
//! the Opsdeck console, including:
//!
//! - **Types**: field schemas, record payloads, action descriptors, and
//!   the validation-error map
//! - **Routes**: resource route templates and per-resource configuration
//! - **Config**: the `opsdeck.toml` application configuration
//! - **Errors**: unified error handling with `ConsoleError` and `ConsoleResult`
//!

pub mod config;
pub mod error;
pub mod routes;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{AppConfig, ServerConfig, WindowConfig, CONFIG_FILE};
pub use error::{ConsoleError, ConsoleResult, ResultExt};
pub use routes::{
    ColumnSpec, ResourceConfig, ResourceRoutes, RouteTemplate, SecondaryForm, ID_PLACEHOLDER,
};
pub use traits::Validatable;
pub use types::{
    is_checked_value, json_to_text, ActionDescriptor, ActionKind, FieldKind, FieldRole,
    FieldSpec, FormSchema, HttpMethod, OrderDir, RecordMap, SelectChoice, ValidationErrorSet,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
