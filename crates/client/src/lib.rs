//! # Opsdeck Client
//!
//! HTTP layer for the Opsdeck console.
//!
//! This crate owns everything between the UI and the backend's wire
//! format:
//!
//! - **ApiClient**: CSRF-aware request dispatch with URL-encoded and
//!   multipart bodies
//! - **Response normalization**: every reply becomes one canonical
//!   [`ApiOutcome`], whatever shape the backend chose
//! - **Grid protocol**: DataTables-style server-side paging queries and
//!   page parsing
//!

pub mod client;
pub mod csrf;
pub mod grid;
pub mod response;

// Re-export commonly used items at crate root
pub use client::{ApiClient, ClientError, ClientResult, FilePart, MultipartBody, RequestBody};
pub use csrf::{CSRF_COOKIE, CSRF_HEADER};
pub use grid::{GridPage, GridQuery};
pub use response::ApiOutcome;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
