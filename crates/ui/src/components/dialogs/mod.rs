//! Modal dialogs: the generic record form and the destructive-action
//! confirmation.

pub mod confirm_action;
pub mod record_form;

pub use confirm_action::ConfirmActionDialog;
pub use record_form::RecordFormDialog;
