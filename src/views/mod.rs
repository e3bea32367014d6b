//! Page view-models.
//!
//! Each page owns a [`ViewScope`]; every request it issues runs inside that
//! scope, so disposing the page cancels in-flight calls and their late
//! results never reach the page state.

pub mod admin;
pub mod client_dashboard;
pub mod notifications;
pub mod scope;
pub mod worker_dashboard;

pub use scope::ViewScope;
