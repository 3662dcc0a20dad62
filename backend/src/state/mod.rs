//! Application state
//!
//! Shared, read-only state handed to HTTP handlers.

pub mod app_state;

pub use app_state::{AppState, SharedState};
