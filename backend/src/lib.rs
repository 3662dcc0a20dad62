//! SOLVE Coach Backend Library
//!
//! Conversation bridge, practice-session operations and the HTTP surface.
//! The server binary is in `src/main.rs`.

pub mod api;
pub mod bridge;
pub mod config;
pub mod error;
pub mod session;
/// Application state shared by HTTP handlers
pub mod state;
