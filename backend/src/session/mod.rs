//! Session module
//!
//! Conversation model, persona/industry catalog, and the operations the UI
//! layer calls to drive a practice session.

pub mod catalog;
pub mod flow;
pub mod models;

pub use flow::{finish_session, start_session, submit_user_turn, SessionError};
pub use models::{Conversation, RubricStage, RubricState, Speaker, Turn};
