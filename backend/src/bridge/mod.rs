//! Conversation bridge module
//!
//! Everything between a conversation and the remote model: request
//! formatting, transport with retry, and completion decoding.

pub mod anthropic_types;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod prompts;
pub mod request;
pub mod retry;

pub use client::ConversationBridge;
pub use config::BridgeConfig;
pub use error::BridgeError;
pub use retry::RetryPolicy;

use crate::session::models::{RubricState, Turn};
use async_trait::async_trait;
use serde::Serialize;

/// Decoded model reply
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BridgeReply {
    /// Text to show in the conversation
    pub display_text: String,
    /// Rubric stages the model judged complete
    pub rubric_state: RubricState,
}

/// Anything that can turn a conversation into a model reply.
///
/// The session layer and HTTP state depend on this trait rather than on
/// [`ConversationBridge`] directly.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send `history` (oldest first) and decode the reply.
    /// `finalize` requests a closing debrief instead of a tracked turn.
    async fn send_turn(&self, history: &[Turn], finalize: bool)
        -> Result<BridgeReply, BridgeError>;
}
