//! Anthropic Messages API types
//!
//! Structs that mirror the provider's JSON request and response format.

use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/messages`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MessagesRequest {
    /// Model identifier
    pub model: String,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// System instruction, sent once outside the message list
    pub system: String,
    /// Alternating user/assistant messages, oldest first
    pub messages: Vec<WireMessage>,
}

/// Two-party role on the wire
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WireRole {
    /// The trainee
    User,
    /// Everyone else (prospect, coach)
    Assistant,
}

/// A single message in the request
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WireMessage {
    /// Who sent it
    pub role: WireRole,
    /// Plain-text content
    pub content: String,
}

/// Top-level successful response
#[derive(Deserialize, Debug)]
pub struct MessagesResponse {
    /// Content blocks produced by the model
    pub content: Vec<ContentBlock>,
    /// Why generation stopped
    #[serde(default)]
    pub stop_reason: Option<String>,
}

/// A content block in the response; only text is used
#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Generated text
    Text {
        /// The text itself
        text: String,
    },
    /// Any other block type (tool use, thinking, ...)
    #[serde(other)]
    Other,
}

impl MessagesResponse {
    /// Concatenate every text block, in order
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

/// Error envelope returned with non-success statuses
#[derive(Deserialize, Debug)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorBody,
}

/// Error details
#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    /// Provider error type (e.g. "rate_limit_error")
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Human-readable message
    pub message: String,
}

/// Pull the human-readable message out of an error body, falling back to the raw text
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(wrapper) if wrapper.error.kind.is_empty() => wrapper.error.message,
        Ok(wrapper) => format!("{} ({})", wrapper.error.message, wrapper.error.kind),
        Err(_) => body.trim().to_string(),
    }
}
