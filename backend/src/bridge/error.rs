//! Bridge-specific error types
//!
//! Errors that can occur while turning a conversation into a completion
//! (configuration, transport, provider status, response decoding).

use thiserror::Error;

/// Errors that can occur during a bridge call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BridgeError {
    /// Required configuration is missing or unusable (e.g. no API key)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The conversation passed to the bridge had no turns
    #[error("Conversation history is empty")]
    EmptyHistory,

    /// Provider kept answering HTTP 429 until the retry budget ran out
    #[error("Rate limited by the model provider after {attempts} attempts: {message}")]
    RateLimited {
        /// Attempts made before giving up
        attempts: u32,
        /// Last error message from the provider
        message: String,
    },

    /// Provider answered HTTP 503
    #[error("Model provider is unavailable: {0}")]
    ServiceUnavailable(String),

    /// Network-level failure (connect, timeout, body read)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Provider answered a non-success status other than 429/503
    #[error("Model provider returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message from the provider
        message: String,
    },

    /// Response body did not match the expected structure
    #[error("Could not decode model response: {0}")]
    Decode(String),
}

impl BridgeError {
    /// Whether a fresh attempt could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BridgeError::RateLimited { .. } | BridgeError::Transport(_) | BridgeError::Status { .. }
        )
    }
}

impl From<reqwest::Error> for BridgeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BridgeError::Transport(format!("request timed out: {}", err))
        } else {
            BridgeError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_kinds() {
        assert!(BridgeError::Transport("reset".into()).is_retryable());
        assert!(BridgeError::Status {
            status: 500,
            message: "boom".into()
        }
        .is_retryable());
        assert!(!BridgeError::ServiceUnavailable("down".into()).is_retryable());
        assert!(!BridgeError::Decode("bad".into()).is_retryable());
        assert!(!BridgeError::Configuration("no key".into()).is_retryable());
    }

    #[test]
    fn test_display_messages() {
        let err = BridgeError::RateLimited {
            attempts: 3,
            message: "slow down".into(),
        };
        assert_eq!(
            err.to_string(),
            "Rate limited by the model provider after 3 attempts: slow down"
        );
    }
}
