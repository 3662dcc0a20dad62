//! Error types and error handling for the application
//!
//! This module defines the HTTP-facing error type. All errors implement
//! `IntoResponse` to provide consistent error formatting.

use crate::bridge::BridgeError;
use crate::session::{Conversation, SessionError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// A session operation failed before or without reaching the model
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A model call failed mid-turn. The conversation carries the user's
    /// already-appended turn so the client can resubmit.
    #[error("{source}")]
    TurnFailed {
        /// Underlying bridge failure
        source: BridgeError,
        /// Conversation state after the failed turn
        conversation: Box<Conversation>,
    },
}

impl AppError {
    /// Wrap a session error together with the conversation it left behind
    pub fn with_conversation(error: SessionError, conversation: Conversation) -> Self {
        match error {
            SessionError::Bridge(source) => AppError::TurnFailed {
                source,
                conversation: Box::new(conversation),
            },
            other => AppError::Session(other),
        }
    }

    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Session(SessionError::Bridge(e)) | AppError::TurnFailed { source: e, .. } => {
                bridge_status(e)
            }
            AppError::Session(SessionError::AlreadyFinished(_)) => StatusCode::CONFLICT,
            AppError::Session(_) => StatusCode::BAD_REQUEST,
        }
    }
}

fn bridge_status(error: &BridgeError) -> StatusCode {
    match error {
        BridgeError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        BridgeError::EmptyHistory => StatusCode::BAD_REQUEST,
        BridgeError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        BridgeError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        BridgeError::Transport(_) | BridgeError::Status { .. } | BridgeError::Decode(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = self.to_string();

        let body = match self {
            AppError::TurnFailed { conversation, .. } => json!({
                "error": error_message,
                "status": status.as_u16(),
                "conversation": conversation,
            }),
            _ => json!({
                "error": error_message,
                "status": status.as_u16(),
            }),
        };

        (status, Json(body)).into_response()
    }
}
