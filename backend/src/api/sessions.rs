//! Practice session API handlers
//!
//! The client holds the conversation and sends it with every call; each
//! handler returns the updated conversation.

use crate::error::AppError;
use crate::session::{self, Conversation};
use crate::state::SharedState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;

/// Start session request
#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    /// Persona catalog id
    pub persona: String,
    /// Industry catalog id
    pub industry: String,
}

/// Submit turn request
#[derive(Debug, Deserialize)]
pub struct SubmitTurnRequest {
    /// Conversation as last returned by the server
    pub conversation: Conversation,
    /// The trainee's message
    pub message: String,
}

/// Finish session request
#[derive(Debug, Deserialize)]
pub struct FinishSessionRequest {
    /// Conversation as last returned by the server
    pub conversation: Conversation,
}

/// POST /api/sessions - Start a practice session
pub async fn start_session(
    Json(request): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<Conversation>), AppError> {
    let conversation = session::start_session(&request.persona, &request.industry)?;
    Ok((StatusCode::CREATED, Json(conversation)))
}

/// POST /api/sessions/turn - Submit the trainee's message and get the prospect's reply
pub async fn submit_turn(
    State(state): State<SharedState>,
    Json(request): Json<SubmitTurnRequest>,
) -> Result<Json<Conversation>, AppError> {
    let mut conversation = request.conversation;

    match session::submit_user_turn(state.client.as_ref(), &mut conversation, &request.message)
        .await
    {
        Ok(()) => Ok(Json(conversation)),
        Err(e) => Err(AppError::with_conversation(e, conversation)),
    }
}

/// POST /api/sessions/finish - Close the session with a coach debrief
pub async fn finish_session(
    State(state): State<SharedState>,
    Json(request): Json<FinishSessionRequest>,
) -> Result<Json<Conversation>, AppError> {
    let mut conversation = request.conversation;

    match session::finish_session(state.client.as_ref(), &mut conversation).await {
        Ok(()) => Ok(Json(conversation)),
        Err(e) => Err(AppError::with_conversation(e, conversation)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_session_handler() {
        let request = StartSessionRequest {
            persona: "operations-manager".to_string(),
            industry: "manufacturing".to_string(),
        };
        let (status, Json(conversation)) = start_session(Json(request)).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(conversation.persona, "operations-manager");
        assert_eq!(conversation.turns.len(), 2);
    }

    #[tokio::test]
    async fn test_start_session_handler_unknown_persona() {
        let request = StartSessionRequest {
            persona: "wizard".to_string(),
            industry: "manufacturing".to_string(),
        };
        let error = start_session(Json(request)).await.unwrap_err();
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }
}
