//! Session operations
//!
//! `start_session`, `submit_user_turn` and `finish_session`. The caller owns
//! the [`Conversation`] and passes it in; these functions only append turns
//! and update the rubric.

use crate::bridge::{BridgeError, CompletionClient};
use crate::session::catalog;
use crate::session::models::{Conversation, Speaker, Turn};
use thiserror::Error;
use uuid::Uuid;

/// Maximum user message length in characters
pub const MAX_MESSAGE_LENGTH: usize = 10_000;

/// Errors from session operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// Persona id not in the catalog
    #[error("Unknown persona: {0}")]
    UnknownPersona(String),

    /// Industry id not in the catalog
    #[error("Unknown industry: {0}")]
    UnknownIndustry(String),

    /// User submitted only whitespace
    #[error("Message cannot be empty")]
    EmptyMessage,

    /// User message exceeds [`MAX_MESSAGE_LENGTH`]
    #[error("Message exceeds maximum length of {max} characters")]
    MessageTooLong {
        /// The limit
        max: usize,
    },

    /// The closing turn has already been produced
    #[error("Session {0} is already finished")]
    AlreadyFinished(String),

    /// The model call failed
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

/// Validate a user message
///
/// # Returns
/// * `Ok(&str)` - The trimmed message
/// * `Err(SessionError)` - Message is empty or too long
pub fn validate_message(text: &str) -> Result<&str, SessionError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SessionError::EmptyMessage);
    }
    if trimmed.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(SessionError::MessageTooLong {
            max: MAX_MESSAGE_LENGTH,
        });
    }
    Ok(trimmed)
}

/// Start a practice session from the catalog.
///
/// Seeds a coach briefing and the prospect's opening line. No network call.
pub fn start_session(persona: &str, industry: &str) -> Result<Conversation, SessionError> {
    let persona = catalog::find_persona(persona)
        .ok_or_else(|| SessionError::UnknownPersona(persona.to_string()))?;
    let industry = catalog::find_industry(industry)
        .ok_or_else(|| SessionError::UnknownIndustry(industry.to_string()))?;

    let mut conversation = Conversation::new(
        Uuid::new_v4().to_string(),
        persona.id.to_string(),
        industry.id.to_string(),
    );
    conversation.push_turn(Turn::new(
        Speaker::Coach,
        catalog::coach_briefing(persona, industry),
    ));
    conversation.push_turn(Turn::new(
        Speaker::Prospect,
        catalog::prospect_opening(persona, industry),
    ));

    tracing::info!(
        session_id = %conversation.id,
        persona = persona.id,
        industry = industry.id,
        "Practice session started"
    );

    Ok(conversation)
}

/// Append the user's message, ask the model for the prospect's reply, and
/// fold the reported rubric into the session.
///
/// On a bridge failure the user's turn stays appended and nothing else
/// changes, so the caller can resubmit or finish.
pub async fn submit_user_turn(
    client: &dyn CompletionClient,
    conversation: &mut Conversation,
    text: &str,
) -> Result<(), SessionError> {
    if conversation.finished {
        return Err(SessionError::AlreadyFinished(conversation.id.clone()));
    }
    let text = validate_message(text)?;

    conversation.push_turn(Turn::new(Speaker::User, text));

    let reply = client.send_turn(&conversation.turns, false).await.map_err(|e| {
        tracing::error!(
            session_id = %conversation.id,
            turn_count = conversation.turns.len(),
            retryable = e.is_retryable(),
            error = %e,
            "Prospect reply failed"
        );
        e
    })?;

    conversation.push_turn(Turn::new(Speaker::Prospect, reply.display_text));
    conversation.apply_rubric(reply.rubric_state);

    tracing::info!(
        session_id = %conversation.id,
        turn_count = conversation.turns.len(),
        completed_stages = conversation.rubric.completed_count(),
        "Prospect replied"
    );

    Ok(())
}

/// Ask the model for the closing debrief and close the session.
pub async fn finish_session(
    client: &dyn CompletionClient,
    conversation: &mut Conversation,
) -> Result<(), SessionError> {
    if conversation.finished {
        return Err(SessionError::AlreadyFinished(conversation.id.clone()));
    }

    let reply = client.send_turn(&conversation.turns, true).await?;

    conversation.push_turn(Turn::new(Speaker::Coach, reply.display_text));
    conversation.apply_rubric(reply.rubric_state);
    conversation.finished = true;

    tracing::info!(
        session_id = %conversation.id,
        turn_count = conversation.turns.len(),
        "Practice session finished"
    );

    Ok(())
}
