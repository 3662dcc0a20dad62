//! Request formatting
//!
//! Maps a conversation onto the provider's two-party message list.

use crate::bridge::anthropic_types::{MessagesRequest, WireMessage, WireRole};
use crate::bridge::config::BridgeConfig;
use crate::bridge::prompts::{system_prompt, CALL_KICKOFF, CALL_WRAP_UP};
use crate::session::models::{Speaker, Turn};

/// Wire role for a speaker: the trainee is `user`, everyone else is the other party
pub fn wire_role(speaker: Speaker) -> WireRole {
    match speaker {
        Speaker::User => WireRole::User,
        Speaker::Coach | Speaker::Prospect => WireRole::Assistant,
    }
}

/// Convert turns into alternating wire messages.
///
/// Adjacent turns with the same wire role are merged with a blank line between
/// them, and a kickoff user message is inserted when the first turn belongs to
/// the other party.
pub fn map_history(history: &[Turn]) -> Vec<WireMessage> {
    let mut messages: Vec<WireMessage> = Vec::with_capacity(history.len() + 1);

    for turn in history {
        let text = turn.text.trim();
        if text.is_empty() {
            continue;
        }
        push_merged(&mut messages, wire_role(turn.speaker), text);
    }

    if messages.first().map(|m| m.role) == Some(WireRole::Assistant) {
        messages.insert(
            0,
            WireMessage {
                role: WireRole::User,
                content: CALL_KICKOFF.to_string(),
            },
        );
    }

    messages
}

fn push_merged(messages: &mut Vec<WireMessage>, role: WireRole, text: &str) {
    match messages.last_mut() {
        Some(last) if last.role == role => {
            last.content.push_str("\n\n");
            last.content.push_str(text);
        }
        _ => messages.push(WireMessage {
            role,
            content: text.to_string(),
        }),
    }
}

/// Build the full request body for a turn.
///
/// A closing request always ends on a user message carrying the wrap-up cue.
/// An empty history stays empty.
pub fn build_request(config: &BridgeConfig, history: &[Turn], finalize: bool) -> MessagesRequest {
    let mut messages = map_history(history);
    if finalize && !messages.is_empty() {
        push_merged(&mut messages, WireRole::User, CALL_WRAP_UP);
    }

    MessagesRequest {
        model: config.model.clone(),
        max_tokens: config.max_tokens,
        temperature: config.temperature,
        system: system_prompt(finalize).to_string(),
        messages,
    }
}
