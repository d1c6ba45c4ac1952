//! Conversation history window.

use shared::chat_api::ChatMessage;
use shared::message::{Message, Origin};

/// Number of trailing log entries sent to the assistant (3 exchange pairs).
pub const CONTEXT_WINDOW: usize = 6;

/// Translate the trailing slice of the log into `{role, content}` pairs for
/// the assistant call. Older turns are dropped outright, no summarization.
/// The backend's role vocabulary is "user" | "model".
pub fn context_window(log: &[Message]) -> Vec<ChatMessage> {
    let start = log.len().saturating_sub(CONTEXT_WINDOW);
    log[start..]
        .iter()
        .map(|m| ChatMessage {
            role: match m.origin {
                Origin::User => "user".to_string(),
                Origin::Assistant => "model".to_string(),
            },
            content: m.text.clone(),
        })
        .collect()
}
