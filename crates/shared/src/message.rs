//! Message and message-log types for the chat widget.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Assistant,
}

/// One entry in the conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Sequence number within the session. Strictly increasing, not
    /// globally unique, not persisted.
    pub id: u64,
    pub text: String,
    pub origin: Origin,
    pub timestamp: DateTime<Utc>,
    /// True only for assistant messages that ask the user to sign in.
    pub is_auth_prompt: bool,
}

impl Message {
    pub fn is_user(&self) -> bool {
        self.origin == Origin::User
    }
}

/// Append-only log of one widget session's messages.
///
/// There is deliberately no way to edit or remove an entry; the controller
/// is the only caller and ids are handed out by the log itself.
#[derive(Debug)]
pub struct MessageLog {
    entries: Vec<Message>,
    next_id: u64,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    fn push(&mut self, text: String, origin: Origin, is_auth_prompt: bool) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Message {
            id,
            text,
            origin,
            timestamp: Utc::now(),
            is_auth_prompt,
        });
        id
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> u64 {
        self.push(text.into(), Origin::User, false)
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) -> u64 {
        self.push(text.into(), Origin::Assistant, false)
    }

    pub fn push_auth_prompt(&mut self, text: impl Into<String>) -> u64 {
        self.push(text.into(), Origin::Assistant, true)
    }

    pub fn entries(&self) -> &[Message] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.entries.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_strictly_increasing() {
        let mut log = MessageLog::new();
        let a = log.push_assistant("hello");
        let b = log.push_user("hi");
        let c = log.push_assistant("how can I help?");
        assert!(a < b && b < c);
        let ids: Vec<u64> = log.entries().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn auth_prompt_flag_only_on_auth_messages() {
        let mut log = MessageLog::new();
        log.push_assistant("hello");
        log.push_auth_prompt("please sign in");
        assert!(!log.entries()[0].is_auth_prompt);
        assert!(log.entries()[1].is_auth_prompt);
        assert_eq!(log.entries()[1].origin, Origin::Assistant);
    }
}
