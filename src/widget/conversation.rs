//! Conversation store — the append-only message thread of one widget.
//!
//! DESIGN
//! ======
//! Messages are never mutated or removed. The `pending` flag is true exactly
//! while one agent request is in flight and gates new user messages, so an
//! assistant reply always lands directly after the user message that caused
//! it.

use serde::Serialize;
use time::OffsetDateTime;

// =============================================================================
// MESSAGE
// =============================================================================

/// Who authored a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single conversation message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Why a user message was not appended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    #[error("message is empty")]
    Empty,
    #[error("a request is already pending")]
    Pending,
    /// Raised by the widget controller, never by the store itself.
    #[error("widget has been torn down")]
    Unmounted,
}

// =============================================================================
// CONVERSATION
// =============================================================================

#[derive(Clone, Debug)]
pub struct Conversation {
    messages: Vec<Message>,
    pending: bool,
    next_id: u64,
}

impl Conversation {
    /// Seed a conversation with one assistant welcome message.
    #[must_use]
    pub fn new(welcome: &str) -> Self {
        let mut conversation = Self { messages: Vec::new(), pending: false, next_id: 1 };
        conversation.push(Role::Assistant, welcome);
        conversation
    }

    /// Append a user message and mark a request as pending.
    ///
    /// # Errors
    ///
    /// Rejects whitespace-only text and any text while a request is pending.
    /// A rejection leaves the conversation untouched.
    pub fn append_user_message(&mut self, text: &str) -> Result<&Message, SubmitRejected> {
        if self.pending {
            return Err(SubmitRejected::Pending);
        }
        if text.trim().is_empty() {
            return Err(SubmitRejected::Empty);
        }
        self.pending = true;
        Ok(self.push(Role::User, text))
    }

    /// Append the reply that closes the current request cycle.
    pub fn append_assistant_message(&mut self, text: &str) -> &Message {
        self.pending = false;
        self.push(Role::Assistant, text)
    }

    fn push(&mut self, role: Role, content: &str) -> &Message {
        let id = self.next_id.to_string();
        self.next_id += 1;
        self.messages.push(Message {
            id,
            content: content.to_string(),
            role,
            timestamp: OffsetDateTime::now_utc(),
        });
        &self.messages[self.messages.len() - 1]
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: a conversation starts with its welcome message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;
