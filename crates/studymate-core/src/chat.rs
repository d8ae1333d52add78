//! Chat message types for the doubt workflow.
//!
//! The chat transcript is an append-only, gap-free log of user doubts and
//! assistant answers (including answers that report a failure). Messages are
//! addressed by id, never by position, so out-of-order completions cannot
//! corrupt the transcript.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// A doubt submitted by the user.
    User,
    /// An answer (or error report) from the AI assistant.
    Assistant,
}

/// A single message in the doubt chat, scoped to the current page's
/// explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message identifier (UUID format).
    pub id: String,
    /// The author of the message.
    pub role: MessageRole,
    /// The message content.
    pub text: String,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
}

impl ChatMessage {
    fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Creates a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageRole::User, text)
    }

    /// Creates an assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, text)
    }
}
