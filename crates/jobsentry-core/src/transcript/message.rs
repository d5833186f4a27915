//! Conversation turn types.

use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// Message typed or uploaded by the user.
    User,
    /// Reply from the assistant, including failure notices.
    Assistant,
}

/// A single message in a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// The role of the message sender.
    pub sender: MessageRole,
    /// The content of the message.
    pub text: String,
    /// Position in the transcript, starting at zero with no gaps.
    pub sequence: u64,
    /// Timestamp when the turn was appended (RFC 3339).
    pub timestamp: String,
}

impl ConversationTurn {
    pub fn is_user(&self) -> bool {
        self.sender == MessageRole::User
    }
}
