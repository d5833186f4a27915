use serde::Serialize;

use super::message::{ConversationTurn, MessageRole};

/// Append-only ordered log of conversation turns.
///
/// Turns are never reordered, edited or removed; sequence numbers are dense
/// and start at zero.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ChatTranscript {
    turns: Vec<ConversationTurn>,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn and returns it with its assigned sequence number.
    pub fn append(&mut self, sender: MessageRole, text: impl Into<String>) -> &ConversationTurn {
        let sequence = self.turns.len();
        self.turns.push(ConversationTurn {
            sender,
            text: text.into(),
            sequence: sequence as u64,
            timestamp: chrono::Utc::now().to_rfc3339(),
        });
        &self.turns[sequence]
    }

    /// Read-only view of every turn, in order.
    pub fn all(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Turns appended at or after `sequence`.
    pub fn since(&self, sequence: u64) -> &[ConversationTurn] {
        let start = usize::try_from(sequence)
            .unwrap_or(usize::MAX)
            .min(self.turns.len());
        &self.turns[start..]
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
