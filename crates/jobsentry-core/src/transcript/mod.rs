//! Conversation transcript of a screen session.
//!
//! The transcript is an append-only record of everything shown in a chat
//! view, successes and failures alike. It lives as long as the screen that
//! owns it and is never persisted.

mod message;
mod model;

pub use message::{ConversationTurn, MessageRole};
pub use model::ChatTranscript;
