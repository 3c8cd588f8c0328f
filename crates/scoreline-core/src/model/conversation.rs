//! Conversation turns and the bounded history window

use serde::{Deserialize, Serialize};

/// Maximum number of turns kept in the conversation log
pub const DEFAULT_HISTORY_CAP: usize = 1000;

/// Who authored a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the conversation log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Drop the oldest turns so at most `cap` remain; returns how many were dropped
///
/// A sequence already within the cap is left untouched.
pub fn retain_recent<T>(turns: &mut Vec<T>, cap: usize) -> usize {
    let excess = turns.len().saturating_sub(cap);
    if excess > 0 {
        turns.drain(..excess);
    }
    excess
}

/// The most recent `n` turns, oldest first
pub fn recent<T>(turns: &[T], n: usize) -> &[T] {
    &turns[turns.len().saturating_sub(n)..]
}
