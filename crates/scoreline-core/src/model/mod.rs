//! Domain model

pub mod conversation;
pub mod game;
pub mod leaderboard;

pub use conversation::{ConversationTurn, Role, DEFAULT_HISTORY_CAP};
pub use game::{GameRecord, ValidGame};
pub use leaderboard::{Leaderboard, Standing};
