//! Scoreline Core - ledger domain kernel
//!
//! Pure, I/O-free building blocks shared by the store and the engine:
//! - Leaderboard, game record and conversation turn models
//! - The `Command` inventory produced by intent extraction
//! - Validation rules and the ledger mutation they guard
//! - Leaderboard rendering and reply texts
//! - Error and logging facilities

pub mod apply;
pub mod commands;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod policy;
pub mod render;
pub mod rules;

// Re-export commonly used types
pub use apply::apply_game;
pub use commands::Command;
pub use errors::{ExError, ExErrorKind, Result, ScorelineError};
pub use model::{ConversationTurn, GameRecord, Leaderboard, Role, ValidGame};
pub use policy::UnknownIntentPolicy;
