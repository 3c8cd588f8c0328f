//! Human-readable output: leaderboard text and reply messages

pub mod leaderboard_render;
pub mod replies;

pub use leaderboard_render::{render_leaderboard, LEADER_MARKER};
