//! Structured commands consumed by the dispatcher
//!
//! Commands arrive from the intent extractor. Each variant carries only the
//! fields it needs; an extraction that yields nothing usable is
//! `Unrecognized`, never a half-filled variant.

use crate::model::GameRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Display the current standings
    ShowLeaderboard,

    /// Record one finished game
    RecordGame(GameRecord),

    /// Extractor named an intent this build has no handler for
    UnknownIntent { name: String },

    /// Nothing usable could be extracted
    Unrecognized,
}

impl Command {
    /// Stable operation name used in logs
    pub fn op_name(&self) -> &'static str {
        match self {
            Command::ShowLeaderboard => "show_leaderboard",
            Command::RecordGame(_) => "record_game",
            Command::UnknownIntent { .. } => "unknown_intent",
            Command::Unrecognized => "unrecognized",
        }
    }

    /// Whether dispatching this command may write the leaderboard
    pub fn is_mutation(&self) -> bool {
        matches!(self, Command::RecordGame(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_names() {
        assert_eq!(Command::ShowLeaderboard.op_name(), "show_leaderboard");
        assert_eq!(
            Command::RecordGame(GameRecord::default()).op_name(),
            "record_game"
        );
        assert_eq!(Command::Unrecognized.op_name(), "unrecognized");
    }

    #[test]
    fn test_only_record_game_mutates() {
        assert!(Command::RecordGame(GameRecord::default()).is_mutation());
        assert!(!Command::ShowLeaderboard.is_mutation());
        assert!(!Command::UnknownIntent {
            name: "roll_dice".to_string()
        }
        .is_mutation());
    }
}
