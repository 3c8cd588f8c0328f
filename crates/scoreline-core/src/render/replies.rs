//! Fixed and templated reply texts

use crate::errors::ScorelineError;
use crate::model::ValidGame;
use crate::render::leaderboard_render::wins_label;

pub const EMPTY_LEADERBOARD: &str =
    "The leaderboard is empty. Tell me who won a game to get it started!";

pub const MISSING_PLAYERS_OR_WINNER: &str =
    "I couldn't find the players or the winner in that message. Try something like \"Ann, Bo and Cy played, Bo won\".";

pub const UNRECOGNIZED: &str =
    "Sorry, I couldn't understand that. You can ask for the leaderboard or tell me who won a game.";

pub const UNKNOWN_INTENT: &str = "Sorry, I didn't understand what you wanted me to do.";

pub const SAVE_FAILED: &str =
    "I couldn't save that result right now, so nothing was recorded. Please try again.";

/// Success text after a game was written
pub fn game_recorded(game: &ValidGame, winner_total: u64) -> String {
    format!(
        "Recorded a win for {} (players: {}). {} now has {}.",
        game.winner(),
        game.participants().join(", "),
        game.winner(),
        wins_label(winner_total)
    )
}

/// Rejection text for a validation failure
pub fn rejection(err: &ScorelineError) -> String {
    match err {
        ScorelineError::MissingPlayersOrWinner => MISSING_PLAYERS_OR_WINNER.to_string(),
        ScorelineError::WinnerNotInParticipants {
            winner,
            participants,
        } => format!(
            "{} isn't one of the players ({}), so I didn't record anything.",
            winner,
            participants.join(", ")
        ),
        ScorelineError::UnknownIntent { .. } => UNKNOWN_INTENT.to_string(),
        ScorelineError::MalformedArguments { .. } => UNRECOGNIZED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GameRecord;
    use crate::rules::validation::validate_game;

    #[test]
    fn test_game_recorded_names_winner_and_players() {
        let game = validate_game(&GameRecord::new(["A", "B"], "A")).unwrap();
        let text = game_recorded(&game, 3);
        assert!(text.contains("win for A"));
        assert!(text.contains("players: A, B"));
        assert!(text.contains("3 wins"));
    }

    #[test]
    fn test_rejection_names_winner_and_players() {
        let text = rejection(&ScorelineError::WinnerNotInParticipants {
            winner: "Zed".to_string(),
            participants: vec!["Ann".to_string(), "Bo".to_string()],
        });
        assert!(text.starts_with("Zed isn't one of the players (Ann, Bo)"));
    }
}
