use crate::errors::{Result, ScorelineError};
use crate::model::{GameRecord, ValidGame};

/// Validate a game record before it may touch the leaderboard
///
/// Checks, in order, each failure short-circuiting:
///
/// 1. participants non-empty, no empty ids, winner non-empty
/// 2. winner is one of the participants
///
/// Repeated participants are collapsed to their first mention; the ledger
/// effect of a duplicate is the same as a single mention.
///
/// # Errors
/// - `MissingPlayersOrWinner` for rule 1
/// - `WinnerNotInParticipants` for rule 2
pub fn validate_game(record: &GameRecord) -> Result<ValidGame> {
    if record.participants.is_empty()
        || record.winner.is_empty()
        || record.participants.iter().any(String::is_empty)
    {
        return Err(ScorelineError::MissingPlayersOrWinner);
    }

    let mut participants: Vec<String> = Vec::with_capacity(record.participants.len());
    for player in &record.participants {
        if !participants.contains(player) {
            participants.push(player.clone());
        }
    }

    if !participants.contains(&record.winner) {
        return Err(ScorelineError::WinnerNotInParticipants {
            winner: record.winner.clone(),
            participants,
        });
    }

    Ok(ValidGame::new_unchecked(participants, record.winner.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_game_passes() {
        let game = validate_game(&GameRecord::new(["A", "B", "C"], "B")).unwrap();
        assert_eq!(game.winner(), "B");
        assert_eq!(game.participants().len(), 3);
    }

    #[test]
    fn test_empty_participants_rejected() {
        let err = validate_game(&GameRecord::new(Vec::<String>::new(), "A")).unwrap_err();
        assert_eq!(err, ScorelineError::MissingPlayersOrWinner);
    }

    #[test]
    fn test_missing_winner_rejected() {
        let err = validate_game(&GameRecord::new(["A"], "")).unwrap_err();
        assert_eq!(err, ScorelineError::MissingPlayersOrWinner);
    }

    #[test]
    fn test_blank_participant_rejected() {
        let err = validate_game(&GameRecord::new(["A", ""], "A")).unwrap_err();
        assert_eq!(err, ScorelineError::MissingPlayersOrWinner);
    }

    #[test]
    fn test_missing_fields_checked_before_membership() {
        // Both rules fail; rule 1 wins
        let err = validate_game(&GameRecord::new(Vec::<String>::new(), "Z")).unwrap_err();
        assert_eq!(err, ScorelineError::MissingPlayersOrWinner);
    }

    #[test]
    fn test_winner_outside_participants_rejected() {
        let err = validate_game(&GameRecord::new(["A", "B"], "Z")).unwrap_err();
        assert_eq!(
            err,
            ScorelineError::WinnerNotInParticipants {
                winner: "Z".to_string(),
                participants: vec!["A".to_string(), "B".to_string()],
            }
        );
    }

    #[test]
    fn test_winner_match_is_case_sensitive() {
        assert!(validate_game(&GameRecord::new(["ann"], "Ann")).is_err());
    }

    #[test]
    fn test_duplicates_collapse_to_first_mention() {
        let game = validate_game(&GameRecord::new(["B", "A", "B"], "A")).unwrap();
        assert_eq!(game.participants(), &["B".to_string(), "A".to_string()]);
    }
}
