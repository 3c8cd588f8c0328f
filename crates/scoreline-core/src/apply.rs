//! Pure ledger mutation for a validated game
//!
//! `apply_game` never fails: everything that could reject a game has already
//! been checked by `validate_game`, which is the only way to obtain a
//! `ValidGame`.

use crate::model::{Leaderboard, ValidGame};

/// Ensure every participant has an entry, then add one win for the winner
///
/// Returns the winner's new count.
///
/// ```
/// use scoreline_core::apply::apply_game;
/// use scoreline_core::model::{GameRecord, Leaderboard};
/// use scoreline_core::rules::validation::validate_game;
///
/// let mut board = Leaderboard::new();
/// let game = validate_game(&GameRecord::new(["A", "B"], "A")).unwrap();
/// assert_eq!(apply_game(&mut board, &game), 1);
/// assert_eq!(board.wins("B"), Some(0));
/// ```
pub fn apply_game(board: &mut Leaderboard, game: &ValidGame) -> u64 {
    for player in game.participants() {
        board.ensure_player(player);
    }
    board.record_win(game.winner())
}
