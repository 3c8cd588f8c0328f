use crate::model::Leaderboard;
use crate::render::replies;

/// Appended to every row tied at the top score
pub const LEADER_MARKER: &str = "👑";

/// Render standings as chat text
///
/// Rows are ordered by wins descending, ties in encounter order. Ranks use
/// competition numbering, so tied rows share a rank. An empty leaderboard
/// renders the fixed empty-state message.
///
/// ```
/// use scoreline_core::model::Leaderboard;
/// use scoreline_core::render::render_leaderboard;
///
/// let board: Leaderboard = vec![("A".to_string(), 1), ("B".to_string(), 2)]
///     .into_iter()
///     .collect();
/// let text = render_leaderboard(&board);
/// assert!(text.contains("1. B: 2 wins 👑"));
/// assert!(text.contains("2. A: 1 win\n") || text.ends_with("2. A: 1 win"));
/// ```
pub fn render_leaderboard(board: &Leaderboard) -> String {
    if board.is_empty() {
        return replies::EMPTY_LEADERBOARD.to_string();
    }

    let standings = board.standings();
    let mut lines = Vec::with_capacity(standings.len() + 1);
    lines.push("🏆 Leaderboard".to_string());

    let mut rank = 0;
    let mut previous_wins = None;
    for (idx, row) in standings.iter().enumerate() {
        if previous_wins != Some(row.wins) {
            rank = idx + 1;
            previous_wins = Some(row.wins);
        }
        let mut line = format!("{}. {}: {}", rank, row.player, wins_label(row.wins));
        if row.leader {
            line.push(' ');
            line.push_str(LEADER_MARKER);
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// "1 win" / "3 wins"
pub fn wins_label(wins: u64) -> String {
    if wins == 1 {
        "1 win".to_string()
    } else {
        format!("{} wins", wins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[(&str, u64)]) -> Leaderboard {
        rows.iter().map(|(p, w)| (p.to_string(), *w)).collect()
    }

    #[test]
    fn test_empty_board_renders_fixed_message() {
        assert_eq!(
            render_leaderboard(&Leaderboard::new()),
            replies::EMPTY_LEADERBOARD
        );
    }

    #[test]
    fn test_reference_board_rendering() {
        let text = render_leaderboard(&board(&[("A", 1), ("B", 2), ("C", 0)]));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec!["🏆 Leaderboard", "1. B: 2 wins 👑", "2. A: 1 win", "3. C: 0 wins"]
        );
    }

    #[test]
    fn test_ties_share_rank_and_marker() {
        let text = render_leaderboard(&board(&[("A", 2), ("B", 2), ("C", 1)]));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[1], "1. A: 2 wins 👑");
        assert_eq!(lines[2], "1. B: 2 wins 👑");
        assert_eq!(lines[3], "3. C: 1 win");
    }

    #[test]
    fn test_all_zero_board_has_no_leader() {
        let text = render_leaderboard(&board(&[("A", 0)]));
        assert!(!text.contains(LEADER_MARKER));
    }
}
