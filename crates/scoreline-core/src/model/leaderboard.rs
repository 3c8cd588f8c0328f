//! Leaderboard model
//!
//! Maps player ids to win counts. Keys are opaque and case-sensitive. Entries
//! keep the order in which players were first encountered; that order is not
//! meaningful on its own but breaks ties deterministically when standings are
//! computed.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Player id to win count mapping, in encounter order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<(String, u64)>,
}

/// One row of computed standings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub player: String,
    pub wins: u64,
    /// Tied at the maximum win count (only when that maximum is non-zero)
    pub leader: bool,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Win count for `player`, `None` if they have no entry
    pub fn wins(&self, player: &str) -> Option<u64> {
        self.position(player).map(|i| self.entries[i].1)
    }

    pub fn contains(&self, player: &str) -> bool {
        self.position(player).is_some()
    }

    /// Give `player` an entry at 0 wins if absent; returns true if inserted
    pub fn ensure_player(&mut self, player: &str) -> bool {
        if self.contains(player) {
            return false;
        }
        self.entries.push((player.to_string(), 0));
        true
    }

    /// Increment `player`'s wins by one, creating the entry if needed
    ///
    /// Returns the new count.
    pub fn record_win(&mut self, player: &str) -> u64 {
        let idx = match self.position(player) {
            Some(idx) => idx,
            None => {
                self.entries.push((player.to_string(), 0));
                self.entries.len() - 1
            }
        };
        let slot = &mut self.entries[idx].1;
        *slot = slot.saturating_add(1);
        *slot
    }

    /// Set a count directly, keeping the entry's position if it exists
    pub fn set_wins(&mut self, player: &str, wins: u64) {
        match self.position(player) {
            Some(idx) => self.entries[idx].1 = wins,
            None => self.entries.push((player.to_string(), wins)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(p, w)| (p.as_str(), *w))
    }

    /// Highest win count, `None` when empty
    pub fn top_score(&self) -> Option<u64> {
        self.entries.iter().map(|(_, w)| *w).max()
    }

    /// Entries sorted by wins descending; ties keep encounter order
    pub fn standings(&self) -> Vec<Standing> {
        let top = self.top_score().unwrap_or(0);
        let mut rows: Vec<Standing> = self
            .entries
            .iter()
            .map(|(player, wins)| Standing {
                player: player.clone(),
                wins: *wins,
                leader: top > 0 && *wins == top,
            })
            .collect();
        // sort_by is stable
        rows.sort_by(|a, b| b.wins.cmp(&a.wins));
        rows
    }

    fn position(&self, player: &str) -> Option<usize> {
        self.entries.iter().position(|(p, _)| p == player)
    }
}

impl FromIterator<(String, u64)> for Leaderboard {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut board = Leaderboard::new();
        for (player, wins) in iter {
            board.set_wins(&player, wins);
        }
        board
    }
}

impl Serialize for Leaderboard {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (player, wins) in &self.entries {
            map.serialize_entry(player, wins)?;
        }
        map.end()
    }
}

struct LeaderboardVisitor;

impl<'de> Visitor<'de> for LeaderboardVisitor {
    type Value = Leaderboard;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping player ids to non-negative win counts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut board = Leaderboard::new();
        // Document order is encounter order; a repeated key keeps its first slot.
        while let Some((player, wins)) = access.next_entry::<String, u64>()? {
            board.set_wins(&player, wins);
        }
        Ok(board)
    }
}

impl<'de> Deserialize<'de> for Leaderboard {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(LeaderboardVisitor)
    }
}
