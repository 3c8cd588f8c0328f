//! Game record command payload
//!
//! `GameRecord` is what the intent extractor hands over: possibly empty, never
//! null. `ValidGame` only comes out of `rules::validation::validate_game`.

use serde::{Deserialize, Deserializer, Serialize};

/// Unvalidated game outcome as extracted from a message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Players who took part, in the order they were mentioned
    #[serde(
        rename = "players",
        alias = "participants",
        default,
        deserialize_with = "null_as_default"
    )]
    pub participants: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub winner: String,
}

impl GameRecord {
    pub fn new<I, S>(participants: I, winner: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            participants: participants.into_iter().map(Into::into).collect(),
            winner: winner.into(),
        }
    }
}

/// A game that passed validation: non-empty distinct participants, winner among them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidGame {
    participants: Vec<String>,
    winner: String,
}

impl ValidGame {
    pub(crate) fn new_unchecked(participants: Vec<String>, winner: String) -> Self {
        Self {
            participants,
            winner,
        }
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn winner(&self) -> &str {
        &self.winner
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
