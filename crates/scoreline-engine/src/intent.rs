//! Intent extraction boundary
//!
//! The extractor turns free text (plus recent conversation) into a
//! `Command`. Real extractors call out to a language model using function
//! calling; the engine only sees the decoded result. An extractor is allowed
//! to fail, and the pipeline treats any failure as `Command::Unrecognized`.

use scoreline_core::errors::{ExError, ExErrorKind, ScorelineError};
use scoreline_core::model::{ConversationTurn, GameRecord};
use scoreline_core::Command;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SHOW_LEADERBOARD: &str = "show_leaderboard";
pub const RECORD_GAME: &str = "record_game";

/// What an extractor returns
pub type ExtractResult = std::result::Result<Command, ExError>;

/// Turns message text into a structured command
pub trait IntentExtractor: Send + Sync {
    /// `context` holds the most recent turns, oldest first; the message
    /// being handled is its last element when history is enabled.
    ///
    /// # Errors
    ///
    /// Any extraction failure; callers degrade it to `Command::Unrecognized`.
    fn extract(&self, text: &str, context: &[ConversationTurn]) -> ExtractResult;
}

impl<F> IntentExtractor for F
where
    F: Fn(&str, &[ConversationTurn]) -> ExtractResult + Send + Sync,
{
    fn extract(&self, text: &str, context: &[ConversationTurn]) -> ExtractResult {
        self(text, context)
    }
}

/// A function call as produced by a function-calling model
///
/// `arguments` may be a JSON object or a string holding one, which is how
/// most chat-completion APIs deliver them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Strict decoding
    ///
    /// Absent or null `players`/`winner` decode to empty values, which
    /// validation later rejects as missing.
    ///
    /// # Errors
    ///
    /// - `UnknownIntent` for a name outside the known set
    /// - `MalformedArguments` when `record_game` arguments do not decode
    pub fn decode(&self) -> scoreline_core::Result<Command> {
        match self.name.as_str() {
            SHOW_LEADERBOARD => Ok(Command::ShowLeaderboard),
            RECORD_GAME => decode_game(&self.arguments).map(Command::RecordGame),
            other => Err(ScorelineError::UnknownIntent {
                name: other.to_string(),
            }),
        }
    }

    /// Lenient decoding used by the pipeline
    pub fn to_command(&self) -> Command {
        if self.name.trim().is_empty() {
            return Command::Unrecognized;
        }
        match self.decode() {
            Ok(command) => command,
            Err(ScorelineError::UnknownIntent { name }) => Command::UnknownIntent { name },
            Err(err) => {
                tracing::debug!(intent = %self.name, reason = %err, "function call not decodable");
                Command::Unrecognized
            }
        }
    }
}

fn decode_game(arguments: &Value) -> scoreline_core::Result<GameRecord> {
    let malformed = |e: serde_json::Error| ScorelineError::MalformedArguments {
        reason: e.to_string(),
    };
    match arguments {
        Value::Null => Ok(GameRecord::default()),
        Value::String(raw) => serde_json::from_str(raw).map_err(malformed),
        other => GameRecord::deserialize(other).map_err(malformed),
    }
}

/// Reads each message as a JSON `FunctionCall`
///
/// Used for replaying already-extracted calls and by the CLI. Blank text
/// and `null` mean "no command".
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionCallExtractor;

impl IntentExtractor for FunctionCallExtractor {
    fn extract(&self, text: &str, _context: &[ConversationTurn]) -> ExtractResult {
        let text = text.trim();
        if text.is_empty() || text == "null" {
            return Ok(Command::Unrecognized);
        }
        let call: FunctionCall = serde_json::from_str(text).map_err(|e| {
            ExError::new(ExErrorKind::InvalidInput)
                .with_op("extract_intent")
                .with_message(format!("not a function call: {}", e))
        })?;
        Ok(call.to_command())
    }
}
