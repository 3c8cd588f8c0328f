use scoreline_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using ScorelineError
pub type Result<T> = std::result::Result<T, ScorelineError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable code used in logs and by callers that need to
/// branch on the failure class without matching message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    MissingField,
    NotAParticipant,

    // Extraction
    UnknownIntent,
    ExternalService,

    // Storage
    Io,
    Serialization,
    Persistence,
    Timeout,
    Concurrency,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::NotAParticipant => "ERR_NOT_A_PARTICIPANT",
            ExErrorKind::UnknownIntent => "ERR_UNKNOWN_INTENT",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification plus optional context (operation, player, file
/// path, correlation ids) for logs and for callers.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    player: Option<String>,
    path: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            player: None,
            path: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add player context
    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.player = Some(player.into());
        self
    }

    /// Add file path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn player(&self) -> Option<&str> {
        self.player.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(player) = &self.player {
            write!(f, " (player: {})", player)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(source) = &self.source {
            write!(f, " <- {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised while validating and applying commands
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScorelineError {
    /// Participant list empty/absent, or winner absent
    #[error("Game record is missing its players or winner")]
    MissingPlayersOrWinner,

    /// Winner does not appear among the participants
    #[error("Winner {winner} is not one of the players: {}", .participants.join(", "))]
    WinnerNotInParticipants {
        winner: String,
        participants: Vec<String>,
    },

    /// Extractor produced a structured intent with a name nobody handles
    #[error("Unknown intent: {name}")]
    UnknownIntent { name: String },

    /// Extractor produced arguments that do not decode
    #[error("Malformed intent arguments: {reason}")]
    MalformedArguments { reason: String },
}

impl From<ScorelineError> for ExError {
    fn from(err: ScorelineError) -> Self {
        match err {
            ScorelineError::MissingPlayersOrWinner => ExError::new(ExErrorKind::MissingField)
                .with_op("validate_game")
                .with_message("Players or winner missing"),

            ScorelineError::WinnerNotInParticipants {
                winner,
                participants,
            } => ExError::new(ExErrorKind::NotAParticipant)
                .with_op("validate_game")
                .with_player(winner)
                .with_message(format!(
                    "Winner is not among players [{}]",
                    participants.join(", ")
                )),

            ScorelineError::UnknownIntent { name } => ExError::new(ExErrorKind::UnknownIntent)
                .with_op("decode_intent")
                .with_message(format!("No handler for intent '{}'", name)),

            ScorelineError::MalformedArguments { reason } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("decode_intent")
                    .with_message(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let kinds = [
            ExErrorKind::InvalidInput,
            ExErrorKind::MissingField,
            ExErrorKind::NotAParticipant,
            ExErrorKind::UnknownIntent,
            ExErrorKind::ExternalService,
            ExErrorKind::Io,
            ExErrorKind::Serialization,
            ExErrorKind::Persistence,
            ExErrorKind::Timeout,
            ExErrorKind::Concurrency,
        ];
        let mut codes: Vec<_> = kinds.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_winner_not_in_participants_maps_to_player_context() {
        let err = ScorelineError::WinnerNotInParticipants {
            winner: "Zed".to_string(),
            participants: vec!["Ann".to_string(), "Bo".to_string()],
        };
        let ex: ExError = err.into();
        assert_eq!(ex.kind(), ExErrorKind::NotAParticipant);
        assert_eq!(ex.player(), Some("Zed"));
        assert!(ex.message().contains("Ann, Bo"));
    }

    #[test]
    fn test_display_includes_code_op_and_path() {
        let ex = ExError::new(ExErrorKind::Concurrency)
            .with_op("lock_acquire")
            .with_path("/tmp/leaderboard.json")
            .with_message("gave up after 5 attempts");
        let shown = ex.to_string();
        assert!(shown.starts_with("[ERR_CONCURRENCY]"));
        assert!(shown.contains("lock_acquire"));
        assert!(shown.contains("/tmp/leaderboard.json"));
    }

    #[test]
    fn test_source_chain_is_exposed() {
        let inner = ExError::new(ExErrorKind::Io).with_message("disk full");
        let outer = ExError::new(ExErrorKind::Persistence).with_source(inner);
        let src = std::error::Error::source(&outer).map(|s| s.to_string());
        assert_eq!(src.as_deref(), Some("[ERR_IO]: disk full"));
    }
}
