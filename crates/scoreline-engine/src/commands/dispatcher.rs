//! Command dispatcher with boundary logging.
//!
//! Resolves one `Command` into an `Outcome`: the reply text (if any) and how
//! the command ended. Dispatch itself never fails; storage and validation
//! problems become `Rejected` or `Failed` outcomes with a user-facing reply.
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging for dispatched commands:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success and on validation rejection
//! - `log_op_error!` when storage fails while recording
//!
//! Lower layers (store, core) use only `tracing::debug!()` for internal
//! details, plus `warn!`/`error!` for faults the store absorbs.

use scoreline_core::model::GameRecord;
use scoreline_core::render::{render_leaderboard, replies};
use scoreline_core::rules::validation::validate_game;
use scoreline_core::{apply_game, Command, ExError, ExErrorKind, UnknownIntentPolicy};
use scoreline_core::{log_op_end, log_op_error, log_op_start};
use scoreline_core_types::RequestContext;
use scoreline_store::RecordStore;
use std::time::Instant;

/// How a dispatched command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    /// Leaderboard rendered
    Shown,
    /// Game written to the leaderboard
    Recorded,
    /// Game failed validation; nothing written
    Rejected,
    /// Nothing usable was extracted, or an unknown intent was answered
    Unrecognized,
    /// Deliberately no reply
    Ignored,
    /// Storage failed while recording; nothing written
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub reply: Option<String>,
}

impl Outcome {
    fn reply(kind: OutcomeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            reply: Some(text.into()),
        }
    }

    fn silent(kind: OutcomeKind) -> Self {
        Self { kind, reply: None }
    }
}

/// Applies commands against a record store
#[derive(Debug, Clone)]
pub struct Dispatcher {
    store: RecordStore,
    policy: UnknownIntentPolicy,
}

impl Dispatcher {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            policy: UnknownIntentPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: UnknownIntentPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn policy(&self) -> UnknownIntentPolicy {
        self.policy
    }

    /// Dispatch one command
    ///
    /// Only `RecordGame` that passes validation writes anything.
    pub fn dispatch(&self, command: &Command, ctx: &RequestContext) -> Outcome {
        let op = command.op_name();
        log_op_start!(op, request_id = %ctx.request_id);
        let start = Instant::now();

        let outcome = match command {
            Command::ShowLeaderboard => self.show_leaderboard(),
            Command::RecordGame(record) => self.record_game(record, ctx, start),
            Command::UnknownIntent { name } => {
                tracing::debug!(intent = %name, policy = ?self.policy, "unknown intent");
                if self.policy.replies() {
                    Outcome::reply(OutcomeKind::Unrecognized, replies::UNKNOWN_INTENT)
                } else {
                    Outcome::silent(OutcomeKind::Ignored)
                }
            }
            Command::Unrecognized => Outcome::reply(OutcomeKind::Unrecognized, replies::UNRECOGNIZED),
        };

        if outcome.kind != OutcomeKind::Failed {
            log_op_end!(
                op,
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = %ctx.request_id,
                outcome = ?outcome.kind
            );
        }
        outcome
    }

    fn show_leaderboard(&self) -> Outcome {
        let board = self.store.read_leaderboard();
        tracing::debug!(entries_len = board.len(), "rendering leaderboard");
        Outcome::reply(OutcomeKind::Shown, render_leaderboard(&board))
    }

    fn record_game(&self, record: &GameRecord, ctx: &RequestContext, start: Instant) -> Outcome {
        let game = match validate_game(record) {
            Ok(game) => game,
            Err(err) => {
                let ex: ExError = err.clone().into();
                tracing::info!(
                    request_id = %ctx.request_id,
                    err_code = ex.code(),
                    participants_len = record.participants.len(),
                    "game rejected"
                );
                return Outcome::reply(OutcomeKind::Rejected, replies::rejection(&err));
            }
        };

        match self
            .store
            .update_leaderboard(|board| apply_game(board, &game))
        {
            Ok(total) => {
                tracing::debug!(winner = game.winner(), total, "win recorded");
                Outcome::reply(OutcomeKind::Recorded, replies::game_recorded(&game, total))
            }
            Err(err) => {
                let failure = ExError::new(ExErrorKind::Persistence)
                    .with_op("record_game")
                    .with_player(game.winner())
                    .with_request_id(ctx.request_id.clone())
                    .with_message("game not saved")
                    .with_source(err);
                log_op_error!(
                    "record_game",
                    failure,
                    duration_ms = start.elapsed().as_millis() as u64,
                    winner = game.winner()
                );
                Outcome::reply(OutcomeKind::Failed, replies::SAVE_FAILED)
            }
        }
    }
}
