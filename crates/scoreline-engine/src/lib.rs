//! Scoreline Engine - orchestration layer
//!
//! Coordinates the pure ledger rules in `scoreline-core` with the record
//! store:
//! - `commands::dispatcher`: turns one `Command` into an `Outcome`
//! - `intent`: the intent-extractor seam and function-call decoding
//! - `pipeline`: per-message flow with conversation bookkeeping
//! - `channel`: message-channel seam and the serve loop

pub mod channel;
pub mod commands;
pub mod intent;
pub mod pipeline;

pub use channel::{serve, LineChannel, MessageChannel};
pub use commands::dispatcher::{Dispatcher, Outcome, OutcomeKind};
pub use intent::{FunctionCall, FunctionCallExtractor, IntentExtractor};
pub use pipeline::{DispatchConfig, InboundMessage, MessagePipeline};
