//! Per-message pipeline
//!
//! For each inbound message:
//! 1. automated senders are dropped before anything else happens
//! 2. the user turn is appended to the conversation (when enabled)
//! 3. the extractor sees the text plus the most recent turns
//! 4. the command is dispatched
//! 5. the reply, if any, is appended as an assistant turn
//!
//! Conversation bookkeeping is best effort: a failed append is logged and the
//! message is still answered.

use crate::commands::dispatcher::{Dispatcher, Outcome, OutcomeKind};
use crate::intent::IntentExtractor;
use scoreline_core::model::conversation::recent;
use scoreline_core::model::{ConversationTurn, DEFAULT_HISTORY_CAP};
use scoreline_core::{Command, ExError, ExErrorKind, UnknownIntentPolicy};
use scoreline_core_types::{RequestContext, Sensitive, TraceId};
use scoreline_store::RecordStore;
use serde::{Deserialize, Serialize};

/// Dispatch behaviour settings
///
/// ```toml
/// [dispatch]
/// unknown_intent = "silent"
/// conversation = true
/// context_turns = 20
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub unknown_intent: UnknownIntentPolicy,
    /// Keep a conversation log and feed it to the extractor
    pub conversation: bool,
    /// Turns handed to the extractor; capped at the history cap
    pub context_turns: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            unknown_intent: UnknownIntentPolicy::default(),
            conversation: true,
            context_turns: DEFAULT_HISTORY_CAP,
        }
    }
}

/// One message from the channel
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub sender: String,
    pub text: Sensitive<String>,
    /// Sent by an automated account, including this bot
    pub from_bot: bool,
    pub trace_id: Option<TraceId>,
}

impl InboundMessage {
    pub fn from_user(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: Sensitive::new(text.into()),
            from_bot: false,
            trace_id: None,
        }
    }

    pub fn from_bot(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            from_bot: true,
            ..Self::from_user(sender, text)
        }
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }
}

/// Message handling pipeline; `handle` takes `&self` and may run on many threads
pub struct MessagePipeline<E> {
    dispatcher: Dispatcher,
    extractor: E,
    config: DispatchConfig,
}

impl<E: IntentExtractor> MessagePipeline<E> {
    pub fn new(store: RecordStore, extractor: E, config: DispatchConfig) -> Self {
        let dispatcher = Dispatcher::new(store).with_policy(config.unknown_intent);
        Self {
            dispatcher,
            extractor,
            config,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Handle one message; `None` means no reply should be sent
    pub fn handle(&self, message: &InboundMessage) -> Option<String> {
        self.handle_outcome(message).and_then(|outcome| outcome.reply)
    }

    /// Like `handle`, but exposes how dispatch ended
    ///
    /// Returns `None` only for automated senders.
    pub fn handle_outcome(&self, message: &InboundMessage) -> Option<Outcome> {
        if message.from_bot {
            tracing::debug!(sender = %message.sender, "ignoring automated sender");
            return None;
        }

        let mut ctx = RequestContext::new();
        if let Some(trace_id) = &message.trace_id {
            ctx = ctx.with_trace_id(trace_id.clone());
        }
        let text = message.text.expose();

        let history = if self.config.conversation {
            self.remember(ConversationTurn::user(text.as_str()));
            self.dispatcher.store().read_conversation()
        } else {
            Vec::new()
        };
        let context = recent(&history, self.context_turns());

        let command = match self.extractor.extract(text, context) {
            Ok(command) => command,
            Err(err) => {
                let failure = ExError::new(ExErrorKind::ExternalService)
                    .with_op("extract_intent")
                    .with_request_id(ctx.request_id.clone())
                    .with_source(err);
                tracing::warn!(
                    request_id = %ctx.request_id,
                    err_code = failure.code(),
                    cause_code = failure.source_error().map_or("", |cause| cause.code()),
                    err = %failure,
                    "intent extraction failed"
                );
                Command::Unrecognized
            }
        };
        tracing::debug!(
            request_id = %ctx.request_id,
            sender = %message.sender,
            text = %message.text,
            turns_len = context.len(),
            command = command.op_name(),
            "intent extracted"
        );

        let outcome = self.dispatcher.dispatch(&command, &ctx);

        if self.config.conversation {
            if let Some(reply) = &outcome.reply {
                self.remember(ConversationTurn::assistant(reply.as_str()));
            }
        }
        if outcome.kind == OutcomeKind::Ignored {
            tracing::debug!(request_id = %ctx.request_id, "no reply");
        }
        Some(outcome)
    }

    fn context_turns(&self) -> usize {
        self.config
            .context_turns
            .min(self.dispatcher.store().history_cap())
    }

    fn remember(&self, turn: ConversationTurn) {
        if let Err(err) = self.dispatcher.store().append_turns(&[turn]) {
            tracing::warn!(err = %err, err_code = err.code(), "conversation append dropped");
        }
    }
}
