// Integration tests for the message pipeline and serve loop.
// Covers conversation bookkeeping, extractor failures, and concurrent handling.

use scoreline_core::errors::{ExError, ExErrorKind};
use scoreline_core::logging_facility::init_test_capture;
use scoreline_core::model::{ConversationTurn, GameRecord, Role};
use scoreline_core::render::replies;
use scoreline_core::{Command, UnknownIntentPolicy};
use scoreline_engine::intent::ExtractResult;
use scoreline_engine::{
    serve, DispatchConfig, FunctionCallExtractor, InboundMessage, LineChannel, MessagePipeline,
};
use scoreline_store::RecordStore;
use std::io::Cursor;
use std::sync::Mutex;
use tempfile::TempDir;

fn call_pipeline(dir: &TempDir, config: DispatchConfig) -> MessagePipeline<FunctionCallExtractor> {
    MessagePipeline::new(RecordStore::new(dir.path()), FunctionCallExtractor, config)
}

const SHOW: &str = r#"{"name": "show_leaderboard"}"#;

#[test]
fn test_user_and_assistant_turns_are_logged() {
    // Given: A pipeline with conversation enabled
    let dir = TempDir::new().unwrap();
    let pipeline = call_pipeline(&dir, DispatchConfig::default());

    // When: One message is handled
    let reply = pipeline.handle(&InboundMessage::from_user("ann", SHOW)).unwrap();

    // Then: Both sides of the exchange are in the log
    let turns = pipeline.dispatcher().store().read_conversation();
    assert_eq!(
        turns,
        vec![ConversationTurn::user(SHOW), ConversationTurn::assistant(reply)]
    );
}

#[test]
fn test_silent_unknown_intent_logs_only_user_turn() {
    let dir = TempDir::new().unwrap();
    let config = DispatchConfig {
        unknown_intent: UnknownIntentPolicy::Silent,
        ..DispatchConfig::default()
    };
    let pipeline = call_pipeline(&dir, config);

    let reply = pipeline.handle(&InboundMessage::from_user("ann", r#"{"name": "roll_dice"}"#));

    assert_eq!(reply, None);
    let turns = pipeline.dispatcher().store().read_conversation();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].role, Role::User);
}

#[test]
fn test_extractor_failure_is_unrecognized() {
    let dir = TempDir::new().unwrap();
    let failing = |_: &str, _: &[ConversationTurn]| -> ExtractResult {
        Err(ExError::new(ExErrorKind::Timeout).with_message("model did not answer"))
    };
    let pipeline =
        MessagePipeline::new(RecordStore::new(dir.path()), failing, DispatchConfig::default());

    let reply = pipeline.handle(&InboundMessage::from_user("ann", "who is winning"));

    assert_eq!(reply.as_deref(), Some(replies::UNRECOGNIZED));
    assert!(!pipeline.dispatcher().store().leaderboard_path().exists());
}

#[test]
fn test_extractor_failure_is_logged_as_external_service() {
    let capture = init_test_capture();
    let dir = TempDir::new().unwrap();
    let failing = |_: &str, _: &[ConversationTurn]| -> ExtractResult {
        Err(ExError::new(ExErrorKind::Timeout).with_message("classifier went quiet"))
    };
    let pipeline =
        MessagePipeline::new(RecordStore::new(dir.path()), failing, DispatchConfig::default());

    pipeline.handle(&InboundMessage::from_user("ann", "who is winning"));

    let warned = capture.count_events(|e| {
        e.field("err").is_some_and(|err| err.contains("classifier went quiet"))
            && e.field("err_code") == Some("ERR_EXTERNAL_SERVICE")
            && e.field("cause_code") == Some("ERR_TIMEOUT")
    });
    assert_eq!(warned, 1);
}

#[test]
fn test_extractor_sees_bounded_recent_context() {
    // Given: An extractor that records how much context it was given
    let dir = TempDir::new().unwrap();
    let seen = Mutex::new(Vec::new());
    let recording = |text: &str, context: &[ConversationTurn]| -> ExtractResult {
        seen.lock()
            .unwrap()
            .push((context.len(), context.last().map(|t| t.content.clone())));
        assert_eq!(context.last().map(|t| t.content.as_str()), Some(text));
        Ok(Command::Unrecognized)
    };
    let config = DispatchConfig {
        context_turns: 3,
        ..DispatchConfig::default()
    };
    let pipeline = MessagePipeline::new(RecordStore::new(dir.path()), recording, config);

    // When: Several messages arrive
    for i in 0..4 {
        pipeline.handle(&InboundMessage::from_user("ann", format!("m{}", i)));
    }

    // Then: Context grows to the configured bound and ends with the current message
    let lens: Vec<usize> = seen.lock().unwrap().iter().map(|(n, _)| *n).collect();
    assert_eq!(lens, vec![1, 3, 3, 3]);
}

#[test]
fn test_serve_drains_channel_and_skips_bots() {
    // Given: A line channel with two calls
    let dir = TempDir::new().unwrap();
    let pipeline = call_pipeline(&dir, DispatchConfig::default());
    let input = format!(
        "{}\n\n{}\n",
        r#"{"name": "record_game", "arguments": {"players": ["Ann", "Bo"], "winner": "Bo"}}"#,
        SHOW
    );
    let mut channel = LineChannel::new(Cursor::new(input), Vec::new(), "cli");

    // When: It is served
    let handled = serve(&mut channel, &pipeline);

    // Then: Both were answered in order
    assert_eq!(handled, 2);
    let out = String::from_utf8(channel.into_output()).unwrap();
    assert!(out.starts_with("Recorded a win for Bo"));
    assert!(out.contains("1. Bo: 1 win"));
    assert_eq!(
        pipeline.handle(&InboundMessage::from_bot("scoreline", SHOW)),
        None
    );
}

#[test]
fn test_concurrent_messages_all_recorded() {
    // Given: One pipeline shared by several threads
    let dir = TempDir::new().unwrap();
    let config = DispatchConfig {
        conversation: false,
        ..DispatchConfig::default()
    };
    let game = |text: &str, _: &[ConversationTurn]| -> ExtractResult {
        Ok(Command::RecordGame(GameRecord::new(["Ann", "Bo"], text)))
    };
    let store_config = scoreline_store::StoreConfig {
        lock: scoreline_store::LockConfig {
            max_attempts: 2_000,
            base_delay_ms: 1,
            max_delay_ms: 5,
        },
        ..scoreline_store::StoreConfig::default().with_data_dir(dir.path())
    };
    let pipeline = MessagePipeline::new(RecordStore::open(&store_config).unwrap(), game, config);

    // When: Each thread reports wins
    std::thread::scope(|s| {
        for winner in ["Ann", "Bo", "Ann", "Bo", "Ann"] {
            let pipeline = &pipeline;
            s.spawn(move || {
                for _ in 0..5 {
                    pipeline.handle(&InboundMessage::from_user("t", winner)).unwrap();
                }
            });
        }
    });

    // Then: No win was lost
    let board = pipeline.dispatcher().store().read_leaderboard();
    assert_eq!(board.wins("Ann"), Some(15));
    assert_eq!(board.wins("Bo"), Some(10));
}

#[test]
fn test_dispatch_emits_boundary_events() {
    let capture = init_test_capture();
    let dir = TempDir::new().unwrap();
    let pipeline = call_pipeline(&dir, DispatchConfig::default());

    pipeline.handle(&InboundMessage::from_user("ann", SHOW));

    // Op names are shared across tests, so look for a start with a matching end
    let events = capture.events_for_op("show_leaderboard");
    let started = events
        .iter()
        .find(|e| e.event.as_deref() == Some("start"))
        .and_then(|e| e.field("request_id").map(str::to_string))
        .expect("start event");
    assert!(events.iter().any(|e| {
        e.event.as_deref() == Some("end")
            && e.field("request_id") == Some(started.as_str())
            && e.field("outcome") == Some("Shown")
    }));
}
