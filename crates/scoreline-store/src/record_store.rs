//! Record Store
//!
//! Exclusive owner of the two on-disk documents:
//! - `leaderboard.json`: object of player id to win count, in encounter order
//! - `conversation.json`: array of `{role, content}` turns, most recent last
//!
//! Each document has its own lock and no operation holds both. Every call
//! re-reads from disk; nothing is cached between calls.
//!
//! Two API shapes are offered. The strict `load_*`/`save_*`/`update_*`/
//! `append_*` calls return `Result`. The lenient `read_*`/`write_*` calls
//! absorb failures: reads degrade to empty state and writes report `false`,
//! with the cause logged.

use crate::config::StoreConfig;
use crate::errors::Result;
use crate::file::JsonDocument;
use scoreline_core::model::conversation::{recent, retain_recent};
use scoreline_core::model::{ConversationTurn, Leaderboard};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct RecordStore {
    leaderboard: JsonDocument,
    conversation: JsonDocument,
    history_cap: usize,
}

impl RecordStore {
    /// Open a store from configuration
    ///
    /// No files are touched until the first operation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the configuration does not validate.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    /// Store with default settings rooted at `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::from_config(&StoreConfig::default().with_data_dir(data_dir))
    }

    fn from_config(config: &StoreConfig) -> Self {
        Self {
            leaderboard: JsonDocument::new(config.leaderboard_path(), config.lock.clone()),
            conversation: JsonDocument::new(config.conversation_path(), config.lock.clone()),
            history_cap: config.history_cap,
        }
    }

    pub fn leaderboard_path(&self) -> &Path {
        self.leaderboard.path()
    }

    pub fn conversation_path(&self) -> &Path {
        self.conversation.path()
    }

    pub fn history_cap(&self) -> usize {
        self.history_cap
    }

    // ---------- Leaderboard ----------

    /// # Errors
    ///
    /// Lock exhaustion, I/O failure, or an unparseable document.
    pub fn load_leaderboard(&self) -> Result<Leaderboard> {
        Ok(self.leaderboard.load()?.unwrap_or_default())
    }

    /// # Errors
    ///
    /// Lock exhaustion or I/O failure.
    pub fn save_leaderboard(&self, board: &Leaderboard) -> Result<()> {
        self.leaderboard.save(board)?;
        tracing::debug!(entries_len = board.len(), "leaderboard saved");
        Ok(())
    }

    /// Read-modify-write the leaderboard under a single lock
    ///
    /// An unreadable document is moved aside and `f` sees an empty board.
    ///
    /// # Errors
    ///
    /// Lock exhaustion or I/O failure; the document is unchanged in that case.
    pub fn update_leaderboard<R>(&self, f: impl FnOnce(&mut Leaderboard) -> R) -> Result<R> {
        self.leaderboard.update(|board: &mut Leaderboard| {
            let out = f(board);
            tracing::debug!(entries_len = board.len(), "leaderboard updated");
            Ok(out)
        })
    }

    /// Leaderboard, or empty if absent or unreadable
    pub fn read_leaderboard(&self) -> Leaderboard {
        match self.load_leaderboard() {
            Ok(board) => board,
            Err(err) => {
                tracing::error!(err = %err, err_code = err.code(), "leaderboard read failed, using empty");
                Leaderboard::new()
            }
        }
    }

    /// Persist a full snapshot; `false` means the write was dropped
    pub fn write_leaderboard(&self, board: &Leaderboard) -> bool {
        match self.save_leaderboard(board) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(err = %err, err_code = err.code(), "leaderboard write dropped");
                false
            }
        }
    }

    // ---------- Conversation ----------

    /// # Errors
    ///
    /// Lock exhaustion, I/O failure, or an unparseable document.
    pub fn load_conversation(&self) -> Result<Vec<ConversationTurn>> {
        Ok(self.conversation.load()?.unwrap_or_default())
    }

    /// Persist the most recent `history_cap` turns; returns how many were dropped
    ///
    /// # Errors
    ///
    /// Lock exhaustion or I/O failure.
    pub fn save_conversation(&self, turns: &[ConversationTurn]) -> Result<usize> {
        let kept = recent(turns, self.history_cap);
        self.conversation.save(&kept)?;
        let dropped = turns.len() - kept.len();
        tracing::debug!(turns_len = kept.len(), dropped, "conversation saved");
        Ok(dropped)
    }

    /// Append turns and truncate under a single lock; returns the new length
    ///
    /// # Errors
    ///
    /// Lock exhaustion or I/O failure.
    pub fn append_turns(&self, new_turns: &[ConversationTurn]) -> Result<usize> {
        let cap = self.history_cap;
        self.conversation.update(|turns: &mut Vec<ConversationTurn>| {
            turns.extend_from_slice(new_turns);
            let dropped = retain_recent(turns, cap);
            tracing::debug!(turns_len = turns.len(), dropped, "conversation appended");
            Ok(turns.len())
        })
    }

    /// Conversation, or empty if absent or unreadable
    pub fn read_conversation(&self) -> Vec<ConversationTurn> {
        match self.load_conversation() {
            Ok(turns) => turns,
            Err(err) => {
                tracing::error!(err = %err, err_code = err.code(), "conversation read failed, using empty");
                Vec::new()
            }
        }
    }

    /// Truncate then persist; `false` means the write was dropped
    pub fn write_conversation(&self, turns: &[ConversationTurn]) -> bool {
        match self.save_conversation(turns) {
            Ok(_) => true,
            Err(err) => {
                tracing::error!(err = %err, err_code = err.code(), "conversation write dropped");
                false
            }
        }
    }
}
