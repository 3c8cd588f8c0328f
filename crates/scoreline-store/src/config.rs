//! Store configuration
//!
//! Every field has a default so a partial TOML table is enough:
//!
//! ```toml
//! [store]
//! data_dir = "/var/lib/scoreline"
//! history_cap = 500
//!
//! [store.lock]
//! max_attempts = 8
//! ```

use crate::errors::{invalid_config, Result};
use scoreline_core::model::DEFAULT_HISTORY_CAP;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding both documents and their lock files
    pub data_dir: PathBuf,
    pub leaderboard_file: String,
    pub conversation_file: String,
    /// Maximum conversation turns kept on disk
    pub history_cap: usize,
    pub lock: LockConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".scoreline"),
            leaderboard_file: "leaderboard.json".to_string(),
            conversation_file: "conversation.json".to_string(),
            history_cap: DEFAULT_HISTORY_CAP,
            lock: LockConfig::default(),
        }
    }
}

impl StoreConfig {
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn leaderboard_path(&self) -> PathBuf {
        self.data_dir.join(&self.leaderboard_file)
    }

    pub fn conversation_path(&self) -> PathBuf {
        self.data_dir.join(&self.conversation_file)
    }

    /// # Errors
    ///
    /// Returns `InvalidInput` when a file name is empty, both documents share
    /// a file, or a bound is zero.
    pub fn validate(&self) -> Result<()> {
        if self.leaderboard_file.is_empty() || self.conversation_file.is_empty() {
            return Err(invalid_config("document file names must not be empty"));
        }
        if self.leaderboard_file == self.conversation_file {
            return Err(invalid_config(
                "leaderboard and conversation must use different files",
            ));
        }
        if self.history_cap == 0 {
            return Err(invalid_config("history_cap must be > 0"));
        }
        self.lock.validate()
    }
}

/// Lock retry policy: `max_attempts` tries with capped exponential backoff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_ms: 100,
            max_delay_ms: 2_000,
        }
    }
}

impl LockConfig {
    /// Wait after failed attempt `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(20);
        let ms = self
            .base_delay_ms
            .saturating_mul(1u64 << exp)
            .min(self.max_delay_ms);
        Duration::from_millis(ms)
    }

    /// Longest total time spent sleeping before giving up
    pub fn worst_case_wait(&self) -> Duration {
        (1..self.max_attempts).map(|a| self.delay_for(a)).sum()
    }

    /// # Errors
    ///
    /// Returns `InvalidInput` when `max_attempts` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(invalid_config("lock.max_attempts must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let cfg = StoreConfig::default().with_data_dir("/data");
        assert_eq!(cfg.leaderboard_path(), PathBuf::from("/data/leaderboard.json"));
        assert_eq!(
            cfg.conversation_path(),
            PathBuf::from("/data/conversation.json")
        );
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let lock = LockConfig::default();
        assert_eq!(lock.delay_for(1), Duration::from_millis(100));
        assert_eq!(lock.delay_for(2), Duration::from_millis(200));
        assert_eq!(lock.delay_for(4), Duration::from_millis(800));
        assert_eq!(lock.delay_for(6), Duration::from_millis(2_000));
        assert_eq!(lock.worst_case_wait(), Duration::from_millis(1_500));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let cfg: StoreConfig = toml::from_str(
            r#"
            data_dir = "/srv/board"
            [lock]
            max_attempts = 8
            "#,
        )
        .unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("/srv/board"));
        assert_eq!(cfg.history_cap, 1000);
        assert_eq!(cfg.lock.max_attempts, 8);
        assert_eq!(cfg.lock.base_delay_ms, 100);
    }

    #[test]
    fn test_validate_rejects_shared_file() {
        let cfg = StoreConfig {
            conversation_file: "leaderboard.json".to_string(),
            ..StoreConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let mut cfg = StoreConfig::default();
        cfg.lock.max_attempts = 0;
        assert!(cfg.validate().is_err());
    }
}
