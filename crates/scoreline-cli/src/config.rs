//! Application configuration
//!
//! Precedence, lowest first: defaults, TOML file, `SCORELINE_DATA_DIR`,
//! `--data-dir`.

use anyhow::{Context, Result};
use scoreline_engine::DispatchConfig;
use scoreline_store::StoreConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "scoreline.toml";
pub const DATA_DIR_ENV: &str = "SCORELINE_DATA_DIR";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub dispatch: DispatchConfig,
}

impl AppConfig {
    /// Resolve the effective configuration
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_overrides(std::env::var_os(DATA_DIR_ENV).map(PathBuf::from), data_dir);
        config
            .store
            .validate()
            .context("invalid store configuration")?;
        tracing::debug!(data_dir = %config.store.data_dir.display(), "configuration resolved");
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    fn apply_overrides(&mut self, env_dir: Option<PathBuf>, flag_dir: Option<PathBuf>) {
        if let Some(dir) = flag_dir.or(env_dir) {
            self.store.data_dir = dir;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoreline_core::UnknownIntentPolicy;

    #[test]
    fn test_empty_file_is_all_defaults() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_sections_parse() {
        let cfg = AppConfig::from_toml(
            r#"
            [store]
            data_dir = "/srv/scores"
            history_cap = 50

            [dispatch]
            unknown_intent = "silent"
            context_turns = 10
            "#,
        )
        .unwrap();
        assert_eq!(cfg.store.data_dir, PathBuf::from("/srv/scores"));
        assert_eq!(cfg.store.history_cap, 50);
        assert_eq!(cfg.dispatch.unknown_intent, UnknownIntentPolicy::Silent);
        assert!(cfg.dispatch.conversation);
        assert_eq!(cfg.dispatch.context_turns, 10);
    }

    #[test]
    fn test_unknown_policy_value_is_rejected() {
        assert!(AppConfig::from_toml("[dispatch]\nunknown_intent = \"shout\"").is_err());
    }

    #[test]
    fn test_flag_beats_env_beats_file() {
        let mut cfg = AppConfig::default();
        cfg.apply_overrides(Some("/env".into()), None);
        assert_eq!(cfg.store.data_dir, PathBuf::from("/env"));

        cfg.apply_overrides(Some("/env".into()), Some("/flag".into()));
        assert_eq!(cfg.store.data_dir, PathBuf::from("/flag"));
    }
}
