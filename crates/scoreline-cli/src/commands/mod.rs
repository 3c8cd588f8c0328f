pub mod dispatch;
pub mod history;
pub mod record;
pub mod show;

use crate::config::AppConfig;
use anyhow::Result;
use scoreline_engine::Dispatcher;
use scoreline_store::RecordStore;

pub(crate) fn open_store(config: &AppConfig) -> Result<RecordStore> {
    Ok(RecordStore::open(&config.store)?)
}

pub(crate) fn dispatcher(config: &AppConfig) -> Result<Dispatcher> {
    Ok(Dispatcher::new(open_store(config)?).with_policy(config.dispatch.unknown_intent))
}
