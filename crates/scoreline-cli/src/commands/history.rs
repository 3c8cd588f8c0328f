//! History command
//!
//! Usage: scoreline history [--limit N]

use crate::config::AppConfig;
use anyhow::Result;
use clap::Args;
use scoreline_core::model::conversation::recent;
use scoreline_core::model::Role;

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Number of most recent turns to print
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,
}

pub fn execute(args: HistoryArgs, config: &AppConfig) -> Result<()> {
    let turns = super::open_store(config)?.load_conversation()?;
    if turns.is_empty() {
        println!("No conversation yet.");
        return Ok(());
    }
    for turn in recent(&turns, args.limit) {
        let who = match turn.role {
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        println!("[{}] {}", who, turn.content);
    }
    Ok(())
}
