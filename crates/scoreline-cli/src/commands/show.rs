//! Show command
//!
//! Usage: scoreline show [--json]

use crate::config::AppConfig;
use anyhow::Result;
use clap::Args;
use scoreline_core::Command;
use scoreline_core_types::RequestContext;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Print the stored leaderboard document instead of the rendered text
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: ShowArgs, config: &AppConfig) -> Result<()> {
    if args.json {
        // Strict load: an unreadable file is an error here, not an empty board
        let board = super::open_store(config)?.load_leaderboard()?;
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    }

    let outcome =
        super::dispatcher(config)?.dispatch(&Command::ShowLeaderboard, &RequestContext::new());
    if let Some(reply) = outcome.reply {
        println!("{}", reply);
    }
    Ok(())
}
