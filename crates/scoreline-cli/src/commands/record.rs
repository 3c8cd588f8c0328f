//! Record command
//!
//! Usage: scoreline record --player <NAME>... --winner <NAME>

use crate::config::AppConfig;
use anyhow::{bail, Result};
use clap::Args;
use scoreline_core::model::GameRecord;
use scoreline_core::Command;
use scoreline_core_types::RequestContext;
use scoreline_engine::OutcomeKind;

#[derive(Debug, Args)]
pub struct RecordArgs {
    /// A player who took part (repeat for each player)
    #[arg(short, long = "player", required = true)]
    pub players: Vec<String>,

    /// The player who won
    #[arg(short, long)]
    pub winner: String,
}

pub fn execute(args: RecordArgs, config: &AppConfig) -> Result<()> {
    let command = Command::RecordGame(GameRecord::new(args.players, args.winner));
    let outcome = super::dispatcher(config)?.dispatch(&command, &RequestContext::new());
    let reply = outcome.reply.unwrap_or_default();

    match outcome.kind {
        OutcomeKind::Recorded => {
            println!("✓ {}", reply);
            Ok(())
        }
        _ => bail!("{}", reply),
    }
}
