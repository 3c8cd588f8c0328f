//! Scoreline CLI
//!
//! Local operator surface over the record store and dispatcher

use clap::{Parser, Subcommand};
use scoreline_core::logging_facility::{self, Profile};
use std::path::PathBuf;

mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "scoreline")]
#[command(about = "Scoreline - game leaderboard keeper", long_about = None)]
struct Cli {
    /// Configuration file (default: ./scoreline.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory; overrides the config file and SCORELINE_DATA_DIR
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the leaderboard
    Show(commands::show::ShowArgs),
    /// Record one game
    Record(commands::record::RecordArgs),
    /// Dispatch JSON function calls, one per line
    Dispatch(commands::dispatch::DispatchArgs),
    /// Print recent conversation turns
    History(commands::history::HistoryArgs),
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(if cli.json_logs {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = config::AppConfig::load(cli.config.as_deref(), cli.data_dir).and_then(|cfg| {
        match cli.command {
            Commands::Show(args) => commands::show::execute(args, &cfg),
            Commands::Record(args) => commands::record::execute(args, &cfg),
            Commands::Dispatch(args) => commands::dispatch::execute(args, &cfg),
            Commands::History(args) => commands::history::execute(args, &cfg),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
