//! Dispatch command
//!
//! Usage: scoreline dispatch [FILE|-]
//!
//! Each non-blank input line is a JSON function call such as
//! `{"name": "record_game", "arguments": {"players": ["Ann", "Bo"], "winner": "Bo"}}`.
//! Lines go through the full message pipeline, conversation log included;
//! replies are printed one per call.

use crate::config::AppConfig;
use anyhow::{Context, Result};
use clap::Args;
use scoreline_engine::{serve, FunctionCallExtractor, LineChannel, MessagePipeline};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

/// Sender name recorded for lines read by this command
const SENDER: &str = "cli";

#[derive(Debug, Args)]
pub struct DispatchArgs {
    /// Input file, or `-` for stdin
    #[arg(default_value = "-")]
    pub input: PathBuf,
}

pub fn execute(args: DispatchArgs, config: &AppConfig) -> Result<()> {
    let input: Box<dyn BufRead> = if args.input.as_os_str() == "-" {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(&args.input)
            .with_context(|| format!("opening {}", args.input.display()))?;
        Box::new(BufReader::new(file))
    };

    let pipeline = MessagePipeline::new(
        super::open_store(config)?,
        FunctionCallExtractor,
        config.dispatch.clone(),
    );
    let mut channel = LineChannel::new(input, io::stdout().lock(), SENDER);
    let handled = serve(&mut channel, &pipeline);
    tracing::info!(handled, "dispatch finished");
    Ok(())
}
