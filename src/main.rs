//! Calculator - CLI
//!
//! `calculator play` runs one console round; `calculator serve` starts the API.

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use calculator_lib::{
    api,
    config::{Cli, Command, ServeConfig},
    round::{self, GameError, TerminalConsole},
    VERSION,
};

/// Log to stderr so game output on stdout stays clean
fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn play() -> Result<()> {
    init_logging("warn");

    let mut console = TerminalConsole::new();
    match round::play_round(&mut console, &mut rand::thread_rng()) {
        Ok(verdict) => {
            info!("Round finished, correct: {}", verdict.is_correct);
            Ok(())
        }
        Err(GameError::InputClosed) => {
            warn!("Input closed, leaving the round unfinished");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn serve(config: ServeConfig) -> Result<()> {
    init_logging("info");
    info!("Calculator server v{}", VERSION);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(api::serve(config))?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => play(),
        Command::Serve(args) => serve(args.into()),
    }
}
