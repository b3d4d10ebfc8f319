//! noughts CLI - Command-line interface
//!
//! Commands:
//! - play: Play the campaign in the terminal
//! - ladder: Measure opponent strength at every level
//! - serve: Start the HTTP server for browser front-ends

mod ladder_cmd;
mod play;
mod server;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use noughts_core::SessionConfig;

#[derive(Parser)]
#[command(name = "noughts")]
#[command(about = "N×N tic-tac-toe against a level-scaled opponent")]
struct Cli {
    /// Random seed for reproducible opponents
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Session configuration JSON file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the campaign in the terminal
    Play(play::PlayArgs),
    /// Measure opponent strength at every level
    Ladder(ladder_cmd::LadderArgs),
    /// Start the HTTP server
    Serve(server::ServerArgs),
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Play(args) => play::run(args, config, cli.seed),
        Commands::Ladder(args) => ladder_cmd::run(args, &config, cli.seed),
        Commands::Serve(args) => server::run(args, cli.seed),
    }
}

/// Session config from file, or defaults
fn load_config(path: Option<&std::path::Path>) -> Result<SessionConfig> {
    match path {
        Some(path) => {
            let config = SessionConfig::load(path)?;
            tracing::debug!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(SessionConfig::default()),
    }
}
