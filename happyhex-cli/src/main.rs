//! HappyHex CLI - Headless driver for the puzzle engine
//!
//! Commands:
//! - play: Play one game with an automatic player
//! - simulate: Play many independent games in parallel and report statistics
//! - pieces: List the piece catalogue

mod common;
mod pieces_cmd;
mod play_cmd;
mod simulate_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "happyhex")]
#[command(about = "HappyHex hexagonal block puzzle, played headless")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game
    Play(play_cmd::PlayArgs),
    /// Play many games in parallel
    Simulate(simulate_cmd::SimulateArgs),
    /// List the piece catalogue
    Pieces(pieces_cmd::PiecesArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args),
        Commands::Simulate(args) => simulate_cmd::run(args),
        Commands::Pieces(args) => pieces_cmd::run(args),
    }
}
