//! Play command - one automatic game
//!
//! - run(): orchestration
//! - play_game(): build the game and let the player finish it
//! - report_summary(): text or JSON output

use anyhow::{Context, Result};
use clap::Args;

use happyhex_core::{play_to_end, Game, GameConfig, GameSummary, HexEngine};

use crate::common::{make_player, GameArgs};

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub game: GameArgs,

    /// Print the final board
    #[arg(long)]
    pub show_board: bool,
}

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    let config = args.game.to_config()?;

    tracing::info!(
        "Starting game: radius={}, queue={}, difficulty={}, player={:?}",
        config.radius,
        config.queue_size,
        config.difficulty,
        args.game.player
    );

    let (summary, engine) = play_game(&config, &args.game)?;

    if !summary.game_over {
        tracing::warn!("Stopped by turn limit after {} turns", summary.turns);
    }

    report_summary(&summary, args.game.json);
    if args.show_board {
        print!("{}", engine);
    }
    Ok(())
}

/// Play one game to the end, returning the summary and the final board
fn play_game(config: &GameConfig, args: &GameArgs) -> Result<(GameSummary, HexEngine)> {
    let mut game = Game::new(config).context("Failed to start game")?;
    let mut player = make_player(args.player, config.seed);
    let summary = play_to_end(&mut game, player.as_mut(), args.max_turns)
        .context("Player made an illegal move")?;
    Ok((summary, game.engine().clone()))
}

fn report_summary(summary: &GameSummary, json: bool) {
    if json {
        if let Ok(text) = serde_json::to_string_pretty(summary) {
            println!("{}", text);
        }
        return;
    }

    println!("\n=== Game Summary ===");
    println!("Player:     {}", summary.player);
    println!("Difficulty: {}", summary.difficulty);
    println!("Radius:     {}", summary.radius);
    println!("Score:      {}", summary.score);
    println!("Turns:      {}", summary.turns);
    println!("Lines:      {}", summary.lines);
    println!("Filled:     {}", summary.filled);
}
