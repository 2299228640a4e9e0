//! Simulate command - many independent games in parallel
//!
//! - run(): orchestration
//! - play_games(): one game per seed on the rayon pool
//! - compute_statistics() / report_results(): aggregation and output

use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;

use happyhex_core::{play_to_end, Game, GameConfig, GameSummary};

use crate::common::{make_player, GameArgs, PlayerKind};

#[derive(Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub game: GameArgs,

    /// Number of games to play
    #[arg(long, default_value = "100")]
    pub games: usize,
}

/// Aggregated results
#[derive(Clone, Debug, serde::Serialize)]
struct SimulationResults {
    games: usize,
    finished: usize,
    mean_score: f64,
    max_score: u64,
    min_score: u64,
    mean_turns: f64,
    max_turns: u64,
    mean_lines: f64,
}

/// Run simulate command
pub fn run(args: SimulateArgs) -> Result<()> {
    let config = args.game.to_config()?;

    tracing::info!(
        "Simulating {} games: radius={}, queue={}, difficulty={}, player={:?}",
        args.games,
        config.radius,
        config.queue_size,
        config.difficulty,
        args.game.player
    );

    let summaries = play_games(&config, args.game.player, args.game.max_turns, args.games)?;
    let results = compute_statistics(&summaries);

    report_results(&results, args.game.json);
    Ok(())
}

/// Play `count` games on the rayon pool. Game `n` uses `seed + n` when a
/// seed is configured.
fn play_games(
    config: &GameConfig,
    player: PlayerKind,
    max_turns: Option<u64>,
    count: usize,
) -> Result<Vec<GameSummary>> {
    (0..count as u64)
        .into_par_iter()
        .map(|n| {
            let seed = config.seed.map(|s| s.wrapping_add(n));
            let game_config = GameConfig {
                seed,
                ..config.clone()
            };
            let mut game = Game::new(&game_config).context("Failed to start game")?;
            let mut p = make_player(player, seed);
            let summary = play_to_end(&mut game, p.as_mut(), max_turns)
                .with_context(|| format!("Game {} failed", n + 1))?;
            tracing::debug!("Game {}: score {} in {} turns", n + 1, summary.score, summary.turns);
            Ok(summary)
        })
        .collect()
}

fn compute_statistics(summaries: &[GameSummary]) -> SimulationResults {
    let games = summaries.len();
    let mean = |total: f64| if games == 0 { 0.0 } else { total / games as f64 };

    SimulationResults {
        games,
        finished: summaries.iter().filter(|s| s.game_over).count(),
        mean_score: mean(summaries.iter().map(|s| s.score as f64).sum()),
        max_score: summaries.iter().map(|s| s.score).max().unwrap_or(0),
        min_score: summaries.iter().map(|s| s.score).min().unwrap_or(0),
        mean_turns: mean(summaries.iter().map(|s| s.turns as f64).sum()),
        max_turns: summaries.iter().map(|s| s.turns).max().unwrap_or(0),
        mean_lines: mean(summaries.iter().map(|s| s.lines as f64).sum()),
    }
}

fn report_results(results: &SimulationResults, json: bool) {
    if json {
        if let Ok(text) = serde_json::to_string_pretty(results) {
            println!("{}", text);
        }
        return;
    }

    println!("\n=== Simulation Results ===");
    println!("Games:       {} ({} finished)", results.games, results.finished);
    println!("Mean score:  {:.1}", results.mean_score);
    println!("Score range: {} - {}", results.min_score, results.max_score);
    println!("Mean turns:  {:.1} (max {})", results.mean_turns, results.max_turns);
    println!("Mean lines:  {:.1}", results.mean_lines);
}
