//! Arguments shared by the game-playing commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use happyhex_core::{Difficulty, GameConfig, GameSize, GreedyPlayer, Player, RandomPlayer};

/// Automatic player kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    /// Most immediate points, snug fits on ties
    Greedy,
    /// Uniformly random legal move
    Random,
}

#[derive(Args, Clone, Debug)]
pub struct GameArgs {
    /// Game config JSON file (flags below override it)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Preset board and queue size: small, medium or large
    #[arg(long)]
    pub size: Option<GameSize>,

    /// Board radius
    #[arg(long)]
    pub radius: Option<i32>,

    /// Number of queued pieces
    #[arg(long)]
    pub queue: Option<usize>,

    /// Difficulty: normal, easy, hard or god
    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Automatic player
    #[arg(long, value_enum, default_value = "greedy")]
    pub player: PlayerKind,

    /// Stop after this many turns
    #[arg(long)]
    pub max_turns: Option<u64>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

impl GameArgs {
    /// Merge the config file, the size preset and the explicit flags
    pub fn to_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("Failed to load game config: {}", path.display()))?,
            None => GameConfig::default(),
        };

        if let Some(size) = self.size {
            config.radius = size.radius();
            config.queue_size = size.queue_size();
        }
        if let Some(radius) = self.radius {
            config.radius = radius;
        }
        if let Some(queue) = self.queue {
            config.queue_size = queue;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Build the chosen player. A seeded random player follows the game seed.
pub fn make_player(kind: PlayerKind, seed: Option<u64>) -> Box<dyn Player + Send> {
    match kind {
        PlayerKind::Greedy => Box::new(GreedyPlayer::new()),
        PlayerKind::Random => match seed {
            Some(s) => Box::new(RandomPlayer::with_seed(s)),
            None => Box::new(RandomPlayer::new()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> GameArgs {
        GameArgs {
            config: None,
            size: None,
            radius: None,
            queue: None,
            difficulty: None,
            seed: None,
            player: PlayerKind::Greedy,
            max_turns: None,
            json: false,
        }
    }

    #[test]
    fn test_flags_override_preset() {
        let mut a = args();
        a.size = Some(GameSize::Large);
        a.queue = Some(2);
        a.difficulty = Some(Difficulty::Hard);
        let config = a.to_config().unwrap();
        assert_eq!(config.radius, 11);
        assert_eq!(config.queue_size, 2);
        assert_eq!(config.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let mut a = args();
        a.radius = Some(0);
        assert!(a.to_config().is_err());
        a.radius = Some(i32::MAX);
        assert!(a.to_config().is_err());
    }

    #[test]
    fn test_player_names() {
        assert_eq!(make_player(PlayerKind::Greedy, None).name(), "greedy");
        assert_eq!(make_player(PlayerKind::Random, Some(1)).name(), "random");
    }
}
