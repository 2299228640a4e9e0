//! Game configuration

use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::engine::MAX_RADIUS;
use crate::selector::Difficulty;

/// Palette size used when none is configured
pub const DEFAULT_COLOR_COUNT: usize = 12;

/// Preset board and queue sizes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl GameSize {
    pub fn radius(self) -> i32 {
        match self {
            GameSize::Small => 5,
            GameSize::Medium => 8,
            GameSize::Large => 11,
        }
    }

    pub fn queue_size(self) -> usize {
        match self {
            GameSize::Small => 3,
            GameSize::Medium => 5,
            GameSize::Large => 7,
        }
    }
}

impl std::str::FromStr for GameSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Ok(GameSize::Small),
            "medium" => Ok(GameSize::Medium),
            "large" => Ok(GameSize::Large),
            _ => Err(format!("unknown game size '{}'", s)),
        }
    }
}

/// Settings for one game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board radius
    pub radius: i32,
    /// Number of pieces offered at once
    pub queue_size: usize,
    pub difficulty: Difficulty,
    /// Number of palette colors pieces are drawn from
    pub color_count: usize,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::sized(GameSize::default())
    }
}

impl GameConfig {
    /// Config for a preset size
    pub fn sized(size: GameSize) -> Self {
        Self {
            radius: size.radius(),
            queue_size: size.queue_size(),
            difficulty: Difficulty::Normal,
            color_count: DEFAULT_COLOR_COUNT,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_radius(mut self, radius: i32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_queue_size(mut self, queue_size: usize) -> Self {
        self.queue_size = queue_size;
        self
    }

    /// Reject settings no game can start with
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(1..=MAX_RADIUS).contains(&self.radius) {
            bail!("radius must be between 1 and {}, got {}", MAX_RADIUS, self.radius);
        }
        if self.queue_size < 1 {
            bail!("queue size must be at least 1, got {}", self.queue_size);
        }
        if self.color_count < 1 {
            bail!("color count must be at least 1, got {}", self.color_count);
        }
        Ok(())
    }

    /// Load and validate a config from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }
}
