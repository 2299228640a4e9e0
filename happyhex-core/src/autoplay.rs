//! Automatic players for headless games

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::engine::ELIMINATION_POINTS;
use crate::error::Result;
use crate::game::Game;
use crate::grid::HexGrid;
use crate::hex::Hex;
use crate::selector::Difficulty;

/// Queue slot and origin to play
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub queue_index: usize,
    pub origin: Hex,
}

/// Chooses moves for a game
pub trait Player {
    /// Pick a legal move, or `None` if there is none
    fn choose(&mut self, game: &Game) -> Option<Move>;

    fn name(&self) -> &'static str;
}

/// Every legal move, queue slot first
pub fn legal_moves(game: &Game) -> Vec<Move> {
    let engine = game.engine();
    game.queue()
        .pieces()
        .iter()
        .enumerate()
        .flat_map(|(queue_index, piece)| {
            engine
                .check_positions(piece)
                .into_iter()
                .map(move |origin| Move { queue_index, origin })
        })
        .collect()
}

/// Takes the move with the most immediate points, preferring snug fits on
/// ties
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyPlayer;

impl GreedyPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Player for GreedyPlayer {
    fn choose(&mut self, game: &Game) -> Option<Move> {
        let engine = game.engine();
        let mut best: Option<(Move, u64, f64)> = None;

        for (queue_index, piece) in game.queue().pieces().iter().enumerate() {
            for origin in engine.check_positions(piece) {
                let Some(memberships) = engine.preview_eliminate(origin, piece) else {
                    continue;
                };
                let points = piece.len() as u64 + ELIMINATION_POINTS * memberships as u64;
                let density = engine.dense_index(origin, piece);
                let better = match best {
                    None => true,
                    Some((_, p, d)) => points > p || (points == p && density > d),
                };
                if better {
                    best = Some((Move { queue_index, origin }, points, density));
                }
            }
        }

        best.map(|(m, _, _)| m)
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

/// Plays a uniformly random legal move
#[derive(Clone, Debug)]
pub struct RandomPlayer {
    rng: ChaCha8Rng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn choose(&mut self, game: &Game) -> Option<Move> {
        legal_moves(game).choose(&mut self.rng).copied()
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Outcome of an automatic game
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub player: String,
    pub difficulty: Difficulty,
    pub radius: i32,
    pub score: u64,
    pub turns: u64,
    /// Lines completed over the whole game
    pub lines: usize,
    /// Blocks on the board at the end
    pub filled: usize,
    /// False if the turn limit stopped the game first
    pub game_over: bool,
}

/// Let `player` play until no piece fits or `max_turns` is reached
pub fn play_to_end<P: Player + ?Sized>(game: &mut Game, player: &mut P, max_turns: Option<u64>) -> Result<GameSummary> {
    let mut lines = 0;

    while max_turns.map_or(true, |max| game.turn() < max) {
        let Some(choice) = player.choose(game) else {
            break;
        };
        let turn = game.play_turn(choice.queue_index, choice.origin)?;
        lines += turn.elimination.lines.len();
    }

    let summary = GameSummary {
        player: player.name().to_string(),
        difficulty: game.difficulty(),
        radius: game.engine().radius(),
        score: game.score(),
        turns: game.turn(),
        lines,
        filled: game.engine().filled(),
        game_over: game.is_over(),
    };
    tracing::debug!(score = summary.score, turns = summary.turns, "game finished");
    Ok(summary)
}
