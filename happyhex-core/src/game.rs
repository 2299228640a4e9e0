//! Game state: board, queue, score and turn counter
//!
//! Placing a piece scores one point per block and advances the turn.
//! Eliminating scores [`ELIMINATION_POINTS`](crate::engine::ELIMINATION_POINTS) per line membership. The two are
//! separate steps; [`Game::play_turn`] runs both.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::engine::{Elimination, HexEngine};
use crate::error::{EngineError, Result};
use crate::hex::Hex;
use crate::piece::Piece;
use crate::queue::PieceQueue;
use crate::selector::{Difficulty, PieceSelector};

/// A piece taken from the queue and put on the board
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub queue_index: usize,
    pub origin: Hex,
    pub piece: Piece,
    /// Blocks filled, which is also the points earned by placing
    pub size: usize,
    /// Line memberships cleared by the elimination that followed
    pub memberships: usize,
}

/// Result of [`Game::play_turn`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub placement: Placement,
    pub elimination: Elimination,
}

impl Turn {
    /// Points earned this turn
    pub fn points(&self) -> u64 {
        self.placement.size as u64 + self.elimination.score()
    }
}

/// A running game
#[derive(Clone, Debug)]
pub struct Game {
    engine: HexEngine,
    queue: PieceQueue,
    difficulty: Difficulty,
    score: u64,
    turn: u64,
    rng: ChaCha8Rng,
    moves: Vec<Placement>,
}

impl Game {
    /// Start a game with an empty board and a full queue
    pub fn new(config: &GameConfig) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let engine = HexEngine::new(config.radius)?;
        let queue = PieceQueue::new(
            config.queue_size,
            config.color_count,
            &config.difficulty,
            &engine,
            &mut rng,
        )?;

        tracing::debug!(
            radius = config.radius,
            queue = config.queue_size,
            difficulty = %config.difficulty,
            "new game"
        );

        Ok(Self {
            engine,
            queue,
            difficulty: config.difficulty,
            score: 0,
            turn: 0,
            rng,
            moves: Vec::new(),
        })
    }

    /// Resume from an existing board and queue with a fresh score
    pub fn from_parts(engine: HexEngine, queue: PieceQueue, difficulty: Difficulty, seed: u64) -> Self {
        Self {
            engine,
            queue,
            difficulty,
            score: 0,
            turn: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            moves: Vec::new(),
        }
    }

    pub fn engine(&self) -> &HexEngine {
        &self.engine
    }

    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Number of pieces placed so far
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Placements so far, oldest first
    pub fn moves(&self) -> &[Placement] {
        &self.moves
    }

    /// True once no queued piece fits anywhere
    pub fn is_over(&self) -> bool {
        self.engine.is_game_over(self.queue.pieces())
    }

    /// Place the queued piece at `queue_index` with its origin at `origin`.
    ///
    /// Scores the piece size and refills the queue, but leaves full lines in
    /// place until [`Game::eliminate`] is called. Fails with
    /// [`EngineError::GameOver`] if the placement is illegal and no queued
    /// piece fits anywhere.
    pub fn place(&mut self, queue_index: usize, origin: Hex) -> Result<Placement> {
        let piece = self.queue.get(queue_index)?.clone();
        let size = match self.engine.add(origin, &piece) {
            Ok(size) => size,
            Err(_) if self.is_over() => return Err(EngineError::GameOver),
            Err(e) => return Err(e),
        };

        let selector: &dyn PieceSelector = &self.difficulty;
        self.queue.fetch(queue_index, selector, &self.engine, &mut self.rng)?;
        self.score += size as u64;
        self.turn += 1;

        let placement = Placement {
            queue_index,
            origin,
            piece,
            size,
            memberships: 0,
        };
        self.moves.push(placement.clone());
        Ok(placement)
    }

    /// Clear full lines and score them
    pub fn eliminate(&mut self) -> Elimination {
        let elimination = self.engine.eliminate();
        self.score += elimination.score();
        if let Some(last) = self.moves.last_mut() {
            last.memberships += elimination.memberships;
        }
        elimination
    }

    /// Place then eliminate
    pub fn play_turn(&mut self, queue_index: usize, origin: Hex) -> Result<Turn> {
        let mut placement = self.place(queue_index, origin)?;
        let elimination = self.eliminate();
        placement.memberships = elimination.memberships;
        Ok(Turn {
            placement,
            elimination,
        })
    }

    /// Empty the board, redraw the queue and zero the counters
    pub fn restart(&mut self) {
        self.engine.reset();
        let selector: &dyn PieceSelector = &self.difficulty;
        self.queue.reset(selector, &self.engine, &mut self.rng);
        self.score = 0;
        self.turn = 0;
        self.moves.clear();
    }
}
