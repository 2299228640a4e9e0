//! HappyHex Core - Hexagonal block-placement puzzle engine
//!
//! This crate provides the core game logic for HappyHex:
//! - Hex coordinates on three line axes (I, J, K)
//! - Blocks, pieces and the canonical piece catalogue
//! - The board engine with placement checks and line elimination
//! - Piece queue and difficulty-dependent piece selection
//! - Score/turn game state and automatic players

pub mod hex;
pub mod block;
pub mod grid;
pub mod piece;
pub mod catalog;
pub mod engine;
pub mod queue;
pub mod selector;
pub mod game;
pub mod autoplay;
pub mod config;
pub mod error;

// Re-exports for convenient access
pub use hex::{Hex, LineAxis};
pub use block::{Block, ColorIndex, EMPTY_COLOR, FILLED_COLOR};
pub use grid::HexGrid;
pub use piece::Piece;
pub use catalog::{Shape, ShapeId, SHAPES, PieceDistribution, get_shape, shape_index};
pub use engine::{HexEngine, Elimination, Line, ELIMINATION_POINTS, MAX_RADIUS};
pub use queue::PieceQueue;
pub use selector::{Difficulty, PieceSelector};
pub use game::{Game, Placement, Turn};
pub use autoplay::{GameSummary, GreedyPlayer, Move, Player, RandomPlayer, play_to_end};
pub use config::{GameConfig, GameSize};
pub use error::EngineError;
