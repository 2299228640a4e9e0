//! Engine error types

use crate::hex::Hex;

/// Errors raised by the engine and its collaborators.
///
/// Placement predicates such as [`HexEngine::check_add`](crate::HexEngine::check_add)
/// never produce these; they are reserved for calls that would corrupt state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Radius must be between 1 and {max}, got {0}", max = crate::engine::MAX_RADIUS)]
    InvalidRadius(i32),

    #[error("Block out of grid when adding at {0}")]
    OutOfRange(Hex),

    #[error("Cannot add into existing block at {0}")]
    Occupied(Hex),

    #[error("Piece must contain at least one block")]
    EmptyPiece,

    #[error("Piece already contains a block at {0}")]
    DuplicateBlock(Hex),

    #[error("Piece block at {0} is not occupied")]
    EmptyBlock(Hex),

    #[error("Block at {0} is outside the 7-cell encoding area")]
    NotEncodable(Hex),

    #[error("Invalid piece bits {0:#04X}: must be non-zero with an empty most significant bit")]
    InvalidPieceBits(u8),

    #[error("Snapshot of length {0} does not describe a hexagonal board")]
    InvalidSnapshotLength(usize),

    #[error("Queue index {index} out of bound for length {len}")]
    QueueIndex { index: usize, len: usize },

    #[error("Queue size must be at least 1, got {0}")]
    InvalidQueueSize(usize),

    #[error("Game is over")]
    GameOver,
}

pub type Result<T> = std::result::Result<T, EngineError>;
