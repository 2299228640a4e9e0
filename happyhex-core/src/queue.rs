//! Fixed-length queue of upcoming pieces

use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::engine::HexEngine;
use crate::error::{EngineError, Result};
use crate::piece::Piece;
use crate::selector::PieceSelector;

/// Pieces the player can choose from. Taking one shifts the rest towards
/// the front and refills the back, so the length never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QueueSerde")]
pub struct PieceQueue {
    pieces: Vec<Piece>,
    color_count: usize,
}

#[derive(Deserialize)]
struct QueueSerde {
    pieces: Vec<Piece>,
    color_count: usize,
}

impl TryFrom<QueueSerde> for PieceQueue {
    type Error = EngineError;

    fn try_from(data: QueueSerde) -> Result<Self> {
        Self::from_pieces(data.pieces, data.color_count)
    }
}

impl PieceQueue {
    /// Fill a new queue of `size` pieces
    pub fn new<S, R>(
        size: usize,
        color_count: usize,
        selector: &S,
        engine: &HexEngine,
        rng: &mut R,
    ) -> Result<Self>
    where
        S: PieceSelector + ?Sized,
        R: RngCore,
    {
        if size == 0 {
            return Err(EngineError::InvalidQueueSize(size));
        }
        let pieces = (0..size)
            .map(|_| selector.next_piece(engine, rng, color_count))
            .collect();
        Ok(Self { pieces, color_count })
    }

    /// Build a queue from explicit pieces
    pub fn from_pieces(pieces: Vec<Piece>, color_count: usize) -> Result<Self> {
        if pieces.is_empty() {
            return Err(EngineError::InvalidQueueSize(0));
        }
        Ok(Self { pieces, color_count })
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn get(&self, index: usize) -> Result<&Piece> {
        self.pieces.get(index).ok_or(EngineError::QueueIndex {
            index,
            len: self.pieces.len(),
        })
    }

    pub fn first(&self) -> Option<&Piece> {
        self.pieces.first()
    }

    pub fn last(&self) -> Option<&Piece> {
        self.pieces.last()
    }

    /// Remove the piece at `index`, shift the later ones forward and draw a
    /// replacement at the back
    pub fn fetch<S, R>(&mut self, index: usize, selector: &S, engine: &HexEngine, rng: &mut R) -> Result<Piece>
    where
        S: PieceSelector + ?Sized,
        R: RngCore,
    {
        if index >= self.pieces.len() {
            return Err(EngineError::QueueIndex {
                index,
                len: self.pieces.len(),
            });
        }
        let taken = self.pieces.remove(index);
        self.pieces.push(selector.next_piece(engine, rng, self.color_count));
        Ok(taken)
    }

    /// Take the front piece
    pub fn next<S, R>(&mut self, selector: &S, engine: &HexEngine, rng: &mut R) -> Result<Piece>
    where
        S: PieceSelector + ?Sized,
        R: RngCore,
    {
        self.fetch(0, selector, engine, rng)
    }

    /// Overwrite the piece at `index`
    pub fn inject(&mut self, piece: Piece, index: usize) -> Result<()> {
        let len = self.pieces.len();
        let slot = self
            .pieces
            .get_mut(index)
            .ok_or(EngineError::QueueIndex { index, len })?;
        *slot = piece;
        Ok(())
    }

    /// Redraw every piece
    pub fn reset<S, R>(&mut self, selector: &S, engine: &HexEngine, rng: &mut R)
    where
        S: PieceSelector + ?Sized,
        R: RngCore,
    {
        for slot in &mut self.pieces {
            *slot = selector.next_piece(engine, rng, self.color_count);
        }
    }
}

impl fmt::Display for PieceQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Queue[")?;
        for (n, piece) in self.pieces.iter().enumerate() {
            if n > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", piece)?;
        }
        write!(f, "]")
    }
}
