//! Placeable pieces
//!
//! A piece is a fixed cluster of occupied blocks at piece-local offsets. It is
//! translated onto the board by adding the placement origin to every offset.
//! Shape and color are fixed at construction: pieces are never rotated,
//! resized or recolored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::block::{Block, ColorIndex};
use crate::error::{EngineError, Result};
use crate::grid::HexGrid;
use crate::hex::Hex;

/// The 7-cell area covered by the compact encoding, most significant bit first
pub const ENCODING_OFFSETS: [Hex; 7] = [
    Hex::new(-1, -1),
    Hex::new(-1, 0),
    Hex::new(0, -1),
    Hex::new(0, 0),
    Hex::new(0, 1),
    Hex::new(1, 0),
    Hex::new(1, 1),
];

/// A placeable shape with a single color
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PieceSerde")]
pub struct Piece {
    color: ColorIndex,
    blocks: Vec<Block>,
}

/// Serialized form, checked by [`Piece::new`] on the way in
#[derive(Deserialize)]
struct PieceSerde {
    color: ColorIndex,
    blocks: Vec<Block>,
}

impl TryFrom<PieceSerde> for Piece {
    type Error = EngineError;

    fn try_from(data: PieceSerde) -> Result<Self> {
        if let Some(hole) = data.blocks.iter().find(|b| !b.state()) {
            return Err(EngineError::EmptyBlock(hole.coord()));
        }
        let offsets: Vec<Hex> = data.blocks.iter().map(Block::coord).collect();
        Self::new(data.color, &offsets)
    }
}

impl Piece {
    /// Build a piece from local offsets.
    ///
    /// Fails on an empty offset list or on a repeated offset.
    pub fn new(color: ColorIndex, offsets: &[Hex]) -> Result<Self> {
        if offsets.is_empty() {
            return Err(EngineError::EmptyPiece);
        }
        let mut blocks: Vec<Block> = offsets.iter().map(|&o| Block::filled(o, color)).collect();
        blocks.sort_by_key(Block::coord);
        if let Some(pair) = blocks.windows(2).find(|w| w[0].coord() == w[1].coord()) {
            return Err(EngineError::DuplicateBlock(pair[0].coord()));
        }
        Ok(Self { color, blocks })
    }

    /// Build a piece from `(i, k)` offset pairs
    pub fn from_offsets(color: ColorIndex, offsets: &[(i32, i32)]) -> Result<Self> {
        let hexes: Vec<Hex> = offsets.iter().copied().map(Hex::from).collect();
        Self::new(color, &hexes)
    }

    /// Single-cell piece
    pub fn uno(color: ColorIndex) -> Self {
        Self {
            color,
            blocks: vec![Block::filled(Hex::ORIGIN, color)],
        }
    }

    /// Piece from catalogue offsets, which are non-empty and distinct
    pub(crate) fn from_shape(color: ColorIndex, offsets: &[(i32, i32)]) -> Self {
        let mut blocks: Vec<Block> = offsets
            .iter()
            .map(|&o| Block::filled(Hex::from(o), color))
            .collect();
        blocks.sort_by_key(Block::coord);
        Self { color, blocks }
    }

    pub fn color(&self) -> ColorIndex {
        self.color
    }

    /// True if the piece covers the local offset `coord`
    pub fn state(&self, coord: Hex) -> bool {
        self.is_occupied(coord)
    }

    /// Local offsets, ordered by I then K
    pub fn offsets(&self) -> impl Iterator<Item = Hex> + '_ {
        self.blocks.iter().map(Block::coord)
    }

    /// Same occupancy pattern, ignoring color
    pub fn same_shape(&self, other: &Piece) -> bool {
        self.offsets().eq(other.offsets())
    }

    /// Pack the occupancy pattern into 7 bits.
    ///
    /// Color is not part of the encoding. Fails if a block lies outside
    /// [`ENCODING_OFFSETS`].
    pub fn to_bits(&self) -> Result<u8> {
        let mut bits = 0u8;
        for block in &self.blocks {
            let position = ENCODING_OFFSETS
                .iter()
                .position(|&o| o == block.coord())
                .ok_or(EngineError::NotEncodable(block.coord()))?;
            bits |= 1 << (6 - position);
        }
        Ok(bits)
    }

    /// Rebuild a piece from its 7-bit encoding
    pub fn from_bits(bits: u8, color: ColorIndex) -> Result<Self> {
        if bits == 0 || bits & 0x80 != 0 {
            return Err(EngineError::InvalidPieceBits(bits));
        }
        let offsets: Vec<Hex> = ENCODING_OFFSETS
            .iter()
            .enumerate()
            .filter(|(position, _)| bits >> (6 - position) & 1 == 1)
            .map(|(_, &o)| o)
            .collect();
        Self::new(color, &offsets)
    }
}

impl HexGrid for Piece {
    fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    fn block(&self, coord: Hex) -> Option<&Block> {
        self.blocks.iter().find(|b| b.coord() == coord)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Piece{{")?;
        for (n, offset) in self.offsets().enumerate() {
            if n > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, {})", offset.i(), offset.k())?;
        }
        write!(f, "}}")
    }
}
