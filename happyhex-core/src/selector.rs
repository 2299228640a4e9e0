//! Difficulty modes
//!
//! A selector decides which piece enters the queue next. The difficulty is
//! picked once per game; every refill goes through the same selector.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::block::ColorIndex;
use crate::catalog::{
    get_shape, random_color, PieceDistribution, Shape, ShapeId, CORNER_4IL, CORNER_4IR,
    CORNER_4JL, CORNER_4JR, CORNER_4KL, CORNER_4KR, FAN_4A, FAN_4B, HOLLOW, SHAPES, UNO,
};
use crate::engine::HexEngine;
use crate::piece::Piece;

/// Shapes considered by hard mode when looking for an awkward piece
const HARD_CANDIDATES: usize = 34;

/// A shape with fewer placements than this counts as awkward in hard mode
const HARD_THRESHOLD: usize = 6;

/// God mode steps in when the drawn piece has fewer placements than this
const GOD_THRESHOLD: usize = 2;

/// Roll table for hard mode's rare substitution (one of 13 outcomes)
const HARD_SUBSTITUTES: [Option<Substitute>; 13] = [
    Some(Substitute::Hollow),
    Some(Substitute::Catalogue(FAN_4A)),
    Some(Substitute::Catalogue(FAN_4B)),
    Some(Substitute::Catalogue(CORNER_4IL)),
    Some(Substitute::Catalogue(CORNER_4IR)),
    Some(Substitute::Catalogue(CORNER_4JL)),
    Some(Substitute::Catalogue(CORNER_4JR)),
    Some(Substitute::Catalogue(CORNER_4KL)),
    Some(Substitute::Catalogue(CORNER_4KR)),
    Some(Substitute::Catalogue(FAN_4A)),
    Some(Substitute::Catalogue(FAN_4B)),
    None,
    None,
];

#[derive(Clone, Copy, Debug)]
enum Substitute {
    Hollow,
    Catalogue(ShapeId),
}

impl Substitute {
    fn shape(self) -> &'static Shape {
        match self {
            Substitute::Hollow => &HOLLOW,
            Substitute::Catalogue(id) => get_shape(id),
        }
    }
}

/// Source of the pieces that refill the queue
pub trait PieceSelector {
    /// Produce the next piece for the current board
    fn next_piece(&self, engine: &HexEngine, rng: &mut dyn rand::RngCore, color_count: usize) -> Piece;
}

/// Game difficulty
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Standard weighted distribution
    #[default]
    Normal,
    /// Smaller pieces, no big block
    Easy,
    /// Prefers shapes that barely fit
    Hard,
    /// Replaces pieces that barely fit with ones that do
    God,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Normal,
        Difficulty::Easy,
        Difficulty::Hard,
        Difficulty::God,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Normal => "normal",
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
            Difficulty::God => "god",
        }
    }

    fn distribution(self) -> PieceDistribution {
        match self {
            Difficulty::Easy => PieceDistribution::Easy,
            _ => PieceDistribution::Normal,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown difficulty '{}'", s))
    }
}

impl PieceSelector for Difficulty {
    fn next_piece(&self, engine: &HexEngine, rng: &mut dyn rand::RngCore, color_count: usize) -> Piece {
        let drawn = self.distribution().sample(rng, color_count);
        match self {
            Difficulty::Normal | Difficulty::Easy => drawn,
            Difficulty::Hard => hard_piece(engine, rng, color_count, drawn),
            Difficulty::God => god_piece(engine, rng, color_count, drawn),
        }
    }
}

fn hard_piece(engine: &HexEngine, rng: &mut dyn rand::RngCore, color_count: usize, drawn: Piece) -> Piece {
    let color = random_color(rng, color_count);
    let awkward: Vec<Piece> = SHAPES[..HARD_CANDIDATES]
        .iter()
        .map(|s| s.piece(color))
        .filter(|p| engine.placement_count(p) < HARD_THRESHOLD)
        .collect();
    if let Some(piece) = awkward.choose(rng) {
        tracing::debug!(candidates = awkward.len(), piece = %piece, "hard mode picked awkward piece");
        return piece.clone();
    }

    let roll = rng.gen_range(0..HARD_SUBSTITUTES.len());
    if let Some(substitute) = HARD_SUBSTITUTES[roll] {
        let piece = substitute.shape().piece(color);
        if engine.can_place(&piece) {
            tracing::debug!(shape = substitute.shape().name, "hard mode substituted piece");
            return piece;
        }
    }
    drawn
}

fn god_piece(engine: &HexEngine, rng: &mut dyn rand::RngCore, color_count: usize, drawn: Piece) -> Piece {
    if engine.placement_count(&drawn) >= GOD_THRESHOLD {
        return drawn;
    }
    let color: ColorIndex = random_color(rng, color_count);
    let fitting: Vec<Piece> = SHAPES
        .iter()
        .map(|s| s.piece(color))
        .filter(|p| engine.can_place(p))
        .collect();
    let piece = fitting
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| get_shape(UNO).piece(color));
    tracing::debug!(drawn = %drawn, piece = %piece, "god mode replaced piece");
    piece
}
