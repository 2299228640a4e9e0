//! Canonical piece shapes and weighted piece generation

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::block::ColorIndex;
use crate::piece::Piece;

/// Index into [`SHAPES`]
pub type ShapeId = usize;

/// Named piece shape in local `(i, k)` offsets
#[derive(Clone, Debug)]
pub struct Shape {
    pub name: &'static str,
    pub offsets: &'static [(i32, i32)],
}

impl Shape {
    const fn new(name: &'static str, offsets: &'static [(i32, i32)]) -> Self {
        Self { name, offsets }
    }

    /// Instantiate the shape with a color
    pub fn piece(&self, color: ColorIndex) -> Piece {
        Piece::from_shape(color, self.offsets)
    }

    pub fn size(&self) -> usize {
        self.offsets.len()
    }
}

/// All 36 catalogue shapes
pub static SHAPES: [Shape; 36] = [
    Shape::new("uno", &[(0, 0)]),
    // 3 cells
    Shape::new("triangle3A", &[(0, 0), (0, 1), (1, 1)]),
    Shape::new("triangle3B", &[(-1, -1), (0, -1), (0, 0)]),
    Shape::new("line3I", &[(0, -1), (0, 0), (0, 1)]),
    Shape::new("line3J", &[(-1, -1), (0, 0), (1, 1)]),
    Shape::new("line3K", &[(-1, 0), (0, 0), (1, 0)]),
    Shape::new("corner3Il", &[(-1, -1), (0, 0), (1, 0)]),
    Shape::new("corner3Jl", &[(-1, 0), (0, -1), (0, 0)]),
    Shape::new("corner3Kl", &[(-1, -1), (0, 0), (0, 1)]),
    Shape::new("corner3Ir", &[(-1, 0), (0, 0), (1, 1)]),
    Shape::new("corner3Jr", &[(0, 0), (0, 1), (1, 0)]),
    Shape::new("corner3Kr", &[(0, -1), (0, 0), (1, 1)]),
    // 4 cells
    Shape::new("rhombus4I", &[(0, -1), (0, 0), (1, 0), (1, 1)]),
    Shape::new("rhombus4J", &[(-1, -1), (-1, 0), (0, -1), (0, 0)]),
    Shape::new("rhombus4K", &[(-1, -1), (0, -1), (0, 0), (1, 0)]),
    Shape::new("fan4A", &[(-1, -1), (0, 0), (0, 1), (1, 0)]),
    Shape::new("fan4B", &[(-1, 0), (0, -1), (0, 0), (1, 1)]),
    Shape::new("corner4Ir", &[(-1, -1), (-1, 0), (0, -1), (1, 0)]),
    Shape::new("corner4Il", &[(-1, 0), (0, 1), (1, 0), (1, 1)]),
    Shape::new("corner4Jr", &[(-1, -1), (0, -1), (1, 0), (1, 1)]),
    Shape::new("corner4Jl", &[(-1, -1), (-1, 0), (0, 1), (1, 1)]),
    Shape::new("corner4Kr", &[(-1, -1), (-1, 0), (0, -1), (0, 1)]),
    Shape::new("corner4Kl", &[(0, -1), (0, 1), (1, 0), (1, 1)]),
    Shape::new("asymmetrical4Ia", &[(-1, -1), (0, -1), (0, 0), (0, 1)]),
    Shape::new("asymmetrical4Ib", &[(0, -1), (0, 0), (0, 1), (1, 0)]),
    Shape::new("asymmetrical4Ic", &[(-1, 0), (0, -1), (0, 0), (0, 1)]),
    Shape::new("asymmetrical4Id", &[(0, -1), (0, 0), (0, 1), (1, 1)]),
    Shape::new("asymmetrical4Ja", &[(-1, -1), (0, 0), (1, 0), (1, 1)]),
    Shape::new("asymmetrical4Jb", &[(-1, -1), (0, 0), (0, 1), (1, 1)]),
    Shape::new("asymmetrical4Jc", &[(-1, -1), (0, -1), (0, 0), (1, 1)]),
    Shape::new("asymmetrical4Jd", &[(-1, -1), (-1, 0), (0, 0), (1, 1)]),
    Shape::new("asymmetrical4Ka", &[(-1, 0), (0, 0), (0, 1), (1, 0)]),
    Shape::new("asymmetrical4Kb", &[(-1, -1), (-1, 0), (0, 0), (1, 0)]),
    Shape::new("asymmetrical4Kc", &[(-1, 0), (0, 0), (1, 0), (1, 1)]),
    Shape::new("asymmetrical4Kd", &[(-1, 0), (0, -1), (0, 0), (1, 0)]),
    // 7 cells
    Shape::new(
        "bigBlock",
        &[(-1, -1), (-1, 0), (0, -1), (0, 0), (0, 1), (1, 0), (1, 1)],
    ),
];

/// Six-cell ring, only handed out by hard mode
pub static HOLLOW: Shape = Shape::new(
    "hollow",
    &[(-1, -1), (-1, 0), (0, -1), (0, 1), (1, 0), (1, 1)],
);

pub const UNO: ShapeId = 0;
pub const FAN_4A: ShapeId = 15;
pub const FAN_4B: ShapeId = 16;
pub const CORNER_4IR: ShapeId = 17;
pub const CORNER_4IL: ShapeId = 18;
pub const CORNER_4JR: ShapeId = 19;
pub const CORNER_4JL: ShapeId = 20;
pub const CORNER_4KR: ShapeId = 21;
pub const CORNER_4KL: ShapeId = 22;

/// Find a shape by name
pub fn shape_index(name: &str) -> Option<ShapeId> {
    SHAPES.iter().position(|s| s.name == name)
}

/// Get shape by index
pub fn get_shape(id: ShapeId) -> &'static Shape {
    &SHAPES[id % SHAPES.len()]
}

/// Relative frequency of each shape (shape id, weight)
const NORMAL_WEIGHTS: &[(ShapeId, u32)] = &[
    (1, 6), (2, 6),
    (3, 4), (4, 4), (5, 4),
    (6, 2), (7, 2), (8, 2), (9, 2), (10, 2), (11, 2),
    (12, 4), (13, 4), (14, 4),
    (15, 6), (16, 6),
    (17, 2), (18, 2), (19, 2), (20, 2), (21, 2), (22, 2),
    (23, 1), (24, 1), (25, 1), (26, 1), (27, 1), (28, 1),
    (29, 1), (30, 1), (31, 1), (32, 1), (33, 1), (34, 1),
    (35, 2),
];

/// Favors 3-cell shapes, no big block, occasional single cell
const EASY_WEIGHTS: &[(ShapeId, u32)] = &[
    (0, 30),
    (1, 200), (2, 200),
    (3, 150), (4, 150), (5, 150),
    (6, 75), (7, 75), (8, 75), (9, 75), (10, 75), (11, 75),
    (12, 100), (13, 100), (14, 100),
    (15, 20), (16, 20),
    (17, 10), (18, 10), (19, 10), (20, 10), (21, 10), (22, 10),
    (23, 10), (24, 10), (25, 10), (26, 10), (27, 10), (28, 10),
    (29, 10), (30, 10), (31, 10), (32, 10), (33, 10), (34, 10),
];

/// Weighted table used to draw new pieces
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceDistribution {
    Normal,
    Easy,
}

impl PieceDistribution {
    fn weights(self) -> &'static [(ShapeId, u32)] {
        match self {
            PieceDistribution::Normal => NORMAL_WEIGHTS,
            PieceDistribution::Easy => EASY_WEIGHTS,
        }
    }

    /// Draw a shape id
    pub fn sample_shape<R: Rng + ?Sized>(self, rng: &mut R) -> ShapeId {
        self.weights()
            .choose_weighted(rng, |&(_, weight)| weight)
            .map(|&(id, _)| id)
            .unwrap_or(UNO)
    }

    /// Draw a piece with a random palette color
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R, color_count: usize) -> Piece {
        let shape = get_shape(self.sample_shape(rng));
        shape.piece(random_color(rng, color_count))
    }
}

/// Random palette index in `0..color_count`
pub fn random_color<R: Rng + ?Sized>(rng: &mut R, color_count: usize) -> ColorIndex {
    rng.gen_range(0..color_count.max(1)) as ColorIndex
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::HexGrid;
    use crate::piece::ENCODING_OFFSETS;
    use crate::hex::Hex;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_shapes_are_valid() {
        for shape in SHAPES.iter().chain(std::iter::once(&HOLLOW)) {
            let piece = Piece::from_offsets(0, shape.offsets);
            assert!(piece.is_ok(), "{} should be a valid piece", shape.name);
            for &(i, k) in shape.offsets {
                assert!(ENCODING_OFFSETS.contains(&Hex::new(i, k)), "{} leaves the 7-cell area", shape.name);
            }
        }
    }

    #[test]
    fn test_shapes_are_distinct() {
        let mut bits: Vec<u8> = SHAPES.iter().map(|s| s.piece(0).to_bits().unwrap()).collect();
        bits.sort_unstable();
        bits.dedup();
        assert_eq!(bits.len(), SHAPES.len());
    }

    #[test]
    fn test_shape_lookup() {
        assert_eq!(shape_index("uno"), Some(UNO));
        assert_eq!(shape_index("fan4A"), Some(FAN_4A));
        assert_eq!(shape_index("corner4Kl"), Some(CORNER_4KL));
        assert_eq!(shape_index("bigBlock"), Some(35));
        assert_eq!(shape_index("nope"), None);
        assert_eq!(get_shape(CORNER_4JR).name, "corner4Jr");
    }

    #[test]
    fn test_shape_round_trip_through_bits() {
        for shape in &SHAPES {
            let piece = shape.piece(5);
            let decoded = Piece::from_bits(piece.to_bits().unwrap(), 5).unwrap();
            assert_eq!(decoded, piece, "{}", shape.name);
            assert_eq!(decoded.len(), shape.size());
        }
    }

    #[test]
    fn test_distribution_weights() {
        let normal: u32 = NORMAL_WEIGHTS.iter().map(|&(_, w)| w).sum();
        let easy: u32 = EASY_WEIGHTS.iter().map(|&(_, w)| w).sum();
        assert_eq!(normal, 86);
        assert_eq!(easy, 1850);
        assert!(EASY_WEIGHTS.iter().all(|&(id, _)| id != 35));
        assert!(NORMAL_WEIGHTS.iter().all(|&(id, _)| id != UNO));
    }

    #[test]
    fn test_sampling_is_seeded() {
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let pa = PieceDistribution::Normal.sample(&mut a, 12);
            let pb = PieceDistribution::Normal.sample(&mut b, 12);
            assert_eq!(pa, pb);
            assert!((0..12).contains(&pa.color()));
        }
    }
}
