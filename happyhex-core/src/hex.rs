//! Hex grid geometry with line coordinates
//!
//! Every cell lies on three lines, one per axis. A coordinate is stored as its
//! I and K line indices; the J line index is derived as `J = K - I`
//! (equivalently `I + J - K = 0`).
//!
//! ```text
//!    I
//!   / * (1, 2, 3)
//!  /     * (3, 1, 4)
//! o - - J
//!  \ * (2, -1, 1)
//!   \
//!    K
//! ```

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// The three line axes of the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineAxis {
    I,
    J,
    K,
}

impl LineAxis {
    pub const ALL: [LineAxis; 3] = [LineAxis::I, LineAxis::J, LineAxis::K];
}

impl fmt::Display for LineAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineAxis::I => "I",
            LineAxis::J => "J",
            LineAxis::K => "K",
        };
        f.write_str(name)
    }
}

/// Offsets (di, dk) of the six neighbours of a cell.
/// Pairs 0/5 share a J line, 1/4 share a K line, 2/3 share an I line.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 6] = [
    (-1, -1),
    (-1, 0),
    (0, -1),
    (0, 1),
    (1, 0),
    (1, 1),
];

/// Hex coordinate in line indices
///
/// Ordered by I first, then K, which is the storage order of board blocks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    i: i32,
    k: i32,
}

impl Hex {
    pub const ORIGIN: Hex = Hex::new(0, 0);

    /// Create a coordinate from its I and K line indices
    pub const fn new(i: i32, k: i32) -> Self {
        Self { i, k }
    }

    /// I line index
    pub const fn i(&self) -> i32 {
        self.i
    }

    /// J line index, always `k - i`
    pub const fn j(&self) -> i32 {
        self.k.wrapping_sub(self.i)
    }

    /// K line index
    pub const fn k(&self) -> i32 {
        self.k
    }

    /// Line index on the given axis
    pub const fn line(&self, axis: LineAxis) -> i32 {
        match axis {
            LineAxis::I => self.i(),
            LineAxis::J => self.j(),
            LineAxis::K => self.k(),
        }
    }

    /// Addition that reports overflow instead of wrapping
    pub fn checked_add(self, other: Hex) -> Option<Hex> {
        Some(Hex::new(self.i.checked_add(other.i)?, self.k.checked_add(other.k)?))
    }

    /// Subtraction that reports overflow instead of wrapping
    pub fn checked_sub(self, other: Hex) -> Option<Hex> {
        Some(Hex::new(self.i.checked_sub(other.i)?, self.k.checked_sub(other.k)?))
    }

    /// Move along the I axis: stays on the same I line
    pub fn shift_i(self, unit: i32) -> Hex {
        Hex::new(self.i, self.k.saturating_add(unit))
    }

    /// Move along the J axis: stays on the same J line
    pub fn shift_j(self, unit: i32) -> Hex {
        Hex::new(self.i.saturating_add(unit), self.k.saturating_add(unit))
    }

    /// Move along the K axis: stays on the same K line
    pub fn shift_k(self, unit: i32) -> Hex {
        Hex::new(self.i.saturating_add(unit), self.k)
    }

    pub fn in_line_i(&self, other: Hex) -> bool {
        self.i() == other.i()
    }

    pub fn in_line_j(&self, other: Hex) -> bool {
        self.j() == other.j()
    }

    pub fn in_line_k(&self, other: Hex) -> bool {
        self.k() == other.k()
    }

    /// Distance in steps between two cells
    pub fn distance_to(&self, other: Hex) -> i64 {
        let di = i64::from(other.i) - i64::from(self.i);
        let dk = i64::from(other.k) - i64::from(self.k);
        (di.abs() + dk.abs() + (dk - di).abs()) / 2
    }

    /// True if the two cells share an edge
    pub fn adjacent(&self, other: Hex) -> bool {
        self.distance_to(other) == 1
    }

    /// The six surrounding cells, in [`NEIGHBOR_OFFSETS`] order
    pub fn neighbors(&self) -> [Hex; 6] {
        NEIGHBOR_OFFSETS.map(|(di, dk)| *self + Hex::new(di, dk))
    }

    /// Check if this cell belongs to a board of the given radius.
    ///
    /// The board spans `0 <= I < 2r-1`, `-r < J < r` and `0 <= K < 2r-1`.
    pub fn in_range(&self, radius: i32) -> bool {
        let r = i64::from(radius);
        let (i, k) = (i64::from(self.i), i64::from(self.k));
        let j = k - i;
        (0..2 * r - 1).contains(&i) && -r < j && j < r && (0..2 * r - 1).contains(&k)
    }
}

impl Add for Hex {
    type Output = Hex;

    /// Saturates on overflow; a saturated coordinate lies outside every board.
    fn add(self, other: Hex) -> Hex {
        Hex::new(self.i.saturating_add(other.i), self.k.saturating_add(other.k))
    }
}

impl Sub for Hex {
    type Output = Hex;

    fn sub(self, other: Hex) -> Hex {
        Hex::new(self.i.saturating_sub(other.i), self.k.saturating_sub(other.k))
    }
}

impl From<(i32, i32)> for Hex {
    fn from((i, k): (i32, i32)) -> Self {
        Hex::new(i, k)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{I = {}, J = {}, K = {}}}", self.i(), self.j(), self.k())
    }
}
