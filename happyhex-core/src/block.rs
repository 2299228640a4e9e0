//! A single occupiable cell

use serde::{Deserialize, Serialize};

use crate::hex::Hex;

/// Color tag of a block. Non-negative values index the palette of the
/// rendering layer; the engine never interprets them.
pub type ColorIndex = i32;

/// Color of an empty block
pub const EMPTY_COLOR: ColorIndex = -1;

/// Color of a block filled without a specific piece color
pub const FILLED_COLOR: ColorIndex = -2;

/// A cell with a fixed coordinate, an occupancy flag and a color tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    coord: Hex,
    state: bool,
    color: ColorIndex,
}

impl Block {
    /// Empty block at `coord`
    pub const fn new(coord: Hex) -> Self {
        Self {
            coord,
            state: false,
            color: EMPTY_COLOR,
        }
    }

    /// Occupied block at `coord` carrying `color`
    pub const fn filled(coord: Hex, color: ColorIndex) -> Self {
        Self {
            coord,
            state: true,
            color,
        }
    }

    pub const fn coord(&self) -> Hex {
        self.coord
    }

    /// Occupancy (true = occupied)
    pub const fn state(&self) -> bool {
        self.state
    }

    pub fn set_state(&mut self, state: bool) {
        self.state = state;
    }

    pub fn toggle(&mut self) {
        self.state = !self.state;
    }

    pub const fn color(&self) -> ColorIndex {
        self.color
    }

    pub fn set_color(&mut self, color: ColorIndex) {
        self.color = color;
    }

    /// Back to empty with the empty color
    pub fn reset(&mut self) {
        self.state = false;
        self.color = EMPTY_COLOR;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_block_is_empty() {
        let block = Block::new(Hex::new(2, 3));
        assert!(!block.state());
        assert_eq!(block.color(), EMPTY_COLOR);
        assert_eq!(block.coord(), Hex::new(2, 3));
    }

    #[test]
    fn test_state_and_color() {
        let mut block = Block::new(Hex::ORIGIN);
        block.set_state(true);
        block.set_color(4);
        assert!(block.state());
        assert_eq!(block.color(), 4);

        block.toggle();
        assert!(!block.state());

        let mut filled = Block::filled(Hex::new(1, 1), 7);
        filled.reset();
        assert_eq!(filled, Block::new(Hex::new(1, 1)));
    }
}
