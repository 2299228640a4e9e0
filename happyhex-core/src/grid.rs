//! Read access shared by the board and by pieces

use crate::block::Block;
use crate::hex::Hex;

/// A collection of blocks addressed by coordinate
pub trait HexGrid {
    /// All blocks, ordered by I then K
    fn blocks(&self) -> &[Block];

    /// Block at `coord`, if the grid has one there
    fn block(&self, coord: Hex) -> Option<&Block>;

    fn len(&self) -> usize {
        self.blocks().len()
    }

    fn is_empty(&self) -> bool {
        self.blocks().is_empty()
    }

    /// True if the grid has a block at `coord`
    fn contains(&self, coord: Hex) -> bool {
        self.block(coord).is_some()
    }

    /// True if the grid has an occupied block at `coord`
    fn is_occupied(&self, coord: Hex) -> bool {
        self.block(coord).is_some_and(Block::state)
    }

    /// Count occupied neighbours of `coord`.
    ///
    /// Neighbours outside the grid count as occupied when `include_outside`
    /// is set. Returns 0 if `coord` itself is not part of the grid.
    fn count_neighbors(&self, coord: Hex, include_outside: bool) -> usize {
        if !self.contains(coord) {
            return 0;
        }
        coord
            .neighbors()
            .into_iter()
            .filter(|&n| match self.block(n) {
                Some(block) => block.state(),
                None => include_outside,
            })
            .count()
    }
}
