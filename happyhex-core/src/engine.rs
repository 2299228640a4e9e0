//! The hexagonal board
//!
//! A board of radius `r` holds one block per coordinate with
//! `0 <= I < 2r-1`, `-r < J < r` and `0 <= K < 2r-1`, which is
//! `1 + 3r(r-1)` blocks. Blocks are stored ordered by I then K.
//!
//! Placement and elimination are separate calls so that the caller decides
//! when full lines are cleared.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::block::{Block, FILLED_COLOR};
use crate::error::{EngineError, Result};
use crate::grid::HexGrid;
use crate::hex::{Hex, LineAxis};
use crate::piece::Piece;

/// Points per block per completed line
pub const ELIMINATION_POINTS: u64 = 5;

/// Largest supported radius. Keeps the coordinate arithmetic inside `i32`
/// and the board at a few million blocks.
pub const MAX_RADIUS: i32 = 1024;

/// Entropy change, in bits, that [`HexEngine::entropy_index`] maps to 0.5
const ENTROPY_INDEX_SHIFT: f64 = 0.21;

/// One maximal line of the board
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    axis: LineAxis,
    index: i32,
    /// Block indices, in board order
    cells: Vec<usize>,
}

impl Line {
    pub fn axis(&self) -> LineAxis {
        self.axis
    }

    /// Shared line index of every cell on this line
    pub fn index(&self) -> i32 {
        self.index
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Outcome of one elimination pass
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elimination {
    /// Distinct blocks that were cleared, as they were before clearing
    pub cleared: Vec<Block>,
    /// Completed lines as (axis, line index)
    pub lines: Vec<(LineAxis, i32)>,
    /// Sum of the lengths of all completed lines. A block on two completed
    /// lines is cleared once but counted twice here.
    pub memberships: usize,
}

impl Elimination {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Score earned by this elimination
    pub fn score(&self) -> u64 {
        ELIMINATION_POINTS * self.memberships as u64
    }
}

/// Game board (clone to simulate)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HexEngine {
    radius: i32,
    blocks: Vec<Block>,
    index: FxHashMap<Hex, usize>,
    lines: Vec<Line>,
}

impl HexEngine {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create an empty board. The radius must lie in `1..=MAX_RADIUS`.
    pub fn new(radius: i32) -> Result<Self> {
        let span = Self::span(radius)?;
        let blocks: Vec<Block> = (0..span)
            .flat_map(|i| (0..span).map(move |k| Hex::new(i, k)))
            .filter(|h| h.in_range(radius))
            .map(Block::new)
            .collect();

        let index: FxHashMap<Hex, usize> = blocks
            .iter()
            .enumerate()
            .map(|(n, b)| (b.coord(), n))
            .collect();

        let lines = Self::build_lines(radius, span, &blocks);

        Ok(Self {
            radius,
            blocks,
            index,
            lines,
        })
    }

    /// Number of lines on each axis
    fn span(radius: i32) -> Result<i32> {
        if !(1..=MAX_RADIUS).contains(&radius) {
            return Err(EngineError::InvalidRadius(radius));
        }
        radius
            .checked_mul(2)
            .and_then(|d| d.checked_sub(1))
            .ok_or(EngineError::InvalidRadius(radius))
    }

    /// Bucket every block into its line on each axis, keeping board order
    fn build_lines(radius: i32, span: i32, blocks: &[Block]) -> Vec<Line> {
        let span = span as usize;
        let mut lines = Vec::with_capacity(3 * span);
        for axis in LineAxis::ALL {
            let first = match axis {
                LineAxis::I | LineAxis::K => 0,
                LineAxis::J => 1 - radius,
            };
            let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); span];
            for (n, block) in blocks.iter().enumerate() {
                buckets[(block.coord().line(axis) - first) as usize].push(n);
            }
            lines.extend(
                buckets
                    .into_iter()
                    .zip(first..)
                    .map(|(cells, index)| Line { axis, index, cells }),
            );
        }
        lines
    }

    /// Rebuild a board from per-block occupancy in board order
    pub fn from_booleans(data: &[bool]) -> Result<Self> {
        let radius = Self::solve_radius(data.len())
            .ok_or(EngineError::InvalidSnapshotLength(data.len()))?;
        let mut engine = Self::new(radius)?;
        for (block, &state) in engine.blocks.iter_mut().zip(data) {
            if state {
                block.set_state(true);
                block.set_color(FILLED_COLOR);
            }
        }
        Ok(engine)
    }

    /// Radius of the board with `len` blocks, if there is one
    pub fn solve_radius(len: usize) -> Option<i32> {
        if len == 0 || (len - 1) % 3 != 0 {
            return None;
        }
        let target = (len - 1) / 3;
        (1..)
            .take_while(|&x: &usize| x * (x - 1) <= target)
            .find(|&x| x * (x - 1) == target)
            .and_then(|x| i32::try_from(x).ok())
    }

    /// Empty every block
    pub fn reset(&mut self) {
        self.blocks.iter_mut().for_each(Block::reset);
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Centre cell
    pub fn center(&self) -> Hex {
        Hex::new(self.radius - 1, self.radius - 1)
    }

    /// True if `coord` is a cell of this board
    pub fn in_range(&self, coord: Hex) -> bool {
        coord.in_range(self.radius)
    }

    /// Storage index of `coord`
    pub fn index_of(&self, coord: Hex) -> Option<usize> {
        self.index.get(&coord).copied()
    }

    pub fn block_at(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// All lines: I lines, then J lines, then K lines
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Coordinates of the cells on `line`
    pub fn line_cells<'a>(&'a self, line: &'a Line) -> impl Iterator<Item = Hex> + 'a {
        line.cells.iter().map(|&n| self.blocks[n].coord())
    }

    /// Number of occupied blocks
    pub fn filled(&self) -> usize {
        self.blocks.iter().filter(|b| b.state()).count()
    }

    pub fn percent_filled(&self) -> f64 {
        self.filled() as f64 / self.blocks.len() as f64
    }

    /// Set occupancy directly, resetting the color to the default filled or
    /// empty color when the state changes
    pub fn set_state(&mut self, coord: Hex, state: bool) -> Result<()> {
        let n = self.index_of(coord).ok_or(EngineError::OutOfRange(coord))?;
        let block = &mut self.blocks[n];
        if block.state() != state {
            if state {
                *block = Block::filled(coord, FILLED_COLOR);
            } else {
                block.reset();
            }
        }
        Ok(())
    }

    /// Per-block occupancy in board order
    pub fn to_booleans(&self) -> Vec<bool> {
        self.blocks.iter().map(Block::state).collect()
    }

    // ========================================================================
    // PLACEMENT
    // ========================================================================

    /// Board index hit by each occupied piece block when placed at `origin`.
    /// `Err` carries the first coordinate that is off the board.
    fn placement_targets(&self, origin: Hex, piece: &Piece) -> Result<Vec<usize>> {
        piece
            .blocks()
            .iter()
            .filter(|b| b.state())
            .map(|b| {
                let target = origin
                    .checked_add(b.coord())
                    .ok_or(EngineError::OutOfRange(origin))?;
                self.index_of(target).ok_or(EngineError::OutOfRange(target))
            })
            .collect()
    }

    /// Check whether `piece` fits at `origin` without touching the board.
    ///
    /// False if any cell would leave the board or land on an occupied block,
    /// and for a piece without occupied blocks.
    pub fn check_add(&self, origin: Hex, piece: &Piece) -> bool {
        match self.placement_targets(origin, piece) {
            Ok(targets) => !targets.is_empty() && targets.iter().all(|&n| !self.blocks[n].state()),
            Err(_) => false,
        }
    }

    /// Place `piece` at `origin`, returning the number of blocks filled.
    ///
    /// Revalidates the placement; on error the board is left unchanged.
    pub fn add(&mut self, origin: Hex, piece: &Piece) -> Result<usize> {
        let targets = self.placement_targets(origin, piece)?;
        if targets.is_empty() {
            return Err(EngineError::EmptyPiece);
        }
        if let Some(&n) = targets.iter().find(|&&n| self.blocks[n].state()) {
            return Err(EngineError::Occupied(self.blocks[n].coord()));
        }

        for &n in &targets {
            let block = &mut self.blocks[n];
            block.set_state(true);
            block.set_color(piece.color());
        }

        tracing::debug!(origin = %origin, size = targets.len(), "placed piece");
        Ok(targets.len())
    }

    /// Origins at which the piece's first block lands on a board cell
    fn candidate_origins<'a>(&'a self, piece: &'a Piece) -> impl Iterator<Item = Hex> + 'a {
        let anchor = piece.blocks().first().map_or(Hex::ORIGIN, Block::coord);
        self.blocks
            .iter()
            .filter_map(move |b| b.coord().checked_sub(anchor))
    }

    /// Every origin at which `piece` can be placed.
    ///
    /// Candidates are the board cells shifted by the piece's first block, so
    /// an origin may lie off the board (or at negative coordinates) as long
    /// as every block of the placed piece lands on it.
    pub fn check_positions(&self, piece: &Piece) -> Vec<Hex> {
        self.candidate_origins(piece)
            .filter(|&origin| self.check_add(origin, piece))
            .collect()
    }

    /// Number of origins at which `piece` can be placed
    pub fn placement_count(&self, piece: &Piece) -> usize {
        self.candidate_origins(piece)
            .filter(|&origin| self.check_add(origin, piece))
            .count()
    }

    /// True if `piece` fits somewhere on the board
    pub fn can_place(&self, piece: &Piece) -> bool {
        self.candidate_origins(piece)
            .any(|origin| self.check_add(origin, piece))
    }

    /// True if none of `pieces` fits anywhere.
    ///
    /// Searches the same anchored origins as [`HexEngine::check_positions`],
    /// including off-board origins for pieces that do not cover `(0, 0)`.
    /// An empty slice is game over: there is nothing left to place.
    pub fn is_game_over(&self, pieces: &[Piece]) -> bool {
        !pieces.iter().any(|p| self.can_place(p))
    }

    // ========================================================================
    // ELIMINATION
    // ========================================================================

    fn is_full(&self, line: &Line) -> bool {
        line.cells.iter().all(|&n| self.blocks[n].state())
    }

    /// True if at least one line is full
    pub fn check_eliminate(&self) -> bool {
        self.lines.iter().any(|l| self.is_full(l))
    }

    /// Line memberships that [`HexEngine::eliminate`] would count if `piece`
    /// were placed at `origin`. `None` if the placement is illegal.
    pub fn preview_eliminate(&self, origin: Hex, piece: &Piece) -> Option<usize> {
        if !self.check_add(origin, piece) {
            return None;
        }
        let targets = self.placement_targets(origin, piece).ok()?;
        let memberships = self
            .lines
            .iter()
            .filter(|l| {
                l.cells
                    .iter()
                    .all(|n| self.blocks[*n].state() || targets.contains(n))
            })
            .map(Line::len)
            .sum();
        Some(memberships)
    }

    /// Clear every full line on all three axes at once.
    ///
    /// Full lines are collected before anything is cleared, so a block on
    /// two full lines is cleared once and counted once per line.
    pub fn eliminate(&mut self) -> Elimination {
        let mut marked = vec![false; self.blocks.len()];
        let mut result = Elimination::default();

        for line in self.lines.iter().filter(|l| self.is_full(l)) {
            result.lines.push((line.axis, line.index));
            result.memberships += line.len();
            for &n in &line.cells {
                marked[n] = true;
            }
        }

        for (block, _) in self.blocks.iter_mut().zip(&marked).filter(|(_, m)| **m) {
            result.cleared.push(*block);
            block.reset();
        }

        if !result.is_empty() {
            tracing::debug!(
                lines = result.lines.len(),
                cleared = result.cleared.len(),
                memberships = result.memberships,
                "eliminated lines"
            );
        }
        result
    }

    // ========================================================================
    // METRICS
    // ========================================================================

    /// How snugly `piece` fits at `origin`, in `[0, 1]`.
    ///
    /// Ratio of occupied (or off-board) neighbours around the placed cells to
    /// the piece's exposed edges. 0 if the placement is illegal.
    pub fn dense_index(&self, origin: Hex, piece: &Piece) -> f64 {
        let mut possible = 0usize;
        let mut populated = 0usize;
        for block in piece.blocks().iter().filter(|b| b.state()) {
            let target = match origin.checked_add(block.coord()) {
                Some(t) if self.contains(t) && !self.is_occupied(t) => t,
                _ => return 0.0,
            };
            possible += 6 - piece.count_neighbors(block.coord(), false);
            populated += self.count_neighbors(target, true);
        }
        if possible == 0 {
            0.0
        } else {
            populated as f64 / possible as f64
        }
    }

    /// Shannon entropy in bits of the 7-cell occupancy patterns around every
    /// cell whose neighbours are all on the board
    pub fn entropy(&self) -> f64 {
        let mut counts = [0u32; 128];
        let mut total = 0u32;
        for block in &self.blocks {
            let center = block.coord();
            if !center.neighbors().iter().all(|&n| self.in_range(n)) {
                continue;
            }
            let pattern = crate::piece::ENCODING_OFFSETS
                .iter()
                .fold(0usize, |acc, &o| (acc << 1) | usize::from(self.is_occupied(center + o)));
            counts[pattern] += 1;
            total += 1;
        }
        counts
            .iter()
            .filter(|&&c| c > 0)
            .map(|&c| {
                let p = f64::from(c) / f64::from(total);
                -p * p.log2()
            })
            .sum()
    }

    /// Sigmoid of the entropy gained by placing `piece` at `origin` and
    /// clearing full lines, shifted by 0.21 bits. Above 0.5 means the move
    /// leaves the board less ordered. `None` if the placement is illegal.
    pub fn entropy_index(&self, origin: Hex, piece: &Piece) -> Option<f64> {
        if !self.check_add(origin, piece) {
            return None;
        }
        let mut after = self.clone();
        after.add(origin, piece).ok()?;
        after.eliminate();
        let x = after.entropy() - self.entropy() - ENTROPY_INDEX_SHIFT;
        Some(1.0 / (1.0 + (-3.0 * x).exp()))
    }
}

impl HexGrid for HexEngine {
    fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    fn block(&self, coord: Hex) -> Option<&Block> {
        self.index_of(coord).map(|n| &self.blocks[n])
    }
}

/// One row per I line, laid out so that neighbours touch
impl fmt::Display for HexEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let radius = self.radius as usize;
        let width = 4 * radius - 3;
        for line in self.lines.iter().filter(|l| l.axis == LineAxis::I) {
            let mut row = vec![' '; width];
            for &n in &line.cells {
                let block = &self.blocks[n];
                let c = block.coord();
                // 2k - i + r - 1, always in 0..width on the board
                let column = 2 * c.k() as usize + radius - 1 - c.i() as usize;
                row[column] = if block.state() { 'X' } else { '.' };
            }
            let text: String = row.into_iter().collect();
            writeln!(f, "{}", text.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{get_shape, shape_index};

    fn uno() -> Piece {
        Piece::uno(3)
    }

    fn fill(engine: &mut HexEngine, cells: &[(i32, i32)]) {
        for &(i, k) in cells {
            engine.set_state(Hex::new(i, k), true).unwrap();
        }
    }

    #[test]
    fn test_rejects_bad_radius() {
        assert_eq!(HexEngine::new(0), Err(EngineError::InvalidRadius(0)));
        assert_eq!(HexEngine::new(-3), Err(EngineError::InvalidRadius(-3)));
        assert!(HexEngine::new(1).is_ok());
    }

    #[test]
    fn test_rejects_huge_radius() {
        for radius in [MAX_RADIUS + 1, 1 << 30, i32::MAX] {
            assert_eq!(HexEngine::new(radius), Err(EngineError::InvalidRadius(radius)));
        }
    }

    #[test]
    fn test_max_radius_board() {
        let engine = HexEngine::new(MAX_RADIUS).unwrap();
        let r = MAX_RADIUS as usize;
        assert_eq!(engine.len(), 1 + 3 * r * (r - 1));
        assert_eq!(engine.lines().len(), 3 * (2 * r - 1));
        assert_eq!(engine.lines().iter().map(Line::len).max(), Some(2 * r - 1));
    }

    #[test]
    fn test_coverage() {
        for r in 1..=9 {
            let engine = HexEngine::new(r).unwrap();
            let expected = (1 + 3 * r * (r - 1)) as usize;
            assert_eq!(engine.len(), expected, "radius {}", r);
            assert!(engine.blocks().iter().all(|b| !b.state() && engine.in_range(b.coord())));
            assert!(engine.blocks().windows(2).all(|w| w[0].coord() < w[1].coord()));
            for (n, b) in engine.blocks().iter().enumerate() {
                assert_eq!(engine.index_of(b.coord()), Some(n));
            }
        }
    }

    #[test]
    fn test_lines_partition_board() {
        let engine = HexEngine::new(4).unwrap();
        assert_eq!(engine.lines().len(), 3 * 7);
        for axis in LineAxis::ALL {
            let lines: Vec<&Line> = engine.lines().iter().filter(|l| l.axis() == axis).collect();
            let total: usize = lines.iter().map(|l| l.len()).sum();
            assert_eq!(total, engine.len());
            let mut lengths: Vec<usize> = lines.iter().map(|l| l.len()).collect();
            lengths.sort_unstable();
            assert_eq!(lengths, vec![4, 4, 5, 5, 6, 6, 7]);
            for line in lines {
                assert!(engine.line_cells(line).all(|h| h.line(axis) == line.index()));
            }
        }
    }

    #[test]
    fn test_single_cell_at_center() {
        let mut engine = HexEngine::new(2).unwrap();
        assert_eq!(engine.len(), 7);
        let center = engine.center();
        assert!(engine.check_add(center, &uno()));
        assert_eq!(engine.add(center, &uno()), Ok(1));
        assert!(!engine.check_add(center, &uno()));
        assert_eq!(engine.filled(), 1);
        assert_eq!(engine.block(center).unwrap().color(), 3);
    }

    #[test]
    fn test_check_add() {
        let mut engine = HexEngine::new(2).unwrap();
        let piece = Piece::from_offsets(4, &[(0, 0), (0, 1)]).unwrap();
        assert!(engine.check_add(Hex::new(0, 0), &piece));

        engine.set_state(Hex::new(0, 0), true).unwrap();
        assert!(!engine.check_add(Hex::new(0, 0), &piece));
        assert!(!engine.check_add(Hex::new(3, 3), &piece));
    }

    #[test]
    fn test_check_add_out_of_range_leaves_board() {
        let engine = HexEngine::new(3).unwrap();
        let big = get_shape(shape_index("bigBlock").unwrap()).piece(1);
        let before = engine.clone();
        // (0, 0) is a corner: (-1, -1) would leave the board
        assert!(!engine.check_add(Hex::new(0, 0), &big));
        assert!(!engine.check_add(Hex::new(i32::MAX, i32::MAX), &big));
        assert_eq!(engine, before);
        assert!(engine.check_add(engine.center(), &big));
    }

    #[test]
    fn test_add_copies_color_and_nothing_else() {
        let mut engine = HexEngine::new(3).unwrap();
        let piece = Piece::from_offsets(7, &[(0, 0), (0, 1), (1, 1)]).unwrap();
        engine.add(Hex::new(1, 1), &piece).unwrap();
        for block in engine.blocks() {
            let expected = [Hex::new(1, 1), Hex::new(1, 2), Hex::new(2, 2)].contains(&block.coord());
            assert_eq!(block.state(), expected, "{}", block.coord());
            if expected {
                assert_eq!(block.color(), 7);
            }
        }
    }

    #[test]
    fn test_add_errors_leave_board_untouched() {
        let mut engine = HexEngine::new(2).unwrap();
        let piece = Piece::from_offsets(4, &[(0, 0), (0, 1)]).unwrap();
        engine.add(Hex::new(0, 0), &piece).unwrap();

        let overlapping = Piece::from_offsets(2, &[(0, 0), (1, 0)]).unwrap();
        let before = engine.clone();
        assert_eq!(engine.add(Hex::new(0, 1), &overlapping), Err(EngineError::Occupied(Hex::new(0, 1))));
        assert_eq!(engine, before);

        // (2, 2) is free but (3, 2) is off the board
        assert_eq!(
            engine.add(Hex::new(2, 2), &overlapping),
            Err(EngineError::OutOfRange(Hex::new(3, 2)))
        );
        assert_eq!(engine, before);
    }

    #[test]
    fn test_eliminate_single_line() {
        let mut engine = HexEngine::new(2).unwrap();
        fill(&mut engine, &[(1, 0), (1, 1), (1, 2)]);
        assert!(engine.check_eliminate());

        let result = engine.eliminate();
        assert_eq!(result.cleared.len(), 3);
        assert_eq!(result.memberships, 3);
        assert_eq!(result.lines, vec![(LineAxis::I, 1)]);
        assert_eq!(engine.filled(), 0);

        engine.set_state(Hex::new(0, 0), true).unwrap();
        let result = engine.eliminate();
        assert!(result.is_empty());
        assert_eq!(result.memberships, 0);
        assert_eq!(engine.filled(), 1);
    }

    #[test]
    fn test_eliminate_completed_by_placement() {
        let mut engine = HexEngine::new(3).unwrap();
        fill(&mut engine, &[(2, 0), (2, 1), (2, 3), (2, 4)]);
        assert!(!engine.check_eliminate());

        engine.add(Hex::new(2, 2), &uno()).unwrap();
        let result = engine.eliminate();
        assert_eq!(result.memberships, 5);
        assert_eq!(result.cleared.len(), 5);
        assert_eq!(result.score(), 25);
        assert_eq!(engine.filled(), 0);
    }

    #[test]
    fn test_eliminate_intersecting_lines() {
        let mut engine = HexEngine::new(3).unwrap();
        // I line 2 (length 5) and K line 1 (length 4) meet at (2, 1)
        fill(&mut engine, &[(2, 0), (2, 2), (2, 3), (2, 4)]);
        fill(&mut engine, &[(0, 1), (1, 1), (3, 1)]);
        fill(&mut engine, &[(4, 4)]);

        engine.add(Hex::new(2, 1), &uno()).unwrap();
        let result = engine.eliminate();
        assert_eq!(result.cleared.len(), 8);
        assert_eq!(result.memberships, 9);
        assert_eq!(result.score(), 45);
        assert_eq!(result.lines.len(), 2);
        assert!(result.lines.contains(&(LineAxis::I, 2)));
        assert!(result.lines.contains(&(LineAxis::K, 1)));
        // untouched block survives
        assert_eq!(engine.filled(), 1);
        assert!(engine.is_occupied(Hex::new(4, 4)));
    }

    #[test]
    fn test_preview_matches_eliminate() {
        let mut engine = HexEngine::new(3).unwrap();
        fill(&mut engine, &[(2, 0), (2, 2), (2, 3), (2, 4)]);
        fill(&mut engine, &[(0, 1), (1, 1), (3, 1)]);
        assert_eq!(engine.preview_eliminate(Hex::new(2, 1), &uno()), Some(9));
        assert_eq!(engine.preview_eliminate(Hex::new(4, 4), &uno()), Some(0));
        assert_eq!(engine.preview_eliminate(Hex::new(2, 0), &uno()), None);

        let before = engine.clone();
        engine.add(Hex::new(2, 1), &uno()).unwrap();
        assert_eq!(engine.eliminate().memberships, 9);
        assert_ne!(engine, before);
    }

    #[test]
    fn test_eliminate_twice_is_noop() {
        let mut engine = HexEngine::new(3).unwrap();
        let j_line: Vec<Hex> = engine
            .blocks()
            .iter()
            .map(Block::coord)
            .filter(|h| h.j() == 0)
            .collect();
        assert_eq!(j_line.len(), 5);
        for h in j_line {
            engine.set_state(h, true).unwrap();
        }
        assert_eq!(engine.eliminate().memberships, 5);
        let again = engine.eliminate();
        assert!(again.is_empty());
        assert!(again.cleared.is_empty());
    }

    #[test]
    fn test_cleared_blocks_keep_their_color() {
        let mut engine = HexEngine::new(2).unwrap();
        let line = Piece::from_offsets(9, &[(0, -1), (0, 0), (0, 1)]).unwrap();
        engine.add(Hex::new(1, 1), &line).unwrap();
        let result = engine.eliminate();
        assert!(result.cleared.iter().all(|b| b.color() == 9 && b.state()));
        assert!(engine.blocks().iter().all(|b| b.color() == crate::block::EMPTY_COLOR));
    }

    #[test]
    fn test_check_positions() {
        let mut engine = HexEngine::new(2).unwrap();
        let positions = engine.check_positions(&uno());
        assert_eq!(positions.len(), 7);
        assert_eq!(positions[0], Hex::new(0, 0));

        engine.set_state(Hex::new(0, 0), true).unwrap();
        let positions = engine.check_positions(&uno());
        assert!(!positions.contains(&Hex::new(0, 0)));
        assert_eq!(engine.placement_count(&uno()), 6);
    }

    #[test]
    fn test_positions_for_piece_without_origin_cell() {
        // Only fits with the origin outside the board
        let piece = Piece::from_offsets(0, &[(2, 2), (2, 3)]).unwrap();
        let engine = HexEngine::new(2).unwrap();
        let positions = engine.check_positions(&piece);
        assert!(!positions.is_empty());
        assert!(positions.contains(&Hex::new(-2, -2)));
        assert!(positions.iter().all(|&o| engine.check_add(o, &piece)));
        assert!(positions.iter().all(|&o| !engine.in_range(o)));
        assert_eq!(engine.placement_count(&piece), positions.len());
        assert!(!engine.is_game_over(&[piece]));
    }

    #[test]
    fn test_game_over() {
        let mut engine = HexEngine::new(2).unwrap();
        let big = get_shape(35).piece(0);
        assert!(!engine.is_game_over(&[uno(), big.clone()]));

        engine.set_state(engine.center(), true).unwrap();
        assert!(engine.is_game_over(&[big.clone()]));
        assert!(!engine.is_game_over(&[big, uno()]));

        for block in engine.blocks().to_vec() {
            engine.set_state(block.coord(), true).unwrap();
        }
        assert!(engine.is_game_over(&[uno()]));
        assert!(engine.is_game_over(&[]));
    }

    #[test]
    fn test_reset() {
        let mut engine = HexEngine::new(2).unwrap();
        engine.add(Hex::new(0, 0), &uno()).unwrap();
        engine.reset();
        assert_eq!(engine.filled(), 0);
        assert_eq!(engine.block(Hex::new(0, 0)).unwrap().color(), crate::block::EMPTY_COLOR);
        assert_eq!(engine.len(), 7);
    }

    #[test]
    fn test_set_state_colors() {
        let mut engine = HexEngine::new(2).unwrap();
        engine.set_state(Hex::new(0, 0), true).unwrap();
        assert_eq!(engine.block(Hex::new(0, 0)).unwrap().color(), FILLED_COLOR);
        engine.set_state(Hex::new(0, 0), false).unwrap();
        assert_eq!(engine.block(Hex::new(0, 0)).unwrap().color(), crate::block::EMPTY_COLOR);
        assert_eq!(
            engine.set_state(Hex::new(5, 5), true),
            Err(EngineError::OutOfRange(Hex::new(5, 5)))
        );
    }

    #[test]
    fn test_dense_index() {
        let mut engine = HexEngine::new(2).unwrap();
        engine.set_state(Hex::new(0, 0), true).unwrap();
        let index = engine.dense_index(Hex::new(1, 1), &uno());
        assert!((index - 1.0 / 6.0).abs() < 1e-9);
        assert_eq!(engine.dense_index(Hex::new(0, 0), &uno()), 0.0);

        // corner cell: 3 neighbours are off the board
        let engine = HexEngine::new(2).unwrap();
        assert!((engine.dense_index(Hex::new(0, 0), &uno()) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_entropy() {
        let mut engine = HexEngine::new(3).unwrap();
        assert_eq!(engine.entropy(), 0.0);
        engine.set_state(engine.center(), true).unwrap();
        // 7 interior cells: centre pattern differs from the six around it,
        // which each see the centre in a different position
        assert!(engine.entropy() > 2.0);
    }

    #[test]
    fn test_entropy_index() {
        let mut engine = HexEngine::new(3).unwrap();
        let center = engine.center();
        // 0 -> log2(7) bits
        let spread = engine.entropy_index(center, &uno()).unwrap();
        assert!(spread > 0.99, "{}", spread);

        fill(&mut engine, &[(0, 0), (0, 1)]);
        assert_eq!(engine.entropy_index(Hex::new(0, 0), &uno()), None);
        assert_eq!(engine.entropy_index(Hex::new(5, 5), &uno()), None);

        // completes I line 0 and leaves an empty board
        let before = engine.entropy();
        assert!(before > 0.0);
        let cleared = engine.entropy_index(Hex::new(0, 2), &uno()).unwrap();
        let expected = 1.0 / (1.0 + (3.0 * (before + 0.21)).exp());
        assert!((cleared - expected).abs() < 1e-12);
        assert!(cleared < 0.5);
        assert_eq!(engine.filled(), 2);
    }

    #[test]
    fn test_booleans_round_trip() {
        let mut engine = HexEngine::new(3).unwrap();
        fill(&mut engine, &[(0, 0), (1, 2), (2, 3), (4, 4)]);
        let data = engine.to_booleans();
        assert_eq!(data.len(), 19);
        let restored = HexEngine::from_booleans(&data).unwrap();
        assert_eq!(restored, engine);

        assert_eq!(
            HexEngine::from_booleans(&[false; 8]),
            Err(EngineError::InvalidSnapshotLength(8))
        );
    }

    #[test]
    fn test_solve_radius() {
        assert_eq!(HexEngine::solve_radius(1), Some(1));
        assert_eq!(HexEngine::solve_radius(7), Some(2));
        assert_eq!(HexEngine::solve_radius(61), Some(5));
        assert_eq!(HexEngine::solve_radius(0), None);
        assert_eq!(HexEngine::solve_radius(10), None);
        assert_eq!(HexEngine::solve_radius(13), None);
    }

    #[test]
    fn test_display() {
        let mut engine = HexEngine::new(2).unwrap();
        engine.set_state(engine.center(), true).unwrap();
        assert_eq!(engine.to_string(), " . .\n. X .\n . .\n");
    }
}
