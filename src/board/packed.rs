//! Packed 2-bit board kept in four orientations
//!
//! Each line (row, column, diagonal, anti-diagonal) is a `u32` holding up to
//! 15 cells of 2 bits. Keeping all four orientations in sync lets any window
//! of cells through a position be read with one shift and mask, whatever its
//! direction.

use super::{Cell, Pos, Stone, BOARD_SIZE};

const DIAGONALS: usize = 2 * BOARD_SIZE - 1; // 29

/// Low bits of every cell of a full row: 0b01 repeated 15 times
const LOW_BITS: u32 = 0x1555_5555;

/// Line orientation through a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
    Diagonal,
    AntiDiagonal,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::Diagonal,
        Direction::AntiDiagonal,
    ];

    /// `(row, col)` step matching one cell forward along the packed line
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }
}

/// Board stored as four redundant bit-packed views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBoard {
    rows: [u32; BOARD_SIZE],
    cols: [u32; BOARD_SIZE],
    /// indexed by `row - col + 14`, cell index `col`
    diagonals: [u32; DIAGONALS],
    /// indexed by `row + col`, cell index `row`
    anti_diagonals: [u32; DIAGONALS],
}

impl PackedBoard {
    /// Create an empty board. Diagonal slots that fall off the board stay `Outside`.
    pub fn new() -> Self {
        let mut board = Self {
            rows: [0; BOARD_SIZE],
            cols: [0; BOARD_SIZE],
            diagonals: [0; DIAGONALS],
            anti_diagonals: [0; DIAGONALS],
        };
        for pos in Pos::all() {
            board.remove(pos);
        }
        board
    }

    /// Line word and cell index of `pos` in the given view
    #[inline]
    fn slot(&self, pos: Pos, dir: Direction) -> (u32, usize) {
        let (r, c) = (pos.row as usize, pos.col as usize);
        match dir {
            Direction::Horizontal => (self.rows[r], c),
            Direction::Vertical => (self.cols[c], r),
            Direction::Diagonal => (self.diagonals[r + BOARD_SIZE - 1 - c], c),
            Direction::AntiDiagonal => (self.anti_diagonals[r + c], r),
        }
    }

    /// Place a stone in all four views.
    #[inline]
    pub fn place(&mut self, pos: Pos, stone: Stone) {
        debug_assert!(
            (pos.row as usize) < BOARD_SIZE && (pos.col as usize) < BOARD_SIZE,
            "position {pos:?} is out of board"
        );
        let code = stone.cell() as u32;
        let mask = |i: usize| !((0b11 ^ code) << (2 * i));
        let (r, c) = (pos.row as usize, pos.col as usize);

        self.rows[r] &= mask(c);
        self.cols[c] &= mask(r);
        self.diagonals[r + BOARD_SIZE - 1 - c] &= mask(c);
        self.anti_diagonals[r + c] &= mask(r);
    }

    /// Clear a cell in all four views. Must undo a matching `place`.
    #[inline]
    pub fn remove(&mut self, pos: Pos) {
        debug_assert!(
            (pos.row as usize) < BOARD_SIZE && (pos.col as usize) < BOARD_SIZE,
            "position {pos:?} is out of board"
        );
        let (r, c) = (pos.row as usize, pos.col as usize);

        self.rows[r] |= 0b11 << (2 * c);
        self.cols[c] |= 0b11 << (2 * r);
        self.diagonals[r + BOARD_SIZE - 1 - c] |= 0b11 << (2 * c);
        self.anti_diagonals[r + c] |= 0b11 << (2 * r);
    }

    /// Get cell content at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Cell {
        self.cell_along(pos, Direction::Horizontal)
    }

    /// Read a cell through one particular view
    #[inline]
    pub(crate) fn cell_along(&self, pos: Pos, dir: Direction) -> Cell {
        let (line, i) = self.slot(pos, dir);
        Cell::from_bits(line >> (2 * i))
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// The `2 * radius + 1` cells centred on `pos` along `dir`.
    ///
    /// The lowest two bits hold the cell farthest in the negative direction.
    /// Cells past either end of the line read as `Outside`.
    #[inline]
    pub fn line(&self, pos: Pos, dir: Direction, radius: usize) -> u32 {
        debug_assert!(radius <= 7);
        let (line, i) = self.slot(pos, dir);
        let width = 2 * (2 * radius + 1);
        let shifted = (u64::from(line) << (2 * radius)) >> (2 * i);
        (shifted & ((1u64 << width) - 1)) as u32
    }

    /// Windows through `pos` in all four directions, in `Direction::ALL` order
    #[inline]
    pub fn lines(&self, pos: Pos, radius: usize) -> [u32; 4] {
        Direction::ALL.map(|dir| self.line(pos, dir, radius))
    }

    /// Whether any stone lies within `distance` (Chebyshev) of `pos`
    pub fn has_neighbor(&self, pos: Pos, distance: i32) -> bool {
        for dr in -distance..=distance {
            for dc in -distance..=distance {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if let Some(p) = pos.offset(dr, dc) {
                    if self.get(p).stone().is_some() {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Total stones on board
    pub fn stone_count(&self) -> u32 {
        // a stone is a cell whose two bits differ
        self.rows
            .iter()
            .map(|&line| ((line ^ (line >> 1)) & LOW_BITS).count_ones())
            .sum()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == BOARD_SIZE * BOARD_SIZE
    }

    /// Whether the four views agree on every cell
    #[cfg(test)]
    pub(crate) fn views_agree(&self) -> bool {
        Pos::all().all(|pos| {
            let cell = self.get(pos);
            Direction::ALL.iter().all(|&dir| self.cell_along(pos, dir) == cell)
        })
    }
}

impl Default for PackedBoard {
    fn default() -> Self {
        Self::new()
    }
}
