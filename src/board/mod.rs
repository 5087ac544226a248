//! Board representation for Gomoku

pub mod packed;

#[cfg(test)]
mod tests;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// Re-exports
pub use packed::{Direction, PackedBoard};

/// Board size (15x15)
pub const BOARD_SIZE: usize = 15;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 225

/// Stone colors. Black moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stone {
    Black,
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }

    /// Index into per-side arrays (black = 0, white = 1)
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Stone::Black => 0,
            Stone::White => 1,
        }
    }

    /// 2-bit code of this stone on the packed board
    #[inline]
    pub fn cell(self) -> Cell {
        match self {
            Stone::Black => Cell::Black,
            Stone::White => Cell::White,
        }
    }
}

/// Content of one 2-bit slot of the packed board.
///
/// `Outside` is what lies past the edge of a line, so line windows never need
/// bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Cell {
    Outside = 0b00,
    Black = 0b01,
    White = 0b10,
    Empty = 0b11,
}

impl Cell {
    #[inline]
    pub fn from_bits(bits: u32) -> Cell {
        match bits & 0b11 {
            0b00 => Cell::Outside,
            0b01 => Cell::Black,
            0b10 => Cell::White,
            _ => Cell::Empty,
        }
    }

    #[inline]
    pub fn stone(self) -> Option<Stone> {
        match self {
            Cell::Black => Some(Stone::Black),
            Cell::White => Some(Stone::White),
            Cell::Outside | Cell::Empty => None,
        }
    }
}

/// Position on the board. `col` is rendered as a letter, `row` as a 1-based
/// number, so the centre `(7, 7)` reads `h8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    /// Centre of the board, the fixed opening move.
    pub const CENTER: Pos = Pos {
        row: (BOARD_SIZE / 2) as u8,
        col: (BOARD_SIZE / 2) as u8,
    };

    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_SIZE as u8 && col < BOARD_SIZE as u8);
        Self { row, col }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
    }

    /// Position shifted by `(dr, dc)` if it stays on the board
    #[inline]
    pub fn offset(self, dr: i32, dc: i32) -> Option<Pos> {
        let r = self.row as i32 + dr;
        let c = self.col as i32 + dc;
        Pos::is_valid(r, c).then(|| Pos::new(r as u8, c as u8))
    }

    /// Iterate over all board positions in index order
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..TOTAL_CELLS).map(Pos::from_index)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

/// Error returned when a coordinate like `h8` cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePosError {
    #[error("empty coordinate")]
    Empty,
    #[error("column '{0}' is not in a..o")]
    Column(char),
    #[error("row '{0}' is not in 1..15")]
    Row(String),
}

impl FromStr for Pos {
    type Err = ParsePosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars.next().ok_or(ParsePosError::Empty)?;
        let lower = letter.to_ascii_lowercase();
        if !lower.is_ascii_lowercase() || (lower as u8 - b'a') as usize >= BOARD_SIZE {
            return Err(ParsePosError::Column(letter));
        }
        let rest = chars.as_str();
        let row: usize = rest
            .parse()
            .map_err(|_| ParsePosError::Row(rest.to_string()))?;
        if row == 0 || row > BOARD_SIZE {
            return Err(ParsePosError::Row(rest.to_string()));
        }
        Ok(Pos::new((row - 1) as u8, lower as u8 - b'a'))
    }
}
