//! Threat classification of line windows
//!
//! A window is the 11 cells (radius 5) read from the packed board around a
//! candidate cell. The centre cell is always treated as holding the stone
//! being evaluated, so the same window answers "what would this move make?".

use crate::board::{Cell, PackedBoard, Pos, Stone};

/// Radius of the windows the classifier works on
pub const RADIUS: usize = 5;

const WIDTH: usize = 2 * RADIUS + 1;
const CENTER: usize = RADIUS;

/// Five or more in a row through the centre
pub const FIVE: u8 = 0x01;
/// Open two: `_XX__`-style six-cell window with both ends empty
pub const TWO: u8 = 0x02;
/// Open three: one move from an open four
pub const THREE_ATTACK: u8 = 0x04;
/// Four: one move from five
pub const FOUR_ATTACK: u8 = 0x08;
/// Four with two different completion cells in the same line
pub const OPEN_FOUR: u8 = 0x10;

/// Flags carried into proof-number nodes
pub const ATTACKS: u8 = FOUR_ATTACK | THREE_ATTACK;

/// Split a window into bit masks of `stone` cells and empty cells.
#[inline]
fn split(line: u32, stone: Stone) -> (u16, u16) {
    let code = stone.cell() as u32;
    let mut own = 0u16;
    let mut empty = 0u16;
    for i in 0..WIDTH {
        match (line >> (2 * i)) & 0b11 {
            bits if bits == code => own |= 1 << i,
            bits if bits == Cell::Empty as u32 => empty |= 1 << i,
            _ => {}
        }
    }
    (own | 1 << CENTER, empty & !(1 << CENTER))
}

/// Classify one window for `stone`, assuming `stone` sits on the centre cell.
#[must_use]
pub fn classify(line: u32, stone: Stone) -> u8 {
    let (own, empty) = split(line, stone);
    let mut flags = 0;

    let left = (!own << (16 - CENTER)).leading_zeros() as usize;
    let right = (!own >> (CENTER + 1)).trailing_zeros() as usize;
    if 1 + left.min(CENTER) + right.min(WIDTH - CENTER - 1) >= 5 {
        flags |= FIVE;
    }

    // five-cell windows covering the centre
    let mut completions = 0u16;
    for start in CENTER - 4..=CENTER {
        let window = 0x1F << start;
        if (own & window).count_ones() == 4 && (empty & window).count_ones() == 1 {
            completions |= empty & window;
        }
    }
    match completions.count_ones() {
        0 => {}
        1 => flags |= FOUR_ATTACK,
        _ => flags |= FOUR_ATTACK | OPEN_FOUR,
    }

    // six-cell windows with the centre strictly inside
    for start in CENTER - 4..CENTER {
        let ends = 1 << start | 1 << (start + 5);
        if empty & ends != ends {
            continue;
        }
        let inner = 0xF << (start + 1);
        match ((own & inner).count_ones(), (empty & inner).count_ones()) {
            (3, 1) => flags |= THREE_ATTACK,
            (2, 2) => flags |= TWO,
            _ => {}
        }
    }

    flags
}

/// Flags of all four directions through `pos` combined
#[must_use]
pub fn classify_move(board: &PackedBoard, pos: Pos, stone: Stone) -> u8 {
    board
        .lines(pos, RADIUS)
        .iter()
        .fold(0, |flags, &line| flags | classify(line, stone))
}

/// Whether `stone` played at `pos` makes five or more in a row
#[inline]
#[must_use]
pub fn completes_five(board: &PackedBoard, pos: Pos, stone: Stone) -> bool {
    board
        .lines(pos, RADIUS)
        .iter()
        .any(|&line| classify(line, stone) & FIVE != 0)
}
