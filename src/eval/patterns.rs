//! Pattern scores for candidate ordering
//!
//! Candidate scores are `u16` so the selector stays small enough to copy on
//! every node visit. `u16::MAX` is reserved for "this move makes five".

use super::classify::{FIVE, FOUR_ATTACK, OPEN_FOUR, THREE_ATTACK, TWO};

/// Pattern scores for move ordering
pub struct PatternScore;

impl PatternScore {
    /// Five in a row - immediate win, the sentinel score
    pub const FIVE: u16 = u16::MAX;
    /// Blocking the opponent's five: must be above any attack short of five
    pub const BLOCK_FIVE: u32 = 40_000;

    /// Open four: _OOOO_
    pub const OPEN_FOUR: u32 = 12_000;
    /// Four with a single completion
    pub const FOUR: u32 = 3_000;
    /// Open three: _OOO_
    pub const OPEN_THREE: u32 = 1_200;
    /// Open two: _OO_
    pub const OPEN_TWO: u32 = 120;

    /// Two forcing threats from one move (4-4, 4-3, 3-3)
    pub const DOUBLE_THREAT: u32 = 8_000;

    /// Per adjacent stone
    pub const PROXIMITY: u32 = 4;
}

/// Value of a move for the side that plays it, from per-direction flags.
///
/// Returns `None` when the move makes five.
#[must_use]
pub fn attack_value(direction_flags: &[u8; 4]) -> Option<u32> {
    let mut value = 0;
    let mut fours = 0;
    let mut threes = 0;

    for &flags in direction_flags {
        if flags & FIVE != 0 {
            return None;
        }
        if flags & OPEN_FOUR != 0 {
            value += PatternScore::OPEN_FOUR;
            fours += 2;
        } else if flags & FOUR_ATTACK != 0 {
            value += PatternScore::FOUR;
            fours += 1;
        } else if flags & THREE_ATTACK != 0 {
            value += PatternScore::OPEN_THREE;
            threes += 1;
        } else if flags & TWO != 0 {
            value += PatternScore::OPEN_TWO;
        }
    }

    if fours >= 2 || (fours >= 1 && threes >= 1) || threes >= 2 {
        value += PatternScore::DOUBLE_THREAT;
    }
    Some(value)
}

/// Combine attack and block values into a candidate score below the sentinel.
#[must_use]
pub fn candidate_score(attack: Option<u32>, block: Option<u32>, neighbors: u32) -> u16 {
    let Some(attack) = attack else {
        return PatternScore::FIVE;
    };
    // blocking is worth a little less than making the same shape yourself
    let block = block.map_or(PatternScore::BLOCK_FIVE, |b| b * 3 / 4);
    let total = attack + block + neighbors * PatternScore::PROXIMITY + 1;
    total.min(u32::from(u16::MAX) - 1) as u16
}
