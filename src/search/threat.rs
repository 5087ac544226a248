//! Forced-win finder (threat-space search)
//!
//! Looks for short winning sequences that only use forcing moves:
//! - fours, which leave the defender a single blocking cell
//! - open threes, a limited number of times, where every sensible defence is
//!   tried and must lose
//!
//! It is a cheap substitute for growing the proof-number tree: when it
//! succeeds, the node being expanded gets a single, already decided child.

use smallvec::SmallVec;

use crate::board::{Direction, PackedBoard, Pos, Stone};
use crate::eval::{classify_move, completes_five, FIVE, FOUR_ATTACK, THREE_ATTACK};

/// Cells farther than this from every stone never take part in a threat
const NEIGHBORHOOD: i32 = 2;

/// Reach of a single line threat from the move that created it
const THREAT_REACH: i32 = 4;

/// Open threes with more defences than this are not followed
const MAX_DEFENCES: usize = 8;

/// Threat moves tried per call before giving up
const NODE_LIMIT: u64 = 2_000;

type Cells = SmallVec<[Pos; 8]>;

/// Bounded threat-space search over a borrowed board.
///
/// Only the first attacker move is picked from the whole neighbourhood of
/// the stones. Every later threat must lie on a line through the attacker's
/// previous move, and new fives are only looked for on the lines through the
/// two stones just placed.
///
/// The board is mutated while searching and restored exactly before every
/// return.
pub struct ForcedWinFinder<'a> {
    board: &'a mut PackedBoard,
    /// Maximum number of attacker moves in a winning sequence
    max_depth: u8,
    /// Threat moves tried, for statistics and the node limit
    nodes: u64,
    /// Cells near the stones when the call started
    area: Vec<Pos>,
}

impl<'a> ForcedWinFinder<'a> {
    pub fn new(board: &'a mut PackedBoard, max_depth: u8) -> Self {
        Self {
            board,
            max_depth,
            nodes: 0,
            area: Vec::new(),
        }
    }

    /// Threat moves tried by the last `winning_move` call
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// First move of a forced win for `attacker`, using at most `max_threes`
    /// open-three threats. `None` means no win was found within the limits.
    pub fn winning_move(&mut self, attacker: Stone, max_threes: u8) -> Option<Pos> {
        self.nodes = 0;
        self.area = self.candidate_cells();
        let defender = attacker.opponent();

        if let Some(&win) = self.area.iter().find(|&&m| completes_five(self.board, m, attacker)) {
            return Some(win);
        }
        // the defender wins first unless we block, so nothing here is forcing
        if self.area.iter().any(|&m| completes_five(self.board, m, defender)) {
            return None;
        }
        if self.max_depth == 0 {
            return None;
        }

        let cells = self.area.clone();
        self.try_threats(&cells, attacker, max_threes, 0)
    }

    /// Position after `attack` and the defender's answer `defence`.
    fn search(
        &mut self,
        attacker: Stone,
        threes_left: u8,
        depth: u8,
        attack: Pos,
        defence: Pos,
    ) -> bool {
        let defender = attacker.opponent();
        if !self.line_cells(attack, |board, p| completes_five(board, p, attacker)).is_empty() {
            return true;
        }
        if !self.line_cells(defence, |board, p| completes_five(board, p, defender)).is_empty() {
            return false;
        }
        if depth >= self.max_depth {
            return false;
        }

        let follow_ups = self.line_cells(attack, |_, _| true);
        self.try_threats(&follow_ups, attacker, threes_left, depth).is_some()
    }

    /// Fours first, then open threes while the budget allows.
    fn try_threats(
        &mut self,
        cells: &[Pos],
        attacker: Stone,
        threes_left: u8,
        depth: u8,
    ) -> Option<Pos> {
        let mut fours = Cells::new();
        let mut threes = Cells::new();
        for &m in cells {
            if !self.board.is_empty(m) {
                continue;
            }
            let flags = classify_move(self.board, m, attacker);
            if flags & FOUR_ATTACK != 0 {
                fours.push(m);
            } else if threes_left > 0 && flags & THREE_ATTACK != 0 {
                threes.push(m);
            }
        }

        for m in fours {
            if self.nodes >= NODE_LIMIT {
                return None;
            }
            self.nodes += 1;
            if self.wins_by_four(m, attacker, threes_left, depth) {
                return Some(m);
            }
        }
        for m in threes {
            if self.nodes >= NODE_LIMIT {
                return None;
            }
            self.nodes += 1;
            if self.wins_by_three(m, attacker, threes_left, depth) {
                return Some(m);
            }
        }
        None
    }

    /// Play a four at `m`; the defender's reply is forced.
    fn wins_by_four(&mut self, m: Pos, attacker: Stone, threes_left: u8, depth: u8) -> bool {
        let defender = attacker.opponent();
        self.board.place(m, attacker);

        let completions = self.line_cells(m, |board, p| completes_five(board, p, attacker));
        let won = match completions.as_slice() {
            [] => false,
            &[block] => {
                self.board.place(block, defender);
                let won = self.search(attacker, threes_left, depth + 1, m, block);
                self.board.remove(block);
                won
            }
            // two completions cannot both be blocked
            _ => true,
        };

        self.board.remove(m);
        won
    }

    /// Play an open three at `m`; every defence must lose.
    fn wins_by_three(&mut self, m: Pos, attacker: Stone, threes_left: u8, depth: u8) -> bool {
        let defender = attacker.opponent();
        self.board.place(m, attacker);

        let counter_attack = self.area.iter().any(|&p| {
            self.board.is_empty(p)
                && classify_move(self.board, p, defender) & (FOUR_ATTACK | FIVE) != 0
        });

        let defences = self.line_cells(m, |board, p| {
            classify_move(board, p, attacker) & (FOUR_ATTACK | FIVE) != 0
        });

        let won = !counter_attack
            && !defences.is_empty()
            && defences.len() <= MAX_DEFENCES
            && defences.iter().all(|&d| {
                self.board.place(d, defender);
                let lost = self.search(attacker, threes_left - 1, depth + 1, m, d);
                self.board.remove(d);
                lost
            });

        self.board.remove(m);
        won
    }

    /// Empty cells close enough to a stone to matter
    fn candidate_cells(&self) -> Vec<Pos> {
        Pos::all()
            .filter(|&p| self.board.is_empty(p) && self.board.has_neighbor(p, NEIGHBORHOOD))
            .collect()
    }

    /// Empty cells on the four lines through `m` within threat reach that
    /// satisfy `pred`
    fn line_cells(&self, m: Pos, pred: impl Fn(&PackedBoard, Pos) -> bool) -> Cells {
        let mut cells = Cells::new();
        for dir in Direction::ALL {
            let (dr, dc) = dir.delta();
            for step in (-THREAT_REACH..=THREAT_REACH).filter(|&s| s != 0) {
                if let Some(p) = m.offset(dr * step, dc * step) {
                    if self.board.is_empty(p) && pred(self.board, p) && !cells.contains(&p) {
                        cells.push(p);
                    }
                }
            }
        }
        cells
    }
}
