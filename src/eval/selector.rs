//! Candidate move selector
//!
//! Keeps the empty cells near existing stones together with a score and
//! threat flags for both sides. The selector is a plain value: cloning it
//! gives an independent snapshot, which is how the search restores it after
//! walking down the tree.

use crate::board::{Direction, PackedBoard, Pos, Stone, TOTAL_CELLS};

use super::classify::{classify, RADIUS};
use super::patterns::{attack_value, candidate_score};

/// Cells within this distance of a stone are candidates
const NEIGHBORHOOD: i32 = 2;

/// One untried move with per-side evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub pos: Pos,
    /// Score per side, indexed by `Stone::index()`
    pub score: [u16; 2],
    /// Combined threat flags per side
    pub threats: [u8; 2],
}

impl Candidate {
    fn empty(pos: Pos) -> Self {
        Self {
            pos,
            score: [0; 2],
            threats: [0; 2],
        }
    }

    #[inline]
    pub fn score_for(&self, stone: Stone) -> u16 {
        self.score[stone.index()]
    }

    #[inline]
    pub fn threats_for(&self, stone: Stone) -> u8 {
        self.threats[stone.index()]
    }
}

/// Scored, ordered list of candidate moves.
#[derive(Debug, Clone)]
pub struct Selector {
    entries: Vec<Candidate>,
    listed: Vec<bool>,
    /// Traversal order; may contain stale indices, filtered by `listed`
    order: Vec<u8>,
}

impl Selector {
    pub fn new() -> Self {
        Self {
            entries: (0..TOTAL_CELLS).map(|i| Candidate::empty(Pos::from_index(i))).collect(),
            listed: vec![false; TOTAL_CELLS],
            order: Vec::with_capacity(TOTAL_CELLS),
        }
    }

    /// Evaluate one empty cell for both sides.
    fn rate(board: &PackedBoard, pos: Pos) -> Candidate {
        let lines = board.lines(pos, RADIUS);
        let flags = [Stone::Black, Stone::White].map(|s| lines.map(|line| classify(line, s)));
        let attack = [attack_value(&flags[0]), attack_value(&flags[1])];
        let neighbors = (-1..=1)
            .flat_map(|dr| (-1..=1).map(move |dc| (dr, dc)))
            .filter_map(|(dr, dc)| pos.offset(dr, dc))
            .filter(|&p| p != pos && board.get(p).stone().is_some())
            .count() as u32;

        Candidate {
            pos,
            score: [
                candidate_score(attack[0], attack[1], neighbors),
                candidate_score(attack[1], attack[0], neighbors),
            ],
            threats: flags.map(|dirs| dirs.iter().fold(0, |acc, &f| acc | f)),
        }
    }

    /// Rescore every candidate from scratch and order by `stone`'s score.
    pub fn assign_scores(&mut self, board: &PackedBoard, stone: Stone) {
        // the candidate set itself is rebuilt too, so a fresh selector works
        for pos in Pos::all() {
            let idx = pos.to_index();
            self.listed[idx] = board.is_empty(pos) && board.has_neighbor(pos, NEIGHBORHOOD);
            if self.listed[idx] {
                self.entries[idx] = Self::rate(board, pos);
            }
        }
        self.reorder(|c| c.score_for(stone));
    }

    /// Adjust for a stone just placed at `pos`, touching only affected cells.
    pub fn shallow_update(&mut self, board: &PackedBoard, pos: Pos) {
        self.listed[pos.to_index()] = false;

        for dr in -NEIGHBORHOOD..=NEIGHBORHOOD {
            for dc in -NEIGHBORHOOD..=NEIGHBORHOOD {
                let Some(p) = pos.offset(dr, dc) else { continue };
                let idx = p.to_index();
                if !self.listed[idx] && board.is_empty(p) {
                    self.listed[idx] = true;
                    self.entries[idx] = Self::rate(board, p);
                    self.order.push(idx as u8);
                }
            }
        }

        for dir in Direction::ALL {
            let (dr, dc) = dir.delta();
            for step in 1..=RADIUS as i32 {
                for sign in [-1, 1] {
                    let Some(p) = pos.offset(dr * step * sign, dc * step * sign) else {
                        continue;
                    };
                    if self.listed[p.to_index()] {
                        self.entries[p.to_index()] = Self::rate(board, p);
                    }
                }
            }
        }
    }

    /// Adjust for a committed move and restore a consistent ordering.
    pub fn full_update(&mut self, board: &PackedBoard, pos: Pos) {
        self.shallow_update(board, pos);
        self.reorder(|c| c.score[0].max(c.score[1]));
    }

    fn reorder(&mut self, key: impl Fn(&Candidate) -> u16) {
        let listed = &self.listed;
        self.order = (0..TOTAL_CELLS as u8)
            .filter(|&i| listed[i as usize])
            .collect();
        let entries = &self.entries;
        // stable sort keeps index order among equal scores
        self.order
            .sort_by_key(|&i| std::cmp::Reverse(key(&entries[i as usize])));
    }

    /// Highest score of either side over all candidates
    #[must_use]
    pub fn best_score(&self) -> u16 {
        self.iter()
            .map(|c| c.score[0].max(c.score[1]))
            .max()
            .unwrap_or(0)
    }

    /// Candidates in traversal order
    pub fn iter(&self) -> impl Iterator<Item = &Candidate> + '_ {
        self.order
            .iter()
            .filter(|&&i| self.listed[i as usize])
            .map(|&i| &self.entries[i as usize])
    }

    #[must_use]
    pub fn first(&self) -> Option<&Candidate> {
        self.iter().next()
    }

    /// Current entry for a cell, if it is a candidate
    #[must_use]
    pub fn get(&self, pos: Pos) -> Option<&Candidate> {
        let idx = pos.to_index();
        self.listed[idx].then(|| &self.entries[idx])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listed.iter().filter(|&&l| l).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}
