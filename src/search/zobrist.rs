//! Zobrist hashing for position identification
//!
//! Zobrist hashing allows O(1) incremental hash updates when placing/removing stones.
//! The proof-number search walks down and back up the tree thousands of times
//! per move, so the hash keeps a committed baseline it can snap back to.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Pos, Stone};
//! use gomoku::search::ZobristHash;
//!
//! let mut hash = ZobristHash::new();
//! let base = hash.current();
//!
//! hash.toggle(Pos::new(7, 7), Stone::Black);
//! assert_ne!(hash.current(), base);
//!
//! hash.restart();
//! assert_eq!(hash.current(), base);
//! ```

use crate::board::{Pos, Stone, TOTAL_CELLS};

/// Zobrist keys for every (cell, stone color) pair.
///
/// Uses XOR-based hashing with precomputed random values, so placing and
/// removing a stone are the same operation.
#[derive(Clone)]
pub struct ZobristTable {
    keys: [[u64; TOTAL_CELLS]; 2],
}

impl ZobristTable {
    /// Create a new Zobrist table with deterministic random values.
    ///
    /// Uses a linear congruential generator (LCG) with a fixed seed
    /// to ensure reproducible hashes across different runs.
    #[must_use]
    pub fn new() -> Self {
        // Constants from Knuth's MMIX LCG
        let mut seed: u64 = 0x1234_5678_9ABC_DEF0;
        let mut next_rand = || {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            // the low bits of an LCG are weak; fold the high half down
            seed ^ (seed >> 32)
        };

        let mut keys = [[0u64; TOTAL_CELLS]; 2];
        for i in 0..TOTAL_CELLS {
            keys[0][i] = next_rand();
            keys[1][i] = next_rand();
        }

        Self { keys }
    }

    #[inline]
    #[must_use]
    pub fn key(&self, pos: Pos, stone: Stone) -> u64 {
        self.keys[stone.index()][pos.to_index()]
    }

    /// Hash of a full list of stones
    #[must_use]
    pub fn hash<'a>(&self, stones: impl IntoIterator<Item = &'a (Pos, Stone)>) -> u64 {
        stones
            .into_iter()
            .fold(0, |h, &(pos, stone)| h ^ self.key(pos, stone))
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Incrementally maintained board hash with a restorable baseline.
#[derive(Clone)]
pub struct ZobristHash {
    table: ZobristTable,
    current: u64,
    base: u64,
}

impl ZobristHash {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: ZobristTable::new(),
            current: 0,
            base: 0,
        }
    }

    /// Add or remove a stone from the working hash (XOR is its own inverse).
    #[inline]
    pub fn toggle(&mut self, pos: Pos, stone: Stone) {
        self.current ^= self.table.key(pos, stone);
    }

    /// Make a stone part of the baseline as well as the working hash.
    #[inline]
    pub fn commit(&mut self, pos: Pos, stone: Stone) {
        let key = self.table.key(pos, stone);
        self.current ^= key;
        self.base ^= key;
    }

    /// Drop every `toggle` since the last `restart`.
    #[inline]
    pub fn restart(&mut self) {
        self.current = self.base;
    }

    #[inline]
    #[must_use]
    pub fn current(&self) -> u64 {
        self.current
    }

    #[inline]
    #[must_use]
    pub fn table(&self) -> &ZobristTable {
        &self.table
    }
}

impl Default for ZobristHash {
    fn default() -> Self {
        Self::new()
    }
}
