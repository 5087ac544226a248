//! Transposition table for proof-number search
//!
//! Maps a position hash to the first node expanded for that position during
//! the current search. Later arrivals at the same position reuse that node's
//! children instead of generating their own; proof numbers are never merged.
//!
//! # Example
//!
//! ```
//! use gomoku::search::{NodeId, TranspositionTable};
//!
//! let mut tt = TranspositionTable::new();
//! assert_eq!(tt.lookup_or_register(0xABCD, NodeId(3)), None);
//! assert_eq!(tt.lookup_or_register(0xABCD, NodeId(7)), Some(NodeId(3)));
//! ```

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;

use super::node::NodeId;

/// Hash → first expanded node, rebuilt for every top-level search.
#[derive(Debug, Default, Clone)]
pub struct TranspositionTable {
    entries: FxHashMap<u64, NodeId>,
}

impl TranspositionTable {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Return the node already registered for `hash`, or register `node`.
    ///
    /// A node that is already the registered one for its hash is reported as
    /// found, so expanding it twice is detectable by the caller.
    pub fn lookup_or_register(&mut self, hash: u64, node: NodeId) -> Option<NodeId> {
        match self.entries.entry(hash) {
            Entry::Occupied(entry) => Some(*entry.get()),
            Entry::Vacant(entry) => {
                entry.insert(node);
                None
            }
        }
    }

    #[must_use]
    pub fn get(&self, hash: u64) -> Option<NodeId> {
        self.entries.get(&hash).copied()
    }

    /// Clear all entries in the table.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
