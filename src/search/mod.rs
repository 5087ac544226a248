//! Search module for the Gomoku engine
//!
//! Contains:
//! - Zobrist hashing for position identification
//! - Transposition table for sharing subtrees between move orders
//! - Proof-number tree and the engine that grows it
//! - Forced-win (threat-space) search used to short-circuit expansions

pub mod config;
pub mod node;
pub mod pn;
pub mod threat;
pub mod tt;
pub mod zobrist;

pub use config::SearchConfig;
pub use node::{Children, NodeId, NodeKind, PnNode, PnTree, INFINITY};
pub use pn::{PnSearch, SearchStats};
pub use threat::ForcedWinFinder;
pub use tt::TranspositionTable;
pub use zobrist::{ZobristHash, ZobristTable};
