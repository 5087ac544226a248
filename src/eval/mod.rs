//! Evaluation module for Gomoku positions
//!
//! - Threat classification of line windows
//! - Pattern scores used for move ordering
//! - Candidate selector feeding node expansion

pub mod classify;
pub mod patterns;
pub mod selector;

pub use classify::{classify, classify_move, completes_five, ATTACKS, FIVE, FOUR_ATTACK, THREE_ATTACK};
pub use patterns::PatternScore;
pub use selector::{Candidate, Selector};
