//! Text front end for the Gomoku engine
//!
//! This module provides console rendering, the human vs engine game loop and
//! a small interactive tree inspector.

pub mod console;
pub mod game;
pub mod inspector;

pub use game::{Game, GameError, Outcome};
