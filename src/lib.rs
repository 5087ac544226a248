//! Gomoku engine built on proof-number search
//!
//! Standard freestyle Gomoku on a 15x15 board: five or more in a row wins.
//! The engine tries to prove that the side to move can force a win, and
//! plays the most promising move when the proof does not finish in budget.
//!
//! # Architecture
//!
//! - [`board`]: coordinates and the packed four-view board
//! - [`eval`]: line threat classifier, pattern scores and the candidate selector
//! - [`search`]: forced-win finder, transposition table and the proof-number engine
//! - [`engine`]: the [`Engine`] trait the game loop talks to
//! - [`ui`]: console rendering, the human-vs-engine game and the tree inspector
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{Engine, PnSearch, Pos, SearchConfig};
//!
//! let mut engine = PnSearch::new(SearchConfig::default().with_node_budget(1_000));
//!
//! // Black opens at h8, the engine answers as White
//! engine.notify_move("h8".parse::<Pos>().unwrap());
//! if let Some(pos) = engine.compute_response() {
//!     engine.notify_move(pos);
//!     println!("engine plays {pos}");
//! }
//! ```

pub mod board;
pub mod engine;
pub mod eval;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{PackedBoard, Pos, Stone, BOARD_SIZE};
pub use engine::Engine;
pub use search::{PnSearch, SearchConfig, SearchStats};
