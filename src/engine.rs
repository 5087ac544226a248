//! Engine interface seen by the game loop
//!
//! The game loop announces every move, from either side, with
//! [`Engine::notify_move`] and asks for a reply with
//! [`Engine::compute_response`]. The engine keeps its own copy of the
//! position; the caller only ever passes legal, unoccupied coordinates.

use crate::board::Pos;

/// A Gomoku move generator that follows the game one move at a time.
pub trait Engine {
    /// Record a move just played by either side.
    fn notify_move(&mut self, pos: Pos);

    /// Move for the side to move, or `None` when there is nothing to play.
    ///
    /// Scratch work is undone before returning: the committed position is
    /// the same as before the call.
    fn compute_response(&mut self) -> Option<Pos>;
}
