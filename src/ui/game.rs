//! Human vs engine game loop

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::board::{Direction, PackedBoard, ParsePosError, Pos, Stone};
use crate::engine::Engine;
use crate::eval::completes_five;
use crate::search::PnTree;

use super::console::{read_move, render};
use super::inspector::inspect;

/// Errors raised while setting up or playing a game.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("cannot read replay file {}: {source}", path.display())]
    Replay {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("bad coordinate in replay: {0}")]
    Parse(#[from] ParsePosError),
    #[error("position {0} is already used")]
    Occupied(Pos),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won(Stone),
    /// Board full, or the engine had nothing to play
    Draw,
    /// Input ran out before the game ended
    Aborted,
}

/// Human vs engine game.
///
/// The game keeps its own board for rendering and win detection; the engine
/// is told about every move, its own included.
pub struct Game<E: Engine> {
    board: PackedBoard,
    engine: E,
    current: Stone,
    human_to_move: bool,
    last_move: Option<Pos>,
    history: Vec<Pos>,
    outcome: Option<Outcome>,
    winning_line: Vec<Pos>,
    /// Tree shown by the inspector after every engine move
    tree_of: Option<fn(&E) -> &PnTree>,
}

impl<E: Engine> Game<E> {
    pub fn new(engine: E, human_first: bool) -> Self {
        Self {
            board: PackedBoard::new(),
            engine,
            current: Stone::Black,
            human_to_move: human_first,
            last_move: None,
            history: Vec::new(),
            outcome: None,
            winning_line: Vec::new(),
            tree_of: None,
        }
    }

    /// Browse the tree returned by `tree_of` after every engine move.
    pub fn with_inspector(mut self, tree_of: fn(&E) -> &PnTree) -> Self {
        self.tree_of = Some(tree_of);
        self
    }

    pub fn board(&self) -> &PackedBoard {
        &self.board
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Side to move
    pub fn current(&self) -> Stone {
        self.current
    }

    pub fn is_human_turn(&self) -> bool {
        self.human_to_move
    }

    pub fn history(&self) -> &[Pos] {
        &self.history
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Play `pos` for the side to move and pass the turn.
    pub fn play_move(&mut self, pos: Pos) -> Result<Option<Outcome>, GameError> {
        if let Some(outcome) = self.outcome {
            return Ok(Some(outcome));
        }
        if !self.board.is_empty(pos) {
            return Err(GameError::Occupied(pos));
        }

        let color = self.current;
        let wins = completes_five(&self.board, pos, color);
        self.board.place(pos, color);
        self.engine.notify_move(pos);
        self.history.push(pos);
        self.last_move = Some(pos);

        if wins {
            self.winning_line = winning_line(&self.board, pos, color);
            self.outcome = Some(Outcome::Won(color));
        } else if self.board.is_full() {
            self.outcome = Some(Outcome::Draw);
        }

        self.current = color.opponent();
        self.human_to_move = !self.human_to_move;
        Ok(self.outcome)
    }

    /// Play whitespace-separated coordinates, black first.
    ///
    /// Returns the number of moves played. Stops early if a move ends the game.
    pub fn load_moves(&mut self, text: &str) -> Result<usize, GameError> {
        let mut played = 0;
        for word in text.split_whitespace() {
            let pos: Pos = word.parse()?;
            played += 1;
            if self.play_move(pos)?.is_some() {
                break;
            }
        }
        Ok(played)
    }

    /// Start from the moves stored in a file.
    pub fn replay(&mut self, path: &Path) -> Result<usize, GameError> {
        let text = fs::read_to_string(path).map_err(|source| GameError::Replay {
            path: path.to_path_buf(),
            source,
        })?;
        let played = self.load_moves(&text)?;
        info!("replayed {} moves from {}", played, path.display());
        Ok(played)
    }

    /// Alternate human and engine moves until the game ends.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<Outcome, GameError> {
        let outcome = loop {
            if let Some(outcome) = self.outcome {
                break outcome;
            }
            writeln!(output, "{}", render(&self.board, self.last_move, &[]))?;

            let pos = if self.human_to_move {
                match read_move(input, output, &self.board)? {
                    Some(pos) => pos,
                    None => break Outcome::Aborted,
                }
            } else {
                let Some(pos) = self.engine.compute_response() else {
                    self.outcome = Some(Outcome::Draw);
                    continue;
                };
                writeln!(output, "engine plays {pos}")?;
                if let Some(tree_of) = self.tree_of {
                    inspect(tree_of(&self.engine), input, output)?;
                }
                pos
            };
            self.play_move(pos)?;
        };

        self.announce(outcome, output)?;
        Ok(outcome)
    }

    fn announce<W: Write>(&self, outcome: Outcome, output: &mut W) -> io::Result<()> {
        writeln!(output, "{}", render(&self.board, self.last_move, &self.winning_line))?;
        // the side that just moved is the opponent of `current`
        let human_won = !self.human_to_move;
        match outcome {
            Outcome::Won(_) if human_won => {
                writeln!(output, "congratulations, you have defeated the engine")
            }
            Outcome::Won(_) => writeln!(output, "you have lost"),
            Outcome::Draw => writeln!(output, "the board is full, it is a draw"),
            Outcome::Aborted => writeln!(output, "game aborted"),
        }
    }
}

/// Five or more stones of `color` through `pos`, if any.
fn winning_line(board: &PackedBoard, pos: Pos, color: Stone) -> Vec<Pos> {
    let same = |p: Pos| board.get(p).stone() == Some(color);
    for dir in Direction::ALL {
        let (dr, dc) = dir.delta();
        let mut line = vec![pos];
        for sign in [-1, 1] {
            let mut step = 1;
            while let Some(p) = pos.offset(dr * step * sign, dc * step * sign) {
                if !same(p) {
                    break;
                }
                line.push(p);
                step += 1;
            }
        }
        if line.len() >= 5 {
            line.sort();
            return line;
        }
    }
    Vec::new()
}
