//! Moves and the ways a move can be rejected.

use super::{Mark, Phase, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move: a mark placed at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The mark being placed.
    pub mark: Mark,
    /// Where it is placed.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(mark: Mark, position: Position) -> Self {
        Self { mark, position }
    }

    /// Returns the mark being placed.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Returns the target position.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position)
    }
}

/// A move that cannot be applied. The board is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum InvalidMove {
    /// Coordinates outside the 3x3 grid.
    #[display("Position ({}, {}) is off the board", row, col)]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Position),

    /// The game has already reached a terminal phase.
    #[display("Game is already over ({})", _0)]
    GameOver(Phase),

    /// The mark is not the one whose turn it is.
    #[display("It's not {}'s turn", _0)]
    WrongMark(Mark),
}

impl std::error::Error for InvalidMove {}
