//! Move preconditions.
//!
//! Each check is a small named rule; [`LegalMove`] composes them in the order
//! errors are reported.

use super::action::{InvalidMove, Move};
use super::{Board, Phase};
use tracing::{instrument, warn};

/// Precondition: the game has not reached a terminal phase.
pub struct GameNotOver;

impl GameNotOver {
    /// Fails with [`InvalidMove::GameOver`] on a won or drawn board.
    pub fn check(board: &Board) -> Result<(), InvalidMove> {
        match board.evaluate() {
            Phase::InProgress => Ok(()),
            phase => Err(InvalidMove::GameOver(phase)),
        }
    }
}

/// Precondition: the target cell is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Fails with [`InvalidMove::CellOccupied`] if the cell holds a mark.
    pub fn check(mov: &Move, board: &Board) -> Result<(), InvalidMove> {
        if board.is_empty(mov.position) {
            Ok(())
        } else {
            Err(InvalidMove::CellOccupied(mov.position))
        }
    }
}

/// Precondition: the move's mark is the mark to move.
pub struct MarksTurn;

impl MarksTurn {
    /// Fails with [`InvalidMove::WrongMark`] if it is the other mark's turn.
    pub fn check(mov: &Move, board: &Board) -> Result<(), InvalidMove> {
        if mov.mark == board.to_move() {
            Ok(())
        } else {
            Err(InvalidMove::WrongMark(mov.mark))
        }
    }
}

/// Composite precondition for applying a move.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(board), fields(board = %board))]
    pub fn check(mov: &Move, board: &Board) -> Result<(), InvalidMove> {
        let result = GameNotOver::check(board)
            .and_then(|()| CellIsEmpty::check(mov, board))
            .and_then(|()| MarksTurn::check(mov, board));
        if let Err(e) = &result {
            warn!(error = %e, "Move rejected");
        }
        result
    }
}
