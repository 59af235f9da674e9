//! History consistency: replaying the recorded moves reproduces the board.

use super::super::{Board, GameController};
use super::Invariant;

/// Invariant: the move history rebuilds the live board exactly.
///
/// Every recorded move targets an empty cell at the time it is replayed, and
/// no cell is filled without a recorded move.
pub struct HistoryConsistentInvariant;

impl Invariant<GameController> for HistoryConsistentInvariant {
    fn holds(game: &GameController) -> bool {
        let mut rebuilt = Board::new();
        for mov in game.history() {
            if rebuilt.apply_move(mov.position, mov.mark).is_err() {
                return false;
            }
        }
        rebuilt == *game.board()
    }

    fn description() -> &'static str {
        "Move history replays to the live board"
    }
}
