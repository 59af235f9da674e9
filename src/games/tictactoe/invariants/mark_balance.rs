//! Mark balance: First has the same number of marks as Second, or one more.

use super::super::{Board, GameController, Mark};
use super::Invariant;

/// Invariant: `count(First) - count(Second)` is 0 or 1.
///
/// First always moves first and turns strictly alternate.
pub struct MarkBalanceInvariant;

impl Invariant<Board> for MarkBalanceInvariant {
    fn holds(board: &Board) -> bool {
        let first = board.count(Mark::First);
        let second = board.count(Mark::Second);
        first == second || first == second + 1
    }

    fn description() -> &'static str {
        "First has as many marks as Second, or one more"
    }
}

impl Invariant<GameController> for MarkBalanceInvariant {
    fn holds(game: &GameController) -> bool {
        <Self as Invariant<Board>>::holds(game.board())
    }

    fn description() -> &'static str {
        <Self as Invariant<Board>>::description()
    }
}
