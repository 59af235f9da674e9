//! Game rules.
//!
//! Pure functions over a [`Board`]; storage lives in `types`.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner, has_line};

use super::{Board, Phase};

/// Classifies a board: a line of three wins, otherwise a full board draws.
pub fn evaluate(board: &Board) -> Phase {
    if let Some(winner) = check_winner(board) {
        Phase::Won(winner)
    } else if is_full(board) {
        Phase::Drawn
    } else {
        Phase::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Mark;

    #[test]
    fn test_evaluate_phases() {
        assert_eq!(evaluate(&Board::new()), Phase::InProgress);
        assert_eq!(
            evaluate(&"XXX/OO./...".parse().unwrap()),
            Phase::Won(Mark::First)
        );
        assert_eq!(evaluate(&"XOX/XOO/OXX".parse().unwrap()), Phase::Drawn);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let board: Board = "XO./.X./..O".parse().unwrap();
        let first = evaluate(&board);
        assert_eq!(evaluate(&board), first);
        assert_eq!(evaluate(&board), first);
    }
}
