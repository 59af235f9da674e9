//! Win detection.

use super::super::{Board, Cell, Mark, Position};

/// The 8 lines of three: rows, then columns, then diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Returns the mark holding three in a line, if any.
pub fn check_winner(board: &Board) -> Option<Mark> {
    LINES.iter().find_map(|&[a, b, c]| match board.get(a) {
        Cell::Marked(mark) if board.get(b) == Cell::Marked(mark) && board.get(c) == Cell::Marked(mark) => {
            Some(mark)
        }
        _ => None,
    })
}

/// True if `mark` holds any line of three.
pub fn has_line(board: &Board, mark: Mark) -> bool {
    LINES
        .iter()
        .any(|line| line.iter().all(|&pos| board.get(pos) == Cell::Marked(mark)))
}
