//! Cell addresses on the 3x3 board.

use super::action::InvalidMove;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A position on the board, addressed by (row, col) in [0,3).
///
/// Variants are declared in row-major order, so iteration order and
/// `index()` order agree with the search engine's tie-break order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
pub enum Position {
    /// Row 0, column 0
    TopLeft,
    /// Row 0, column 1
    TopCenter,
    /// Row 0, column 2
    TopRight,
    /// Row 1, column 0
    MiddleLeft,
    /// Row 1, column 1
    Center,
    /// Row 1, column 2
    MiddleRight,
    /// Row 2, column 0
    BottomLeft,
    /// Row 2, column 1
    BottomCenter,
    /// Row 2, column 2
    BottomRight,
}

impl Position {
    /// All 9 positions in row-major order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Creates a position from raw coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove::OutOfBounds`] unless both coordinates are in [0,3).
    pub fn new(row: usize, col: usize) -> Result<Self, InvalidMove> {
        if row >= 3 || col >= 3 {
            return Err(InvalidMove::OutOfBounds { row, col });
        }
        Ok(Self::ALL[row * 3 + col])
    }

    /// Row index (0-2).
    pub fn row(self) -> usize {
        self.index() / 3
    }

    /// Column index (0-2).
    pub fn col(self) -> usize {
        self.index() % 3
    }

    /// Converts position to board index (0-8).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Creates position from board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Get label for this position (for display).
    pub fn label(self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Parses player input.
    ///
    /// Accepts a keypad number (`1`-`9`, row-major), a `row,col` pair
    /// (`0,2`), or a label such as `center` or `top-right`.
    #[instrument]
    pub fn parse_input(s: &str) -> Option<Position> {
        let s = s.trim();

        if let Some((row, col)) = s.split_once(',') {
            let row = row.trim().parse::<usize>().ok()?;
            let col = col.trim().parse::<usize>().ok()?;
            return Self::new(row, col).ok();
        }

        if let Ok(num) = s.parse::<usize>() {
            return num.checked_sub(1).and_then(Self::from_index);
        }

        let s_lower = s.to_lowercase().replace(' ', "-");
        if s_lower.is_empty() {
            return None;
        }
        <Position as strum::IntoEnumIterator>::iter()
            .find(|pos| pos.label().to_lowercase() == s_lower)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(Position::new(0, 0), Ok(Position::TopLeft));
        assert_eq!(Position::new(2, 1), Ok(Position::BottomCenter));
        assert_eq!(
            Position::new(3, 0),
            Err(InvalidMove::OutOfBounds { row: 3, col: 0 })
        );
        assert_eq!(
            Position::new(1, 7),
            Err(InvalidMove::OutOfBounds { row: 1, col: 7 })
        );
    }

    #[test]
    fn test_row_col_round_trip_order() {
        for (index, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(pos.index(), index);
            assert_eq!(Position::new(pos.row(), pos.col()), Ok(*pos));
        }
    }

    #[test]
    fn test_parse_input_forms() {
        assert_eq!(Position::parse_input("5"), Some(Position::Center));
        assert_eq!(Position::parse_input(" 1 "), Some(Position::TopLeft));
        assert_eq!(Position::parse_input("0"), None);
        assert_eq!(Position::parse_input("10"), None);
        assert_eq!(Position::parse_input("2, 0"), Some(Position::BottomLeft));
        assert_eq!(Position::parse_input("3,0"), None);
        assert_eq!(Position::parse_input("Top right"), Some(Position::TopRight));
        assert_eq!(Position::parse_input("center"), Some(Position::Center));
        assert_eq!(Position::parse_input(""), None);
        assert_eq!(Position::parse_input("middle"), None);
    }
}
