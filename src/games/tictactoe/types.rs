//! Core domain types for noughts and crosses.

use super::action::{InvalidMove, Move};
use super::contracts::LegalMove;
use super::invariants::{Invariant, MarkBalanceInvariant};
use super::phases::Phase;
use super::position::Position;
use super::rules;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{instrument, trace};

/// Mark placed by one of the two players.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter, strum::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    /// The mark that always moves first (X).
    #[strum(to_string = "X")]
    First,
    /// The mark that moves second (O).
    #[strum(to_string = "O")]
    Second,
}

impl Mark {
    /// Returns the other player's mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::First => Mark::Second,
            Mark::Second => Mark::First,
        }
    }

    /// Symbol used by the compact board notation.
    pub fn symbol(self) -> char {
        match self {
            Mark::First => 'X',
            Mark::Second => 'O',
        }
    }
}

/// Contents of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// No mark yet.
    #[default]
    Empty,
    /// Cell holds a mark.
    Marked(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Marked(mark) => Some(mark),
        }
    }
}

/// 3x3 board.
///
/// `Board` is `Copy`: every copy is an independent value, which is what the
/// search engine relies on to simulate moves without touching the live game.
///
/// Serialized as the nine cells in row-major order. Deserializing goes
/// through [`Board::from_cells`], so only reachable boards come back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "[Cell; 9]", into = "[Cell; 9]")]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Builds a board from cells in row-major order.
    ///
    /// # Errors
    ///
    /// Rejects boards that alternating play from an empty board cannot
    /// produce: unbalanced mark counts, both marks holding a line, or a move
    /// made after the game was already won.
    pub fn from_cells(cells: [Cell; 9]) -> Result<Self, BoardParseError> {
        let board = Self { cells };
        let first = board.count(Mark::First);
        let second = board.count(Mark::Second);
        if !MarkBalanceInvariant::holds(&board) {
            return Err(BoardParseError::Unbalanced { first, second });
        }

        match (rules::has_line(&board, Mark::First), rules::has_line(&board, Mark::Second)) {
            (true, true) => Err(BoardParseError::BothWon),
            // X's winning move leaves X one mark ahead.
            (true, false) if first == second => Err(BoardParseError::PlayAfterWin(Mark::First)),
            // O's winning move evens the counts.
            (false, true) if first != second => Err(BoardParseError::PlayAfterWin(Mark::Second)),
            _ => Ok(board),
        }
    }

    /// Clears every cell.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; 9];
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Marked(mark))
            .count()
    }

    /// Number of non-empty cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// The mark whose turn it is, derived from the mark counts.
    pub fn to_move(&self) -> Mark {
        if self.count(Mark::First) > self.count(Mark::Second) {
            Mark::Second
        } else {
            Mark::First
        }
    }

    /// Classifies the board as in progress, won or drawn.
    pub fn evaluate(&self) -> Phase {
        rules::evaluate(self)
    }

    /// Empty cells in row-major order. Empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Position> {
        if self.evaluate().is_terminal() {
            return Vec::new();
        }
        Position::ALL
            .iter()
            .copied()
            .filter(|pos| self.is_empty(*pos))
            .collect()
    }

    /// Returns an independent copy of this board.
    pub fn copy(&self) -> Board {
        *self
    }

    /// Places `mark` at `pos` and returns the resulting phase.
    ///
    /// # Errors
    ///
    /// Fails without touching the board if the cell is taken, the game is
    /// already over, or `mark` is not the mark to move.
    #[instrument(skip(self), fields(position = %pos, mark = %mark))]
    pub fn apply_move(&mut self, pos: Position, mark: Mark) -> Result<Phase, InvalidMove> {
        LegalMove::check(&Move::new(mark, pos), self)?;

        self.place(pos, mark);
        debug_assert!(
            MarkBalanceInvariant::holds(self),
            "{}",
            <MarkBalanceInvariant as Invariant<Board>>::description()
        );

        let phase = self.evaluate();
        trace!(%phase, "Move applied");
        Ok(phase)
    }

    /// Returns a copy with `mark` placed at `pos`, leaving `self` untouched.
    pub fn with_move(&self, pos: Position, mark: Mark) -> Result<(Board, Phase), InvalidMove> {
        let mut next = self.copy();
        let phase = next.apply_move(pos, mark)?;
        Ok((next, phase))
    }

    /// Writes a cell without validation (callers guarantee legality).
    pub(crate) fn place(&mut self, pos: Position, mark: Mark) {
        self.cells[pos.index()] = Cell::Marked(mark);
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty cells show their 1-based number so players can type it.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.cells[pos] {
                    Cell::Empty => (pos + 1).to_string(),
                    Cell::Marked(mark) => mark.symbol().to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }

    /// Compact notation: rows separated by `/`, `.` for empty cells.
    pub fn notation(&self) -> String {
        self.cells
            .chunks(3)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.mark().map_or('.', Mark::symbol))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Error parsing a board from compact notation.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardParseError {
    /// Notation did not contain exactly nine cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongLength(#[error(not(source))] usize),
    /// Character is not `X`, `O`, `.`, `_` or `-`.
    #[display("Unexpected character {:?}", _0)]
    BadCharacter(#[error(not(source))] char),
    /// X must have as many marks as O, or one more.
    #[display("Unbalanced mark counts: {} X marks and {} O marks", first, second)]
    Unbalanced {
        /// Number of X marks.
        first: usize,
        /// Number of O marks.
        second: usize,
    },
    /// Both marks hold a line of three.
    #[display("Unreachable board: both X and O have three in a line")]
    BothWon,
    /// A move was made after this mark had already won.
    #[display("Unreachable board: play continued after {} won", _0)]
    PlayAfterWin(#[error(not(source))] Mark),
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses `"XX./OO./..."`. Whitespace and `/` separators are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/' && *c != '|')
            .collect();
        if symbols.len() != 9 {
            return Err(BoardParseError::WrongLength(symbols.len()));
        }

        let mut cells = [Cell::Empty; 9];
        for (cell, symbol) in cells.iter_mut().zip(symbols) {
            *cell = match symbol.to_ascii_uppercase() {
                'X' => Cell::Marked(Mark::First),
                'O' => Cell::Marked(Mark::Second),
                '.' | '_' | '-' => Cell::Empty,
                other => return Err(BoardParseError::BadCharacter(other)),
            };
        }
        Board::from_cells(cells)
    }
}

impl TryFrom<[Cell; 9]> for Board {
    type Error = BoardParseError;

    fn try_from(cells: [Cell; 9]) -> Result<Self, Self::Error> {
        Board::from_cells(cells)
    }
}

impl From<Board> for [Cell; 9] {
    fn from(board: Board) -> Self {
        board.cells
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.notation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.occupied_count(), 0);
        assert_eq!(board.legal_moves().len(), 9);
        assert_eq!(board.to_move(), Mark::First);
    }

    #[test]
    fn test_apply_move_rejects_occupied() {
        let mut board = Board::new();
        board.apply_move(pos(1, 1), Mark::First).unwrap();
        let before = board;

        let result = board.apply_move(pos(1, 1), Mark::Second);
        assert_eq!(result, Err(InvalidMove::CellOccupied(pos(1, 1))));
        assert_eq!(board, before);
    }

    #[test]
    fn test_apply_move_rejects_wrong_mark() {
        let mut board = Board::new();
        let result = board.apply_move(pos(0, 0), Mark::Second);
        assert_eq!(result, Err(InvalidMove::WrongMark(Mark::Second)));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_apply_move_rejects_after_win() {
        let mut board: Board = "XX./OO./...".parse().unwrap();
        assert_eq!(board.apply_move(pos(0, 2), Mark::First), Ok(Phase::Won(Mark::First)));

        let result = board.apply_move(pos(2, 2), Mark::Second);
        assert_eq!(result, Err(InvalidMove::GameOver(Phase::Won(Mark::First))));
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_copy_is_independent() {
        let board = Board::new();
        let mut copy = board.copy();
        copy.apply_move(pos(0, 0), Mark::First).unwrap();
        assert!(board.is_empty(pos(0, 0)));
        assert!(!copy.is_empty(pos(0, 0)));
    }

    #[test]
    fn test_reset_clears_cells() {
        let mut board: Board = "XO./X../...".parse().unwrap();
        board.reset();
        assert_eq!(board, Board::new());
        assert_eq!(board.evaluate(), Phase::InProgress);
    }

    #[test]
    fn test_legal_moves_row_major() {
        let board: Board = ".X./O../...".parse().unwrap();
        let moves = board.legal_moves();
        assert_eq!(moves.first(), Some(&pos(0, 0)));
        assert_eq!(moves.get(1), Some(&pos(0, 2)));
        assert_eq!(moves.get(2), Some(&pos(1, 1)));
        assert_eq!(moves.len(), 7);
    }

    #[test]
    fn test_parse_rejects_unbalanced() {
        let result = "OO./.../...".parse::<Board>();
        assert_eq!(
            result,
            Err(BoardParseError::Unbalanced { first: 0, second: 2 })
        );
        assert_eq!(
            "XX/...".parse::<Board>(),
            Err(BoardParseError::WrongLength(5))
        );
        assert_eq!(
            "XQ./.../...".parse::<Board>(),
            Err(BoardParseError::BadCharacter('Q'))
        );
    }

    #[test]
    fn test_parse_rejects_unreachable_wins() {
        assert_eq!(
            "XXX/OOO/X..".parse::<Board>(),
            Err(BoardParseError::BothWon)
        );
        // O moved after X completed the top row.
        assert_eq!(
            "XXX/OO./.O.".parse::<Board>(),
            Err(BoardParseError::PlayAfterWin(Mark::First))
        );
        // X moved after O completed the middle row.
        assert_eq!(
            "XX./OOO/X.X".parse::<Board>(),
            Err(BoardParseError::PlayAfterWin(Mark::Second))
        );
        // A single X move can complete two lines at once.
        assert!("XOX/OXO/XOX".parse::<Board>().is_ok());
    }

    #[test]
    fn test_serde_keeps_reachable_boards() {
        let board: Board = "XO./.X./..O".parse().unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);
    }

    #[test]
    fn test_deserialize_rejects_unbalanced_board() {
        let second = Cell::Marked(Mark::Second);
        let mut cells = [Cell::Empty; 9];
        cells[..3].fill(second);
        let json = serde_json::to_string(&cells).unwrap();

        let err = serde_json::from_str::<Board>(&json).unwrap_err();
        assert!(err.to_string().contains("Unbalanced mark counts"), "{err}");

        cells[2] = Cell::Empty;
        let json = serde_json::to_string(&cells).unwrap();
        assert!(serde_json::from_str::<Board>(&json).is_err());
    }

    #[test]
    fn test_notation_matches_parse() {
        let board: Board = "XOX/.O./X..".parse().unwrap();
        assert_eq!(board.notation(), "XOX/.O./X..");
        assert_eq!(board.display(), "X|O|X\n-+-+-\n4|O|6\n-+-+-\nX|8|9");
    }
}
