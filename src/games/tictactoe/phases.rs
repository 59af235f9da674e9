//! Game phase: in progress or one of the terminal outcomes.

use super::Mark;
use serde::{Deserialize, Serialize};

/// Classification of a board.
///
/// `Won` and `Drawn` are terminal and absorbing: no move is accepted once
/// either is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Moves may still be made.
    InProgress,
    /// A mark completed a line of three.
    Won(Mark),
    /// Board full with no line.
    Drawn,
}

impl Phase {
    /// Returns true for `Won` and `Drawn`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Phase::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Phase::Won(mark) => Some(*mark),
            Phase::InProgress | Phase::Drawn => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::InProgress => write!(f, "In progress"),
            Phase::Won(mark) => write!(f, "{} wins", mark),
            Phase::Drawn => write!(f, "Draw"),
        }
    }
}
