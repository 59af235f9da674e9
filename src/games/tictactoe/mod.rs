//! Noughts and crosses: board, rules and the game controller.

mod action;
mod contracts;
mod controller;
pub mod invariants;
mod phases;
mod position;
pub mod rules;
mod types;

pub use action::{InvalidMove, Move};
pub use contracts::{CellIsEmpty, GameNotOver, LegalMove, MarksTurn};
pub use controller::{GameController, PhaseObserver};
pub use phases::Phase;
pub use position::Position;
pub use types::{Board, BoardParseError, Cell, Mark};
