//! Strictly Noughts - noughts and crosses with a minimax opponent
//!
//! # Architecture
//!
//! - **Games**: board, rules and the [`GameController`] state machine
//! - **Engine**: exhaustive minimax ([`SearchEngine`]) and an off-thread
//!   [`EngineWorker`]
//! - **Players**: human, engine and first-free players behind one trait
//! - **Orchestrator**: drives a game between two players and reports
//!   [`GameEvent`]s
//!
//! # Example
//!
//! ```
//! use strictly_noughts::{GameController, Phase, Position};
//!
//! let mut game = GameController::new();
//! game.submit_move(Position::Center).unwrap();
//! while game.phase() == Phase::InProgress {
//!     game.request_engine_move();
//! }
//! assert_eq!(game.phase(), Phase::Drawn);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod engine;
mod games;
mod orchestrator;
mod players;

// Crate-level exports - Configuration
pub use config::{ConfigError, EngineConfig, GameConfig, GameMode, Strategy};

// Crate-level exports - Search engine
pub use engine::{
    CancelToken, EngineReply, EngineRequest, EngineWorker, LOSS_SCORE, SearchEngine,
    SearchOutcome, SearchStats, WIN_SCORE,
};

// Crate-level exports - Orchestration
pub use orchestrator::{GameEvent, Orchestrator};

// Crate-level exports - Players
pub use players::{EnginePlayer, FirstFreePlayer, HumanPlayer, InputLines, Player};

// Crate-level exports - Game types
pub use games::tictactoe::{
    Board, BoardParseError, Cell, CellIsEmpty, GameController, GameNotOver, InvalidMove,
    LegalMove, Mark, MarksTurn, Move, Phase, PhaseObserver, Position,
};

// Crate-level exports - Rules and invariants
pub use games::tictactoe::invariants::{
    ControllerInvariants, HistoryConsistentInvariant, Invariant, InvariantSet,
    InvariantViolation, MarkBalanceInvariant,
};
pub use games::tictactoe::rules::{LINES, check_winner, evaluate, has_line, is_draw, is_full};
