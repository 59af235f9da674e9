//! Turn order and the single mutation path for the live game.

use super::action::{InvalidMove, Move};
use super::invariants::{ControllerInvariants, InvariantSet};
use super::{Board, Mark, Phase, Position};
use crate::engine::{CancelToken, EngineReply, EngineRequest, SearchEngine};
use tracing::{debug, info, instrument};

/// Callback invoked whenever the phase changes.
pub type PhaseObserver = Box<dyn FnMut(Phase) + Send + Sync>;

/// Owns the live board and decides whose turn it is.
///
/// Every move, human or engine, goes through [`submit_move`](Self::submit_move).
pub struct GameController {
    board: Board,
    current_mark: Mark,
    phase: Phase,
    history: Vec<Move>,
    engine: SearchEngine,
    generation: u64,
    cancel: CancelToken,
    observer: Option<PhaseObserver>,
}

impl std::fmt::Debug for GameController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameController")
            .field("board", &self.board.notation())
            .field("current_mark", &self.current_mark)
            .field("phase", &self.phase)
            .field("history", &self.history)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

impl GameController {
    /// Creates a controller with a fresh game and a pruning engine.
    pub fn new() -> Self {
        Self::with_engine(SearchEngine::default())
    }

    /// Creates a controller that uses `engine` for computer moves.
    pub fn with_engine(engine: SearchEngine) -> Self {
        Self {
            board: Board::new(),
            current_mark: Mark::First,
            phase: Phase::InProgress,
            history: Vec::new(),
            engine,
            generation: 0,
            cancel: CancelToken::new(),
            observer: None,
        }
    }

    /// Registers a callback fired on every phase change.
    pub fn set_observer(&mut self, observer: impl FnMut(Phase) + Send + Sync + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Replays `positions` from a new game, alternating marks from First.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidMove`] encountered.
    #[instrument(skip(positions), fields(moves = positions.len()))]
    pub fn replay(positions: &[Position]) -> Result<Self, InvalidMove> {
        let mut game = Self::new();
        for &pos in positions {
            game.submit_move(pos)?;
        }
        Ok(game)
    }

    /// The live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The mark whose turn it is (the last mover once the game is over).
    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Moves applied since the last new game.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Incremented by every [`new_game`](Self::new_game).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The engine used by [`request_engine_move`](Self::request_engine_move).
    pub fn engine(&self) -> SearchEngine {
        self.engine
    }

    /// Starts over: empty board, First to move, phase in progress.
    ///
    /// Any search started for the previous game is cancelled and its result
    /// will be refused.
    #[instrument(skip(self), fields(generation = self.generation + 1))]
    pub fn new_game(&mut self) {
        self.cancel.cancel();
        self.cancel = CancelToken::new();
        self.generation += 1;

        self.board.reset();
        self.current_mark = Mark::First;
        self.history.clear();
        self.set_phase(Phase::InProgress);
        info!("New game started");
    }

    /// Places the current mark at `pos`.
    ///
    /// On success the phase is updated and, if the game continues, the turn
    /// passes to the other mark.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove`] if the cell is taken or the game is over. The
    /// game is left unchanged.
    #[instrument(skip(self), fields(position = %pos, mark = %self.current_mark))]
    pub fn submit_move(&mut self, pos: Position) -> Result<Phase, InvalidMove> {
        let mark = self.current_mark;
        let phase = self.board.apply_move(pos, mark)?;
        self.history.push(Move::new(mark, pos));

        if phase == Phase::InProgress {
            self.current_mark = mark.opponent();
        }
        self.set_phase(phase);

        debug_assert!(
            ControllerInvariants::check_all(self).is_ok(),
            "controller invariants violated after {pos}"
        );
        debug!(board = %self.board, %phase, "Move accepted");
        if phase.is_terminal() {
            info!(%phase, moves = self.history.len(), "Game over");
        }
        Ok(phase)
    }

    /// Like [`submit_move`](Self::submit_move), from raw coordinates.
    ///
    /// # Errors
    ///
    /// Also fails with [`InvalidMove::OutOfBounds`] for coordinates outside
    /// the grid.
    pub fn submit_move_at(&mut self, row: usize, col: usize) -> Result<Phase, InvalidMove> {
        let pos = Position::new(row, col)?;
        self.submit_move(pos)
    }

    /// Lets the engine play the current mark.
    ///
    /// # Panics
    ///
    /// Panics if the game is over. Callers must check [`phase`](Self::phase)
    /// before asking the engine to move.
    #[instrument(skip(self), fields(mark = %self.current_mark))]
    pub fn request_engine_move(&mut self) -> Phase {
        assert!(
            !self.phase.is_terminal(),
            "engine move requested after the game ended ({})",
            self.phase
        );
        let pos = self.engine.choose_move(&self.board.copy(), self.current_mark);
        match self.submit_move(pos) {
            Ok(phase) => phase,
            Err(e) => panic!("engine chose an illegal move {pos}: {e}"),
        }
    }

    /// Snapshot for an off-thread search of the current position.
    ///
    /// # Panics
    ///
    /// Panics if the game is over.
    pub fn engine_request(&self) -> EngineRequest {
        assert!(
            !self.phase.is_terminal(),
            "engine move requested after the game ended ({})",
            self.phase
        );
        EngineRequest {
            board: self.board.copy(),
            mark: self.current_mark,
            generation: self.generation,
            cancel: self.cancel.clone(),
        }
    }

    /// Applies a finished off-thread search.
    ///
    /// Returns `Ok(None)` without touching the game if the reply belongs to a
    /// game that has since been replaced.
    ///
    /// # Errors
    ///
    /// Same as [`submit_move`](Self::submit_move).
    pub fn apply_engine_reply(&mut self, reply: EngineReply) -> Result<Option<Phase>, InvalidMove> {
        self.submit_move_for(reply.generation, *reply.outcome.position())
    }

    /// Applies `pos` only if `generation` is still the current game.
    ///
    /// # Errors
    ///
    /// Same as [`submit_move`](Self::submit_move).
    #[instrument(skip(self), fields(current = self.generation))]
    pub fn submit_move_for(
        &mut self,
        generation: u64,
        pos: Position,
    ) -> Result<Option<Phase>, InvalidMove> {
        if generation != self.generation {
            debug!(%pos, "Discarding move for a replaced game");
            return Ok(None);
        }
        self.submit_move(pos).map(Some)
    }

    fn set_phase(&mut self, phase: Phase) {
        let changed = self.phase != phase;
        self.phase = phase;
        if changed && let Some(observer) = self.observer.as_mut() {
            observer(phase);
        }
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}
