//! Game orchestration between players.

use crate::games::tictactoe::{Board, GameController, InvalidMove, Mark, Move, Phase};
use crate::players::Player;
use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A new game began.
    GameStarted {
        /// Name of the player holding X.
        first: String,
        /// Name of the player holding O.
        second: String,
        /// Empty board.
        board: Board,
    },
    /// A computer player is searching.
    Thinking {
        /// The computer player's name.
        player: String,
    },
    /// A move was applied.
    MoveMade {
        /// Who moved.
        player: String,
        /// The applied move.
        mv: Move,
        /// Board after the move.
        board: Board,
    },
    /// A submitted move was refused; the same player moves again.
    MoveRejected {
        /// Who tried to move.
        player: String,
        /// Why it was refused.
        error: InvalidMove,
    },
    /// Game ended.
    GameOver {
        /// Terminal phase.
        phase: Phase,
        /// Winner's name, `None` for a draw.
        winner: Option<String>,
    },
}

/// Orchestrates gameplay between two players.
pub struct Orchestrator {
    game: GameController,
    player_first: Box<dyn Player>,
    player_second: Box<dyn Player>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Orchestrator {
    /// Creates a new orchestrator around `game`.
    pub fn new(
        game: GameController,
        player_first: Box<dyn Player>,
        player_second: Box<dyn Player>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            game,
            player_first,
            player_second,
            event_tx,
        }
    }

    /// The game being played.
    pub fn game(&self) -> &GameController {
        &self.game
    }

    /// Plays the current game to the end and returns its terminal phase.
    ///
    /// # Errors
    ///
    /// Fails if a player gives up (closed input, quit), a computer player
    /// proposes an illegal move, or the event receiver is gone.
    #[instrument(skip(self), fields(first = %self.player_first.name(), second = %self.player_second.name()))]
    pub async fn run(&mut self) -> Result<Phase> {
        info!("Starting game orchestration");
        self.event_tx.send(GameEvent::GameStarted {
            first: self.player_first.name().to_string(),
            second: self.player_second.name().to_string(),
            board: *self.game.board(),
        })?;

        loop {
            let phase = self.game.phase();
            if phase.is_terminal() {
                let winner = phase.winner().map(|mark| match mark {
                    Mark::First => self.player_first.name().to_string(),
                    Mark::Second => self.player_second.name().to_string(),
                });
                info!(%phase, winner = ?winner, "Game finished");
                self.event_tx.send(GameEvent::GameOver { phase, winner })?;
                return Ok(phase);
            }

            let player = match self.game.current_mark() {
                Mark::First => &mut self.player_first,
                Mark::Second => &mut self.player_second,
            };
            let name = player.name().to_string();

            if player.is_computer() {
                self.event_tx.send(GameEvent::Thinking {
                    player: name.clone(),
                })?;
            }

            debug!(player = %name, "Waiting for move");
            let generation = self.game.generation();
            let position = player.get_move(&self.game).await?;

            match self.game.submit_move_for(generation, position) {
                Ok(Some(_)) => {
                    let mv = self
                        .game
                        .history()
                        .last()
                        .copied()
                        .ok_or_else(|| anyhow::anyhow!("Accepted move missing from history"))?;
                    self.event_tx.send(GameEvent::MoveMade {
                        player: name,
                        mv,
                        board: *self.game.board(),
                    })?;
                }
                Ok(None) => debug!("Move belonged to a replaced game"),
                Err(error) if !player.is_computer() => {
                    warn!(player = %name, %error, "Move rejected, asking again");
                    self.event_tx
                        .send(GameEvent::MoveRejected { player: name, error })?;
                }
                Err(error) => {
                    anyhow::bail!("Computer player {} made an illegal move: {}", name, error)
                }
            }
        }
    }

    /// Plays `rounds` games back to back, starting a new game before each.
    ///
    /// # Errors
    ///
    /// Stops at the first failing game.
    pub async fn run_rounds(&mut self, rounds: usize) -> Result<Vec<Phase>> {
        let mut results = Vec::with_capacity(rounds);
        for round in 0..rounds {
            if round > 0 || !self.game.history().is_empty() {
                self.restart();
            }
            results.push(self.run().await?);
        }
        Ok(results)
    }

    /// Restarts the game.
    pub fn restart(&mut self) {
        self.game.new_game();
    }
}
