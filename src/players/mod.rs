//! Player trait and implementations.

mod engine;
mod first_free;
mod human;

pub use engine::EnginePlayer;
pub use first_free::FirstFreePlayer;
pub use human::{HumanPlayer, InputLines};

use crate::games::tictactoe::{GameController, Position};
use anyhow::Result;

/// Anything that can pick a move for the mark to play.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Gets a move from this player.
    ///
    /// The position may still be rejected by the game; the orchestrator asks
    /// again in that case.
    async fn get_move(&mut self, game: &GameController) -> Result<Position>;

    /// Returns the player's display name.
    fn name(&self) -> &str;

    /// True for computer players, whose turns are announced as thinking.
    fn is_computer(&self) -> bool {
        false
    }
}
