//! Weak computer player: first empty cell.

use super::Player;
use crate::games::tictactoe::{GameController, Position};
use anyhow::Result;
use tracing::debug;

/// Computer player that picks the first legal cell in row-major order.
pub struct FirstFreePlayer {
    name: String,
}

impl FirstFreePlayer {
    /// Creates a new first-free player.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait::async_trait]
impl Player for FirstFreePlayer {
    async fn get_move(&mut self, game: &GameController) -> Result<Position> {
        let pos = game
            .board()
            .legal_moves()
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("No valid moves available"))?;
        debug!(player = %self.name, position = %pos, "Picked first free cell");
        Ok(pos)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_computer(&self) -> bool {
        true
    }
}
