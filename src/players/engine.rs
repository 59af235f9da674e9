//! Optimal computer player backed by the search engine.

use super::Player;
use crate::engine::EngineWorker;
use crate::games::tictactoe::{GameController, Position};
use anyhow::Result;
use tracing::{debug, instrument};

/// Computer player that searches on the blocking pool.
pub struct EnginePlayer {
    name: String,
    worker: EngineWorker,
}

impl EnginePlayer {
    /// Creates a new engine player.
    pub fn new(name: impl Into<String>, worker: EngineWorker) -> Self {
        Self {
            name: name.into(),
            worker,
        }
    }
}

#[async_trait::async_trait]
impl Player for EnginePlayer {
    #[instrument(skip_all, fields(player = %self.name))]
    async fn get_move(&mut self, game: &GameController) -> Result<Position> {
        let request = game.engine_request();
        let reply = self
            .worker
            .search(request)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Search was cancelled"))?;

        let outcome = reply.outcome;
        debug!(
            position = %outcome.position(),
            score = outcome.score(),
            nodes = outcome.stats().nodes,
            "Engine picked a move"
        );
        Ok(*outcome.position())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_computer(&self) -> bool {
        true
    }
}
