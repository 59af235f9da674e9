//! Off-thread search.
//!
//! The worker owns nothing of the live game: it receives a copied board in an
//! [`EngineRequest`] and hands back an [`EngineReply`] stamped with the game
//! generation the request was made for. The controller drops replies for an
//! older generation.

use super::{CancelToken, SearchEngine, SearchOutcome};
use crate::games::tictactoe::{Board, Mark};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Everything a search needs, detached from the live game.
#[derive(Debug, Clone)]
pub struct EngineRequest {
    /// Copy of the live board.
    pub board: Board,
    /// Mark to search for.
    pub mark: Mark,
    /// Controller generation at the time of the request.
    pub generation: u64,
    /// Cancelled when the controller starts a new game.
    pub cancel: CancelToken,
}

/// A completed search for a given generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineReply {
    /// Generation copied from the request.
    pub generation: u64,
    /// The search result.
    pub outcome: SearchOutcome,
}

/// Runs searches on tokio's blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct EngineWorker {
    engine: SearchEngine,
    think_delay: Duration,
}

impl EngineWorker {
    /// Creates a worker around `engine`.
    pub fn new(engine: SearchEngine) -> Self {
        Self {
            engine,
            think_delay: Duration::ZERO,
        }
    }

    /// Pauses before each search so a human can follow the game.
    pub fn with_think_delay(mut self, think_delay: Duration) -> Self {
        self.think_delay = think_delay;
        self
    }

    /// Returns the wrapped engine.
    pub fn engine(&self) -> SearchEngine {
        self.engine
    }

    /// Searches the request's board without blocking the async runtime.
    ///
    /// Returns `Ok(None)` if the request was cancelled before or during the
    /// search.
    ///
    /// # Errors
    ///
    /// Fails if the blocking task panicked or was aborted.
    #[instrument(skip(self, request), fields(mark = %request.mark, generation = request.generation))]
    pub async fn search(&self, request: EngineRequest) -> Result<Option<EngineReply>> {
        if !self.think_delay.is_zero() {
            tokio::time::sleep(self.think_delay).await;
        }
        if request.cancel.is_cancelled() {
            info!("Request cancelled before search started");
            return Ok(None);
        }

        let engine = self.engine;
        let EngineRequest {
            board,
            mark,
            generation,
            cancel,
        } = request;
        let outcome = tokio::task::spawn_blocking(move || {
            engine.analyze_cancellable(&board, mark, &cancel)
        })
        .await
        .context("Search task failed")?;

        debug!(completed = outcome.is_some(), "Worker search finished");
        Ok(outcome.map(|outcome| EngineReply {
            generation,
            outcome,
        }))
    }
}
