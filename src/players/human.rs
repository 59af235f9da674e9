//! Human player fed by lines of text input.

use super::Player;
use crate::games::tictactoe::{GameController, Position};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, warn};

/// Line source that several human players can share, one turn at a time.
pub type InputLines = Arc<Mutex<mpsc::UnboundedReceiver<String>>>;

/// Human player reading moves from a channel of input lines.
///
/// Lines are parsed with [`Position::parse_input`]; unparseable lines are
/// skipped. `q` or `quit` ends the game.
pub struct HumanPlayer {
    name: String,
    input: InputLines,
}

impl HumanPlayer {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, input: InputLines) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }

    /// Creates a line channel whose receiving end can be handed to players.
    pub fn input_channel() -> (mpsc::UnboundedSender<String>, InputLines) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Arc::new(Mutex::new(rx)))
    }
}

#[async_trait::async_trait]
impl Player for HumanPlayer {
    async fn get_move(&mut self, _game: &GameController) -> Result<Position> {
        let mut input = self.input.lock().await;
        while let Some(line) = input.recv().await {
            let line = line.trim();
            if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
                info!(player = %self.name, "Player quit");
                anyhow::bail!("{} quit the game", self.name);
            }
            match Position::parse_input(line) {
                Some(pos) => {
                    debug!(player = %self.name, position = %pos, "Parsed move");
                    return Ok(pos);
                }
                None => warn!(player = %self.name, input = %line, "Unrecognized position"),
            }
        }

        anyhow::bail!("Input channel closed")
    }

    fn name(&self) -> &str {
        &self.name
    }
}
