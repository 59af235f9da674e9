//! Game configuration loaded from TOML.

use crate::engine::{EngineWorker, SearchEngine};
use crate::games::tictactoe::Mark;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Who sits at the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameMode {
    /// Two people share the keyboard.
    HumanVsHuman,
    /// One person against the engine.
    #[default]
    HumanVsComputer,
    /// The engine plays both sides.
    ComputerVsComputer,
}

/// How the computer picks its moves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Strategy {
    /// Full minimax search; never loses.
    #[default]
    Minimax,
    /// First empty cell; easy to beat.
    FirstFree,
}

/// Engine settings.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Enable alpha-beta pruning. Does not change the chosen move.
    #[serde(default = "default_pruning")]
    pruning: bool,

    /// Pause before each computer move, in milliseconds.
    #[serde(default)]
    think_delay_ms: u64,

    /// Move selection strategy.
    #[serde(default)]
    strategy: Strategy,
}

fn default_pruning() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pruning: default_pruning(),
            think_delay_ms: 0,
            strategy: Strategy::default(),
        }
    }
}

impl EngineConfig {
    /// Builds the search engine described by this config.
    pub fn search_engine(&self) -> SearchEngine {
        SearchEngine::new(self.pruning)
    }

    /// Builds a worker with the configured think delay.
    pub fn worker(&self) -> EngineWorker {
        EngineWorker::new(self.search_engine())
            .with_think_delay(Duration::from_millis(self.think_delay_ms))
    }
}

/// Top-level game configuration.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Who plays.
    #[serde(default)]
    mode: GameMode,

    /// Mark the computer plays in human-vs-computer mode.
    #[serde(default = "default_computer_mark")]
    computer_mark: Mark,

    /// Engine settings.
    #[serde(default)]
    engine: EngineConfig,
}

fn default_computer_mark() -> Mark {
    Mark::Second
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            computer_mark: default_computer_mark(),
            engine: EngineConfig::default(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(mode = %config.mode, computer = %config.computer_mark, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Overrides the game mode.
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Overrides the computer's mark.
    pub fn with_computer_mark(mut self, mark: Mark) -> Self {
        self.computer_mark = mark;
        self
    }

    /// Overrides the strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.engine.strategy = strategy;
        self
    }

    /// Overrides alpha-beta pruning.
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.engine.pruning = pruning;
        self
    }

    /// Overrides the think delay.
    pub fn with_think_delay_ms(mut self, think_delay_ms: u64) -> Self {
        self.engine.think_delay_ms = think_delay_ms;
        self
    }

    /// Returns true if `mark` is played by the computer under this config.
    pub fn is_computer(&self, mark: Mark) -> bool {
        match self.mode {
            GameMode::HumanVsHuman => false,
            GameMode::HumanVsComputer => mark == self.computer_mark,
            GameMode::ComputerVsComputer => true,
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
