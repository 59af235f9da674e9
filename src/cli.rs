//! Command-line interface for strictly_noughts.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use strictly_noughts::{GameMode, Mark, Strategy};

/// Strictly Noughts - noughts and crosses with a perfect computer opponent
#[derive(Parser, Debug)]
#[command(name = "strictly_noughts")]
#[command(about = "Noughts and crosses with a minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Path to a TOML game config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Who plays (overrides the config file)
        #[arg(long, value_enum)]
        mode: Option<GameMode>,

        /// Side the computer plays in human-vs-computer mode
        #[arg(long, value_enum)]
        computer: Option<Side>,

        /// Computer move selection
        #[arg(long, value_enum)]
        strategy: Option<Strategy>,

        /// Disable alpha-beta pruning
        #[arg(long)]
        no_pruning: bool,

        /// Pause before each computer move, in milliseconds
        #[arg(long)]
        think_delay_ms: Option<u64>,

        /// Number of games to play
        #[arg(long, default_value = "1")]
        rounds: usize,
    },

    /// Print the optimal move for a position
    Solve {
        /// Board in compact notation, e.g. "XX./OO./..."
        board: String,

        /// Disable alpha-beta pruning
        #[arg(long)]
        no_pruning: bool,

        /// Print the search outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Let the engine play itself from an empty board
    Selfplay {
        /// Disable alpha-beta pruning
        #[arg(long)]
        no_pruning: bool,
    },
}

/// A side of the board, as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Side {
    /// X, moves first
    First,
    /// O, moves second
    Second,
}

impl From<Side> for Mark {
    fn from(side: Side) -> Self {
        match side {
            Side::First => Mark::First,
            Side::Second => Mark::Second,
        }
    }
}
