//! Strictly Noughts - terminal front end.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use strictly_noughts::{
    Board, EnginePlayer, FirstFreePlayer, GameConfig, GameController, GameEvent, GameMode,
    HumanPlayer, InputLines, Mark, Orchestrator, Phase, Player, SearchEngine, Strategy,
};
use tokio::sync::mpsc;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so the board on stdout stays readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Play {
            config,
            mode,
            computer,
            strategy,
            no_pruning,
            think_delay_ms,
            rounds,
        } => {
            let mut config = load_config(config)?;
            if let Some(mode) = mode {
                config = config.with_mode(mode);
            }
            if let Some(side) = computer {
                config = config.with_computer_mark(side.into());
            }
            if let Some(strategy) = strategy {
                config = config.with_strategy(strategy);
            }
            if no_pruning {
                config = config.with_pruning(false);
            }
            if let Some(ms) = think_delay_ms {
                config = config.with_think_delay_ms(ms);
            }
            run_play(config, rounds).await
        }
        Command::Solve {
            board,
            no_pruning,
            json,
        } => run_solve(&board, SearchEngine::new(!no_pruning), json),
        Command::Selfplay { no_pruning } => run_selfplay(SearchEngine::new(!no_pruning)),
    }
}

/// Reads the config file if one was given, otherwise uses defaults.
fn load_config(path: Option<PathBuf>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}

/// Builds the player for one side of the board.
fn make_player(config: &GameConfig, mark: Mark, input: &InputLines) -> Box<dyn Player> {
    if !config.is_computer(mark) {
        let name = match config.mode() {
            GameMode::HumanVsHuman => format!("Player {}", mark),
            _ => "You".to_string(),
        };
        return Box::new(HumanPlayer::new(name, input.clone()));
    }

    let name = match config.mode() {
        GameMode::ComputerVsComputer => format!("Computer {}", mark),
        _ => "Computer".to_string(),
    };
    match config.engine().strategy() {
        Strategy::Minimax => Box::new(EnginePlayer::new(name, config.engine().worker())),
        Strategy::FirstFree => Box::new(FirstFreePlayer::new(name)),
    }
}

/// Run an interactive game in the terminal
#[instrument(skip(config), fields(mode = %config.mode()))]
async fn run_play(config: GameConfig, rounds: usize) -> Result<()> {
    let (input_tx, input) = HumanPlayer::input_channel();

    // Blocking stdin on a plain thread; it dies with the process.
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if input_tx.send(line).is_err() {
                break;
            }
        }
    });

    let player_first = make_player(&config, Mark::First, &input);
    let player_second = make_player(&config, Mark::Second, &input);
    let game = GameController::with_engine(config.engine().search_engine());

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(game, player_first, player_second, event_tx);
    let handle = tokio::spawn(async move { orchestrator.run_rounds(rounds).await });

    println!("Enter moves as 1-9, row,col (0-2) or a name like \"center\"; q quits.");
    while let Some(event) = event_rx.recv().await {
        render_event(&event);
    }

    let results = handle.await.context("Game task panicked")??;
    if rounds > 1 {
        let first = results.iter().filter(|p| **p == Phase::Won(Mark::First)).count();
        let second = results.iter().filter(|p| **p == Phase::Won(Mark::Second)).count();
        let drawn = results.len() - first - second;
        println!("\nX wins: {first}  O wins: {second}  Draws: {drawn}");
    }
    info!(games = results.len(), "Session finished");
    Ok(())
}

fn render_event(event: &GameEvent) {
    match event {
        GameEvent::GameStarted {
            first,
            second,
            board,
        } => {
            println!("\nX: {first}   O: {second}\n");
            println!("{}\n", board.display());
            prompt(board);
        }
        GameEvent::Thinking { player } => println!("{player} is thinking..."),
        GameEvent::MoveMade { player, mv, board } => {
            println!("\n{player} played {} at {}\n", mv.mark(), mv.position().label());
            println!("{}\n", board.display());
            prompt(board);
        }
        GameEvent::MoveRejected { error, .. } => println!("{error}. Try again."),
        GameEvent::GameOver { phase, winner } => match winner {
            Some(name) => println!("{name} wins! ({phase})"),
            None => println!("It's a draw!"),
        },
    }
}

fn prompt(board: &Board) {
    if board.evaluate() == Phase::InProgress {
        println!("{} to move:", board.to_move());
    }
}

/// Print the optimal move for a position
#[instrument(skip(engine))]
fn run_solve(notation: &str, engine: SearchEngine, json: bool) -> Result<()> {
    let board: Board = notation
        .parse()
        .with_context(|| format!("Invalid board {notation:?}"))?;

    let phase = board.evaluate();
    if phase.is_terminal() {
        println!("{}\n\n{phase}", board.display());
        return Ok(());
    }

    let mark = board.to_move();
    let outcome = engine.analyze(&board, mark);
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!("{}\n", board.display());
    for (pos, score) in engine.score_moves(&board, mark) {
        println!("  {:<14} {:>3}", pos.label(), score);
    }
    println!(
        "\nBest move for {mark}: {} {} (score {}, {} nodes)",
        outcome.position().label(),
        outcome.position(),
        outcome.score(),
        outcome.stats().nodes
    );
    Ok(())
}

/// Let the engine play both sides
#[instrument(skip(engine))]
fn run_selfplay(engine: SearchEngine) -> Result<()> {
    let mut game = GameController::with_engine(engine);
    while game.phase() == Phase::InProgress {
        let mark = game.current_mark();
        game.request_engine_move();
        if let Some(mv) = game.history().last() {
            println!("{mark} plays {}", mv.position().label());
        }
        println!("{}\n", game.board().display());
    }
    println!("{}", game.phase());
    Ok(())
}
