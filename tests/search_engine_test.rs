//! Tests for the minimax search engine.

use std::collections::HashSet;
use strictly_noughts::{Board, GameController, Mark, Phase, Position, SearchEngine, WIN_SCORE};

fn board(notation: &str) -> Board {
    notation.parse().expect("valid board")
}

fn engines() -> [SearchEngine; 2] {
    [SearchEngine::exhaustive(), SearchEngine::new(true)]
}

#[test]
fn test_takes_immediate_win() {
    let board = board("XX./OO./...");
    for engine in engines() {
        assert_eq!(engine.choose_move(&board, Mark::First), Position::TopRight);
    }
}

#[test]
fn test_blocks_opponent_row() {
    // O threatens the middle row; X has no line of its own to finish.
    let board = board("..X/OO./X..");
    for engine in engines() {
        assert_eq!(engine.choose_move(&board, Mark::First), Position::MiddleRight);
    }
}

#[test]
fn test_prefers_win_over_block() {
    // Both sides threaten; winning now beats blocking.
    let board = board("XX./OO./...");
    let outcome = SearchEngine::exhaustive().analyze(&board, Mark::First);
    assert_eq!(*outcome.score(), WIN_SCORE - 1);
}

#[test]
fn test_search_leaves_board_untouched() {
    let board = board("X../.O./...");
    let before = board;
    SearchEngine::exhaustive().choose_move(&board, Mark::First);
    assert_eq!(board, before);
}

#[test]
fn test_self_play_draws() {
    for engine in engines() {
        let mut game = GameController::with_engine(engine);
        while game.phase() == Phase::InProgress {
            game.request_engine_move();
        }
        assert_eq!(game.phase(), Phase::Drawn);
        assert_eq!(game.history().len(), 9);
    }
}

#[test]
fn test_self_play_draws_after_any_opening() {
    for opening in Position::ALL {
        let mut game = GameController::new();
        game.submit_move(opening).unwrap();
        while game.phase() == Phase::InProgress {
            game.request_engine_move();
        }
        assert_eq!(game.phase(), Phase::Drawn, "opening {opening}");
    }
}

/// Plays `engine_mark` with the engine against every possible opponent reply.
fn assert_never_loses(board: Board, engine: SearchEngine, engine_mark: Mark) {
    match board.evaluate() {
        Phase::InProgress => {}
        Phase::Won(winner) => {
            assert_eq!(winner, engine_mark, "engine lost on {board}");
            return;
        }
        Phase::Drawn => return,
    }

    let mark = board.to_move();
    if mark == engine_mark {
        let pos = engine.choose_move(&board, mark);
        let (next, _) = board.with_move(pos, mark).unwrap();
        assert_never_loses(next, engine, engine_mark);
    } else {
        for pos in board.legal_moves() {
            let (next, _) = board.with_move(pos, mark).unwrap();
            assert_never_loses(next, engine, engine_mark);
        }
    }
}

#[test]
fn test_engine_never_loses_as_first() {
    assert_never_loses(Board::new(), SearchEngine::default(), Mark::First);
}

#[test]
fn test_engine_never_loses_as_second() {
    assert_never_loses(Board::new(), SearchEngine::default(), Mark::Second);
}

/// Collects every distinct reachable in-progress board.
fn live_boards(board: Board, seen: &mut HashSet<Board>) {
    if board.evaluate() != Phase::InProgress || !seen.insert(board) {
        return;
    }
    let mark = board.to_move();
    for pos in board.legal_moves() {
        let (next, _) = board.with_move(pos, mark).unwrap();
        live_boards(next, seen);
    }
}

#[test]
fn test_pruning_never_changes_the_chosen_move() {
    let mut seen = HashSet::new();
    live_boards(Board::new(), &mut seen);
    // The empty board is covered by the opening and unit tests.
    let boards: Vec<Board> = seen.into_iter().filter(|b| b.occupied_count() >= 1).collect();
    assert_eq!(boards.iter().filter(|b| b.occupied_count() == 1).count(), 9);

    let plain = SearchEngine::exhaustive();
    let pruned = SearchEngine::new(true);
    for board in boards {
        let mark = board.to_move();
        let a = plain.analyze(&board, mark);
        let b = pruned.analyze(&board, mark);
        assert_eq!(a.position(), b.position(), "board {board}");
        assert_eq!(a.score(), b.score(), "board {board}");
    }
}

#[test]
fn test_ties_break_toward_row_major_order() {
    for engine in engines() {
        let board = board("X../.../...");
        let best = engine.analyze(&board, Mark::Second);
        let scores = engine.score_moves(&board, Mark::Second);
        let first_best = scores
            .iter()
            .find(|(_, score)| score == best.score())
            .map(|(pos, _)| *pos);
        assert_eq!(Some(*best.position()), first_best);
    }
}
