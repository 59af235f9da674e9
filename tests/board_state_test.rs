//! Tests for board state: legality, phase classification and invariants.

use strictly_noughts::{
    Board, InvalidMove, Invariant, Mark, MarkBalanceInvariant, Phase, Position,
};

fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col).expect("in range")
}

/// Visits every board reachable from the empty board by legal play.
fn for_each_reachable(board: Board, visit: &mut impl FnMut(&Board)) {
    visit(&board);
    let mark = board.to_move();
    for p in board.legal_moves() {
        let (next, _) = board.with_move(p, mark).expect("legal move");
        for_each_reachable(next, visit);
    }
}

#[test]
fn test_opening_sequence_stays_in_progress() {
    let mut board = Board::new();
    assert_eq!(board.apply_move(pos(0, 0), Mark::First), Ok(Phase::InProgress));
    assert_eq!(board.apply_move(pos(1, 1), Mark::Second), Ok(Phase::InProgress));
    assert_eq!(board.apply_move(pos(0, 1), Mark::First), Ok(Phase::InProgress));
    assert_eq!(board.evaluate(), Phase::InProgress);
}

#[test]
fn test_completing_top_row_wins() {
    let mut board = Board::new();
    board.apply_move(pos(0, 0), Mark::First).unwrap();
    board.apply_move(pos(2, 0), Mark::Second).unwrap();
    board.apply_move(pos(0, 1), Mark::First).unwrap();
    board.apply_move(pos(2, 2), Mark::Second).unwrap();
    assert_eq!(board.apply_move(pos(0, 2), Mark::First), Ok(Phase::Won(Mark::First)));
}

#[test]
fn test_full_board_without_line_is_drawn() {
    let board: Board = "XOX/XOO/OXX".parse().unwrap();
    assert_eq!(board.evaluate(), Phase::Drawn);
    assert!(board.legal_moves().is_empty());
}

#[test]
fn test_out_of_range_position_rejected() {
    assert_eq!(Position::new(3, 3), Err(InvalidMove::OutOfBounds { row: 3, col: 3 }));
}

#[test]
fn test_mark_balance_holds_for_all_reachable_boards() {
    let mut count = 0usize;
    for_each_reachable(Board::new(), &mut |board| {
        assert!(MarkBalanceInvariant::holds(board), "unbalanced: {board}");
        let diff = board.count(Mark::First) - board.count(Mark::Second);
        assert!(diff <= 1);
        count += 1;
    });
    // Number of move sequences including the empty one.
    assert_eq!(count, 549_946);
}

#[test]
fn test_legal_moves_plus_occupied_is_nine_while_in_progress() {
    for_each_reachable(Board::new(), &mut |board| {
        let legal = board.legal_moves().len();
        if board.evaluate() == Phase::InProgress {
            assert_eq!(legal + board.occupied_count(), 9, "board {board}");
        } else {
            assert_eq!(legal, 0, "terminal board {board} offered moves");
        }
    });
}

#[test]
fn test_terminal_boards_reject_every_move() {
    for_each_reachable(Board::new(), &mut |board| {
        let phase = board.evaluate();
        if !phase.is_terminal() {
            return;
        }
        for p in Position::ALL {
            for mark in [Mark::First, Mark::Second] {
                let mut copy = *board;
                assert_eq!(copy.apply_move(p, mark), Err(InvalidMove::GameOver(phase)));
                assert_eq!(&copy, board);
            }
        }
    });
}

#[test]
fn test_evaluate_is_idempotent_everywhere() {
    for_each_reachable(Board::new(), &mut |board| {
        let phase = board.evaluate();
        assert_eq!(board.evaluate(), phase);
    });
}
