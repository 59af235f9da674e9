//! Exhaustive minimax over copied boards.
//!
//! Leaves are scored from the searching mark's point of view:
//! `WIN_SCORE - depth` for a win, `LOSS_SCORE + depth` for a loss and `0` for
//! a draw, where `depth` counts plies from the root. Faster wins and slower
//! losses therefore score better. The root keeps the first move (row-major)
//! among equally scored moves.
//!
//! Alpha-beta pruning is optional and never changes the chosen move: the root
//! only replaces its best move on a strictly greater score, and a pruned
//! child can only report a value at or below the current best.

use super::CancelToken;
use crate::games::tictactoe::{Board, Mark, Phase, Position};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Score of a win one ply below the root is `WIN_SCORE - 1`.
pub const WIN_SCORE: i32 = 10;

/// Score of a loss one ply below the root is `LOSS_SCORE + 1`.
pub const LOSS_SCORE: i32 = -10;

/// Search statistics for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Interior (non-terminal) nodes expanded, root included.
    pub nodes: u64,
    /// Terminal positions scored.
    pub leaves: u64,
    /// Alpha-beta cutoffs taken.
    pub cutoffs: u64,
}

/// Result of a completed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// The chosen move.
    position: Position,
    /// Minimax value of the chosen move for the searching mark.
    score: i32,
    /// Work done by the search.
    stats: SearchStats,
}

/// Minimax search engine.
///
/// Stateless apart from configuration, so one engine can serve any number of
/// searches, on any thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchEngine {
    pruning: bool,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SearchEngine {
    /// Creates an engine, with or without alpha-beta pruning.
    pub fn new(pruning: bool) -> Self {
        Self { pruning }
    }

    /// Plain minimax, visiting every node.
    pub fn exhaustive() -> Self {
        Self::new(false)
    }

    /// Returns true if alpha-beta pruning is enabled.
    pub fn pruning(&self) -> bool {
        self.pruning
    }

    /// Returns the optimal move for `mark` on `board`.
    ///
    /// # Panics
    ///
    /// Panics if the board is not in progress or it is not `mark`'s turn.
    /// Callers must only search live positions.
    pub fn choose_move(&self, board: &Board, mark: Mark) -> Position {
        *self.analyze(board, mark).position()
    }

    /// Searches `board` for `mark` and reports the move, its score and stats.
    ///
    /// # Panics
    ///
    /// Same contract as [`choose_move`](Self::choose_move).
    #[instrument(skip(self, board), fields(board = %board, mark = %mark, pruning = self.pruning))]
    pub fn analyze(&self, board: &Board, mark: Mark) -> SearchOutcome {
        let mut search = Search::new(mark, self.pruning, None);
        let outcome = search.root(board);
        debug!(position = %outcome.position, score = outcome.score, nodes = outcome.stats.nodes, "Search complete");
        outcome
    }

    /// Like [`analyze`](Self::analyze), but gives up once `cancel` is set.
    ///
    /// Returns `None` for a cancelled search; partial results are never
    /// reported.
    #[instrument(skip(self, board, cancel), fields(board = %board, mark = %mark))]
    pub fn analyze_cancellable(
        &self,
        board: &Board,
        mark: Mark,
        cancel: &CancelToken,
    ) -> Option<SearchOutcome> {
        let mut search = Search::new(mark, self.pruning, Some(cancel));
        let outcome = search.root(board);
        if cancel.is_cancelled() {
            debug!("Search cancelled, discarding result");
            return None;
        }
        Some(outcome)
    }

    /// Exact minimax value of every legal move, in row-major order.
    ///
    /// Each move is searched with a full window, so the values are exact
    /// even with pruning enabled.
    ///
    /// # Panics
    ///
    /// Same contract as [`choose_move`](Self::choose_move).
    #[instrument(skip(self, board), fields(board = %board, mark = %mark))]
    pub fn score_moves(&self, board: &Board, mark: Mark) -> Vec<(Position, i32)> {
        check_precondition(board, mark);
        let mut search = Search::new(mark, self.pruning, None);
        board
            .legal_moves()
            .into_iter()
            .map(|pos| (pos, search.child(board, pos, mark, 1, i32::MIN, i32::MAX)))
            .collect()
    }
}

fn check_precondition(board: &Board, mark: Mark) {
    assert_eq!(
        board.evaluate(),
        Phase::InProgress,
        "search requires a board in progress: {board}"
    );
    assert_eq!(
        board.to_move(),
        mark,
        "search requested for {mark} but {} is to move on {board}",
        board.to_move()
    );
}

/// Terminal score from `root`'s point of view, `depth` plies below the root.
fn leaf_score(phase: Phase, root: Mark, depth: i32) -> i32 {
    match phase {
        Phase::Won(winner) if winner == root => WIN_SCORE - depth,
        Phase::Won(_) => LOSS_SCORE + depth,
        Phase::Drawn => 0,
        Phase::InProgress => unreachable!("leaf_score called on a live board"),
    }
}

/// State of a single search.
struct Search<'a> {
    root: Mark,
    pruning: bool,
    cancel: Option<&'a CancelToken>,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    fn new(root: Mark, pruning: bool, cancel: Option<&'a CancelToken>) -> Self {
        Self {
            root,
            pruning,
            cancel,
            stats: SearchStats::default(),
        }
    }

    fn is_stopped(&self) -> bool {
        self.cancel.is_some_and(CancelToken::is_cancelled)
    }

    fn root(&mut self, board: &Board) -> SearchOutcome {
        check_precondition(board, self.root);
        self.stats.nodes += 1;

        let mut best: Option<(Position, i32)> = None;
        let mut alpha = i32::MIN;
        for pos in board.legal_moves() {
            let score = self.child(board, pos, self.root, 1, alpha, i32::MAX);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((pos, score));
            }
            if self.pruning {
                alpha = alpha.max(score);
            }
            if self.is_stopped() {
                break;
            }
        }

        // A board in progress always has an empty cell.
        let Some((position, score)) = best else {
            unreachable!("no legal move on {board}");
        };
        SearchOutcome {
            position,
            score,
            stats: self.stats,
        }
    }

    /// Value of `mover` playing `pos` on `board`; the new board sits `depth`
    /// plies below the root.
    fn child(
        &mut self,
        board: &Board,
        pos: Position,
        mover: Mark,
        depth: i32,
        alpha: i32,
        beta: i32,
    ) -> i32 {
        let mut next = board.copy();
        next.place(pos, mover);
        match next.evaluate() {
            Phase::InProgress => self.node(&next, mover.opponent(), depth, alpha, beta),
            terminal => {
                self.stats.leaves += 1;
                leaf_score(terminal, self.root, depth)
            }
        }
    }

    /// Minimax value of a live board with `to_move` to play.
    ///
    /// Maximizes when the root mark moves, minimizes otherwise. With pruning,
    /// the result is exact inside `(alpha, beta)` and a bound outside it.
    fn node(&mut self, board: &Board, to_move: Mark, depth: i32, mut alpha: i32, mut beta: i32) -> i32 {
        self.stats.nodes += 1;
        let maximizing = to_move == self.root;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for pos in board.legal_moves() {
            if self.is_stopped() {
                // Value is discarded by the caller.
                return 0;
            }
            let score = self.child(board, pos, to_move, depth + 1, alpha, beta);
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if self.pruning && alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(notation: &str) -> Board {
        notation.parse().unwrap()
    }

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_takes_immediate_win() {
        let board = board("XX./OO./...");
        for engine in [SearchEngine::exhaustive(), SearchEngine::new(true)] {
            let outcome = engine.analyze(&board, Mark::First);
            assert_eq!(*outcome.position(), pos(0, 2));
            assert_eq!(*outcome.score(), WIN_SCORE - 1);
        }
    }

    #[test]
    fn test_blocks_forced_loss() {
        let board = board("..X/OO./X..");
        assert_eq!(SearchEngine::exhaustive().choose_move(&board, Mark::First), pos(1, 2));
        assert_eq!(SearchEngine::new(true).choose_move(&board, Mark::First), pos(1, 2));
    }

    #[test]
    fn test_second_player_wins_fast() {
        // O can win at (1,2) now; the slower wins elsewhere score lower.
        let board = board("XX./OO./X..");
        let outcome = SearchEngine::exhaustive().analyze(&board, Mark::Second);
        assert_eq!(*outcome.position(), pos(1, 2));
        assert_eq!(*outcome.score(), WIN_SCORE - 1);
    }

    #[test]
    fn test_empty_board_is_a_draw_and_ties_break_row_major() {
        let outcome = SearchEngine::exhaustive().analyze(&Board::new(), Mark::First);
        assert_eq!(*outcome.score(), 0);
        // Every opening draws under perfect play, so the first cell wins the tie.
        assert_eq!(*outcome.position(), pos(0, 0));
    }

    #[test]
    fn test_score_moves_is_exact_with_pruning() {
        let board = board("X../.O./...");
        let plain = SearchEngine::exhaustive().score_moves(&board, Mark::First);
        let pruned = SearchEngine::new(true).score_moves(&board, Mark::First);
        assert_eq!(plain, pruned);
        assert_eq!(plain.len(), 7);
    }

    #[test]
    fn test_score_depth_adjustment() {
        // X wins now at (0,2) for 9; any other move lets O win at once for -8.
        let board = board("XX./OO./X.O");
        let scores = SearchEngine::exhaustive().score_moves(&board, Mark::First);
        assert_eq!(scores.first(), Some(&(pos(0, 2), WIN_SCORE - 1)));
        assert!(scores.contains(&(pos(2, 1), LOSS_SCORE + 2)));
    }

    #[test]
    fn test_pruning_visits_fewer_nodes() {
        let plain = SearchEngine::exhaustive().analyze(&Board::new(), Mark::First);
        let pruned = SearchEngine::new(true).analyze(&Board::new(), Mark::First);
        assert_eq!(plain.position(), pruned.position());
        assert_eq!(plain.score(), pruned.score());
        assert!(pruned.stats().nodes < plain.stats().nodes);
        assert_eq!(plain.stats().cutoffs, 0);
    }

    #[test]
    fn test_cancelled_search_returns_none() {
        let token = CancelToken::new();
        token.cancel();
        let engine = SearchEngine::exhaustive();
        assert_eq!(engine.analyze_cancellable(&Board::new(), Mark::First, &token), None);
    }

    #[test]
    fn test_uncancelled_search_matches_analyze() {
        let token = CancelToken::new();
        let board = board("X../.../...");
        let engine = SearchEngine::default();
        assert_eq!(
            engine.analyze_cancellable(&board, Mark::Second, &token),
            Some(engine.analyze(&board, Mark::Second))
        );
    }

    #[test]
    #[should_panic(expected = "search requires a board in progress")]
    fn test_terminal_board_panics() {
        SearchEngine::default().choose_move(&board("XXX/OO./..."), Mark::Second);
    }

    #[test]
    #[should_panic(expected = "search requested for X")]
    fn test_wrong_mark_panics() {
        SearchEngine::default().choose_move(&board("X../.../..."), Mark::First);
    }
}
