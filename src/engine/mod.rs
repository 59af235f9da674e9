//! Optimal-move search for the computer player.
//!
//! - [`SearchEngine`]: exhaustive minimax with depth-adjusted scoring
//! - [`CancelToken`]: cooperative cancellation shared with a running search
//! - [`EngineWorker`]: runs a search on the blocking pool

mod cancel;
mod minimax;
mod worker;

pub use cancel::CancelToken;
pub use minimax::{LOSS_SCORE, SearchEngine, SearchOutcome, SearchStats, WIN_SCORE};
pub use worker::{EngineReply, EngineRequest, EngineWorker};
