//! Invariants of the board and the controller.
//!
//! Two properties must survive every accepted move: X leads O by zero or one
//! mark ([`MarkBalanceInvariant`]), and replaying the controller's history
//! onto an empty board gives the live board ([`HistoryConsistentInvariant`]).
//! Both are `debug_assert!`ed after each move and tested directly.

pub mod history_consistent;
pub mod mark_balance;

pub use history_consistent::HistoryConsistentInvariant;
pub use mark_balance::MarkBalanceInvariant;

/// A property of `S` (a [`Board`](super::Board) or a
/// [`GameController`](super::GameController)) that no move may break.
pub trait Invariant<S> {
    /// True while `state` satisfies the property.
    fn holds(state: &S) -> bool;

    /// Statement of the property, used in assertion messages.
    fn description() -> &'static str;
}

/// A broken invariant, reported by [`InvariantSet::check_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Statement of the property that failed.
    pub description: String,
}

impl InvariantViolation {
    /// Wraps the statement of a failed property.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Several invariants of the same state, checked in one pass.
pub trait InvariantSet<S> {
    /// Collects every failed property, in declaration order.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, A, B> InvariantSet<S> for (A, B)
where
    A: Invariant<S>,
    B: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<InvariantViolation> = [
            (A::holds(state), A::description()),
            (B::holds(state), B::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Everything checked after a controller move.
pub type ControllerInvariants = (MarkBalanceInvariant, HistoryConsistentInvariant);
