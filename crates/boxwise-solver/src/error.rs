//! Solver error types.

use boxwise_core::{ConsistencyError, Digit, House, Position};

/// Errors that abort a solve attempt.
///
/// Strategies and the scheduler return these instead of panicking or using
/// unwinding as control flow; the guess driver treats any of them as "this
/// branch is dead" and moves on to the next candidate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum SolveError {
    /// The candidate state became contradictory (a cell emptied, a placement
    /// had no backing candidate, or an invariant check failed).
    #[display("contradiction: {_0}")]
    Contradiction(#[from] ConsistencyError),
    /// A row or column has no remaining position for a digit.
    #[display("digit {digit} has no remaining position in {house}")]
    MissingDigit {
        /// The digit that can no longer be placed.
        digit: Digit,
        /// The line with no position for it.
        house: House,
    },
    /// A given conflicts with an earlier given in the same row, column, or box.
    #[display("given {digit} at {pos} conflicts with another given")]
    GivensConflict {
        /// The cell of the rejected given.
        pos: Position,
        /// The rejected digit.
        digit: Digit,
    },
    /// Every candidate of every branch cell failed; the puzzle has no solution.
    #[display("every candidate guess was exhausted")]
    ExhaustedGuesses,
}

impl SolveError {
    /// Returns `true` for errors raised by the initial givens rather than by
    /// deduction or guessing.
    #[must_use]
    pub fn is_givens_conflict(&self) -> bool {
        matches!(self, Self::GivensConflict { .. })
    }
}
