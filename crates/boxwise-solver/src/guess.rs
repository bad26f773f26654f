//! Recursive guess-and-check over deep-copied states.

use boxwise_core::{Digit, DigitSet, Position};
use rayon::prelude::*;

use crate::{SolveError, state::SolveState};

/// Picks the cell to branch on: fewest candidates, ties broken in row-major
/// order. Returns `None` when every cell is decided.
pub(crate) fn branch_cell(state: &SolveState) -> Option<(Position, DigitSet)> {
    let mut best: Option<(Position, DigitSet)> = None;
    for pos in state.grid.undecided() {
        let candidates = state.grid.candidates_at(pos);
        if best
            .as_ref()
            .is_none_or(|(_, held)| candidates.len() < held.len())
        {
            best = Some((pos, candidates));
        }
    }
    best
}

/// Tries each candidate of the branch cell in ascending order on a deep copy
/// of the state, recursing through `recurse` (the full mode-specific solve).
///
/// With `fork` set, branches run as separate tasks on the rayon pool;
/// `find_map_first` keeps the result deterministic by preferring the
/// lowest-digit success, matching the sequential loop.
///
/// # Errors
///
/// Returns [`SolveError::ExhaustedGuesses`] if every branch fails.
pub(crate) fn branch<F>(
    state: &SolveState,
    pos: Position,
    candidates: DigitSet,
    fork: bool,
    recurse: F,
) -> Result<SolveState, SolveError>
where
    F: Fn(SolveState) -> Result<SolveState, SolveError> + Sync,
{
    let attempt = |digit: Digit| -> Option<SolveState> {
        log::debug!(
            "guessing {digit} at {pos} ({} candidates)",
            candidates.len()
        );
        let child = state.child();
        child.note_guess();
        if child.grid.set_value(pos, digit).is_err() {
            return None;
        }
        recurse(child).ok()
    };

    let solved = if fork {
        let digits: Vec<Digit> = candidates.iter().collect();
        digits.into_par_iter().find_map_first(attempt)
    } else {
        candidates.iter().find_map(attempt)
    };
    solved.ok_or(SolveError::ExhaustedGuesses)
}
