//! The dirty-box scheduler.
//!
//! Deduction proceeds by sweeping the nine boxes and running the strategy
//! library over each one whose dirty flag is set. Any change re-dirties the
//! row band and column stack of the box holding the changed cell: a changed
//! cell can enable deductions in its own box (either orientation), in the
//! row-oriented passes of its band, and in the column-oriented passes of
//! its stack, and nowhere else. Foreign eliminations reported by a strategy
//! get the same treatment as in-box ones, so no deduction is ever stranded
//! behind a clean flag. The scheduler is quiescent once a full row pass and
//! column pass find no dirty box.

use crate::{
    SolveError,
    state::SolveState,
    strategy::{BoxScope, BoxedStrategy, Orientation},
};

/// Box indices in column-major order, used for the column-oriented pass.
const COL_MAJOR_BOXES: [u8; 9] = [0, 3, 6, 1, 4, 7, 2, 5, 8];

/// Runs every strategy over one box in one orientation.
///
/// Returns whether any strategy changed the box itself. Dirty-flag fallout
/// (band/stack re-dirtying on change, foreign boxes from the reported
/// effects) is applied here so the strategies stay scheduling-free.
///
/// # Errors
///
/// Propagates the first strategy contradiction; the attempt is dead.
pub(crate) fn solve_step(
    state: &SolveState,
    strategies: &[BoxedStrategy],
    box_index: u8,
    orientation: Orientation,
) -> Result<bool, SolveError> {
    let scope = BoxScope::new(box_index, orientation);
    let mut changed = false;
    for strategy in strategies {
        let effects = strategy.apply(&state.grid, scope)?;
        for foreign in effects.foreign_boxes() {
            state.dirty.mark_row_band(foreign);
            state.dirty.mark_col_stack(foreign);
        }
        if effects.changed_in_box() {
            log::trace!("{} changed box {box_index} ({orientation:?})", strategy.name());
            changed = true;
        }
    }
    if changed {
        state.dirty.mark_row_band(box_index);
        state.dirty.mark_col_stack(box_index);
        state.note_step();
    }
    Ok(changed)
}

/// Sweeps dirty boxes until no deduction remains.
///
/// Alternates a row-major, row-oriented pass with a column-major,
/// column-oriented pass; the alternation picks up the cross-band effects of
/// the line-scoped strategies without running both orientations on every
/// box every iteration.
///
/// # Errors
///
/// Propagates the first contradiction found while deducing.
pub(crate) fn run_to_quiescence(
    state: &SolveState,
    strategies: &[BoxedStrategy],
) -> Result<(), SolveError> {
    loop {
        let mut processed = false;
        for box_index in 0..9 {
            if state.dirty.take(box_index, Orientation::Rows) {
                processed = true;
                solve_step(state, strategies, box_index, Orientation::Rows)?;
            }
        }
        for box_index in COL_MAJOR_BOXES {
            if state.dirty.take(box_index, Orientation::Cols) {
                processed = true;
                solve_step(state, strategies, box_index, Orientation::Cols)?;
            }
        }
        if !processed {
            return Ok(());
        }
    }
}
