//! Coordinated-parallel orchestration.
//!
//! Six workers per round, each pinned to one `(box, orientation)`
//! assignment: three row-role workers keep their box row and three
//! column-role workers keep their box column, while the remaining coordinate
//! rotates by one box every round. Three consecutive rounds therefore visit
//! every box in both orientations once. Workers join at the round barrier;
//! there are no locks, since cell updates are atomic and monotone and a
//! row-role and column-role worker only meet on the same box every third
//! round. Quiescence is declared after three change-free rounds in a row.

use rayon::prelude::*;

use crate::{
    SolveError, scheduler,
    state::SolveState,
    strategy::{BoxedStrategy, Orientation},
};

/// Change-free rounds required before quiescence; three rounds cover every
/// `(box, orientation)` pair exactly once.
const QUIET_ROUNDS: usize = 3;

#[expect(clippy::cast_possible_truncation)]
fn round_assignments(round: usize) -> [(u8, Orientation); 6] {
    let shift = (round % 3) as u8;
    std::array::from_fn(|worker| {
        let worker = worker as u8;
        if worker < 3 {
            let by = worker;
            let bx = (worker + shift) % 3;
            (by * 3 + bx, Orientation::Rows)
        } else {
            let bx = worker - 3;
            let by = (bx + shift) % 3;
            (by * 3 + bx, Orientation::Cols)
        }
    })
}

/// Runs rotating rounds of six pinned workers until three consecutive
/// rounds make no change.
///
/// # Errors
///
/// Propagates the first contradiction found by any worker; the remaining
/// workers of the round finish their step first, since the round joins
/// before outcomes are inspected.
pub(crate) fn run_to_quiescence(
    state: &SolveState,
    strategies: &[BoxedStrategy],
) -> Result<(), SolveError> {
    let mut quiet = 0;
    let mut round = 0usize;
    while quiet < QUIET_ROUNDS {
        let outcomes: Vec<Result<bool, SolveError>> = round_assignments(round)
            .into_par_iter()
            .map(|(box_index, orientation)| {
                if state.dirty.take(box_index, orientation) {
                    scheduler::solve_step(state, strategies, box_index, orientation)
                } else {
                    Ok(false)
                }
            })
            .collect();

        let mut changed = false;
        for outcome in outcomes {
            changed |= outcome?;
        }
        log::trace!("coordinated round {round}: changed={changed}");
        if changed {
            quiet = 0;
        } else {
            quiet += 1;
        }
        round += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use boxwise_core::DigitGrid;

    use super::*;
    use crate::strategy::all_strategies;

    #[test]
    fn test_assignments_cover_all_pairs_in_three_rounds() {
        let mut seen = std::collections::HashSet::new();
        for round in 0..3 {
            for (box_index, orientation) in round_assignments(round) {
                assert!(
                    seen.insert((box_index, orientation)),
                    "duplicate assignment for box {box_index} {orientation:?}"
                );
            }
        }
        assert_eq!(seen.len(), 18);
    }

    #[test]
    fn test_row_workers_keep_their_band() {
        for round in 0..6 {
            let assignments = round_assignments(round);
            for (worker, (box_index, orientation)) in assignments.iter().enumerate() {
                if *orientation == Orientation::Rows {
                    assert_eq!(usize::from(box_index / 3), worker);
                } else {
                    assert_eq!(usize::from(box_index % 3), worker - 3);
                }
            }
        }
    }

    #[test]
    fn test_coordinated_matches_sequential() {
        let puzzle = "
            53_ _7_ ___
            6__ 195 ___
            _98 ___ _6_
            8__ _6_ __3
            4__ 8_3 __1
            7__ _2_ __6
            _6_ ___ 28_
            ___ 419 __5
            ___ _8_ _79
        ";
        let strategies = all_strategies();

        let sequential = SolveState::new();
        sequential
            .apply_givens(&puzzle.parse::<DigitGrid>().unwrap())
            .unwrap();
        scheduler::run_to_quiescence(&sequential, &strategies).unwrap();

        let coordinated = SolveState::new();
        coordinated
            .apply_givens(&puzzle.parse::<DigitGrid>().unwrap())
            .unwrap();
        run_to_quiescence(&coordinated, &strategies).unwrap();

        assert_eq!(coordinated.grid, sequential.grid);
        assert!(coordinated.grid.is_solved());
    }

    #[test]
    fn test_quiescence_on_undeducible_grid() {
        // A blank board has nothing to deduce; the rounds must settle after
        // clearing the initial dirt.
        let strategies = all_strategies();
        let state = SolveState::new();
        state
            .apply_givens(&".".repeat(81).parse::<DigitGrid>().unwrap())
            .unwrap();
        run_to_quiescence(&state, &strategies).unwrap();
        assert!(!state.dirty.any());
        assert_eq!(state.grid.undecided().count(), 81);
    }
}
