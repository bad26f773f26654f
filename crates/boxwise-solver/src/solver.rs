//! Top-level solve orchestration.

use boxwise_core::{DigitGrid, DigitSet, Position};

use crate::{
    SolveError, coordinated, guess, parallel, scheduler,
    state::SolveState,
    strategy::{self, BoxedStrategy},
};

/// Execution mode of the deduction phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Single-threaded dirty-box sweeps.
    #[default]
    Sequential,
    /// Several workers sweep one shared state, coordinating through
    /// advisory per-box and per-line locks; guess branches fork onto the
    /// thread pool.
    Parallel,
    /// Rounds of statically partitioned workers, one `(box, orientation)`
    /// assignment each, joined at every round boundary.
    Coordinated,
}

impl Mode {
    fn forks_guesses(self) -> bool {
        matches!(self, Mode::Parallel)
    }
}

/// Counters describing how a solution was found.
///
/// Counted along the adopted solution path: guess branches that failed and
/// were discarded do not contribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Number of box passes in which some strategy changed the grid.
    pub strategy_steps: u64,
    /// Number of guesses taken, including the adopted branch itself.
    pub guesses: u64,
}

/// A completed grid together with its solve statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// The fully populated grid.
    pub grid: DigitGrid,
    /// How the solver got there.
    pub stats: SolveStats,
}

/// Report returned when a puzzle has no solution.
///
/// Carries the furthest partial state deduction reached and the remaining
/// candidates of the undecided cells, for diagnostics and display.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("sudoku cannot be solved: {reason}")]
pub struct Unsolvable {
    /// Why the solve failed.
    #[error(source)]
    pub reason: SolveError,
    /// The decided cells at the point of failure.
    #[error(not(source))]
    pub partial: DigitGrid,
    /// Remaining candidates of each undecided cell, in row-major order.
    #[error(not(source))]
    pub candidates: Vec<(Position, DigitSet)>,
}

/// The solve orchestrator: initialiser, deduction scheduler, and guess
/// driver wired together for one [`Mode`].
///
/// # Examples
///
/// ```
/// use boxwise_solver::{Mode, Solver};
///
/// let solver = Solver::new(Mode::Sequential);
/// let givens = "
///     53_ _7_ ___
///     6__ 195 ___
///     _98 ___ _6_
///     8__ _6_ __3
///     4__ 8_3 __1
///     7__ _2_ __6
///     _6_ ___ 28_
///     ___ 419 __5
///     ___ _8_ _79
/// "
/// .parse()?;
///
/// let solution = solver.solve(&givens).expect("solvable puzzle");
/// assert!(solution.grid.is_complete());
/// # Ok::<(), boxwise_core::GridParseError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    mode: Mode,
    strategies: Vec<BoxedStrategy>,
}

impl Solver {
    /// Creates a solver with the full strategy library.
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            strategies: strategy::all_strategies(),
        }
    }

    /// Creates a solver with a custom strategy list, applied in order.
    #[must_use]
    pub fn with_strategies(mode: Mode, strategies: Vec<BoxedStrategy>) -> Self {
        Self { mode, strategies }
    }

    /// Returns the solver's execution mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Solves a puzzle.
    ///
    /// # Errors
    ///
    /// Returns [`Unsolvable`] when the givens conflict, deduction reaches a
    /// contradiction, or every guess branch fails. The report carries the
    /// best partial state for display.
    pub fn solve(&self, givens: &DigitGrid) -> Result<Solution, Box<Unsolvable>> {
        let state = SolveState::new();
        if let Err(reason) = state.apply_givens(givens) {
            return Err(Box::new(Self::report(reason, &state)));
        }

        let diagnostic = state.child();
        match self.solve_state(state) {
            Ok(solved) => Ok(Solution {
                grid: solved.grid.to_digit_grid(),
                stats: SolveStats {
                    strategy_steps: solved.steps(),
                    guesses: solved.guesses(),
                },
            }),
            Err(reason) => {
                // Deduce as far as possible on an untouched copy so the
                // report shows what could still be inferred.
                let _ = scheduler::run_to_quiescence(&diagnostic, &self.strategies);
                Err(Box::new(Self::report(reason, &diagnostic)))
            }
        }
    }

    fn solve_state(&self, state: SolveState) -> Result<SolveState, SolveError> {
        match self.mode {
            Mode::Sequential => scheduler::run_to_quiescence(&state, &self.strategies)?,
            Mode::Parallel => parallel::run_to_quiescence(&state, &self.strategies)?,
            Mode::Coordinated => coordinated::run_to_quiescence(&state, &self.strategies)?,
        }

        match guess::branch_cell(&state) {
            None => {
                state.grid.check_consistency()?;
                Ok(state)
            }
            Some((pos, candidates)) => guess::branch(
                &state,
                pos,
                candidates,
                self.mode.forks_guesses(),
                |child| self.solve_state(child),
            ),
        }
    }

    fn report(reason: SolveError, state: &SolveState) -> Unsolvable {
        let candidates = state
            .grid
            .undecided()
            .map(|pos| (pos, state.grid.candidates_at(pos)))
            .collect();
        Unsolvable {
            reason,
            partial: state.grid.to_digit_grid(),
            candidates,
        }
    }
}
