use boxwise_core::{CandidateGrid, ConsistencyError};

use super::{BoxScope, BoxedStrategy, StepEffects, Strategy};
use crate::SolveError;

const NAME: &str = "naked single";

/// Places digits in cells that have exactly one remaining candidate.
///
/// This is the workhorse rule: every placement funnels through
/// [`CandidateGrid::set_value`], which performs the row/column/box candidate
/// eliminations the rest of the strategy library relies on. A cell with no
/// remaining candidates is reported as a contradiction here, which is how
/// dead guess branches are detected.
#[derive(Debug, Default, Clone, Copy)]
pub struct NakedSingle;

impl NakedSingle {
    /// Creates a new `NakedSingle` strategy.
    #[must_use]
    pub const fn new() -> Self {
        NakedSingle
    }
}

impl Strategy for NakedSingle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedStrategy {
        Box::new(*self)
    }

    fn apply(&self, grid: &CandidateGrid, scope: BoxScope) -> Result<StepEffects, SolveError> {
        let mut effects = StepEffects::none();
        for pos in scope.cells() {
            if grid.is_decided(pos) {
                continue;
            }
            let candidates = grid.candidates_at(pos);
            if candidates.is_empty() {
                return Err(ConsistencyError::EmptyCell(pos).into());
            }
            if let Some(digit) = candidates.single() {
                grid.set_value(pos, digit)?;
                effects.record_change(scope, pos);
            }
        }
        Ok(effects)
    }
}
