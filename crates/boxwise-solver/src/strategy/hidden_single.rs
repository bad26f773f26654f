use boxwise_core::{CandidateGrid, Digit, House, Position};

use super::{BoxScope, BoxedStrategy, StepEffects, Strategy};
use crate::SolveError;

const NAME: &str = "hidden single";

/// Places digits that have only one possible position in a line or box.
///
/// A cell may carry many candidates, but if one of them fits nowhere else in
/// the cell's row (or column, depending on the pass orientation) or box, it
/// must go here. Placements stay inside the scoped box; the scanned line
/// extends across the whole board.
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenSingle;

impl HiddenSingle {
    /// Creates a new `HiddenSingle` strategy.
    #[must_use]
    pub const fn new() -> Self {
        HiddenSingle
    }

    fn only_holder(grid: &CandidateGrid, house: House, pos: Position, digit: Digit) -> bool {
        house
            .positions()
            .into_iter()
            .all(|other| other == pos || !grid.candidates_at(other).contains(digit))
    }
}

impl Strategy for HiddenSingle {
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
            for digit in grid.candidates_at(pos) {
                let line = scope.line_through(pos);
                if Self::only_holder(grid, line, pos, digit)
                    || Self::only_holder(grid, scope.house(), pos, digit)
                {
                    grid.set_value(pos, digit)?;
                    effects.record_change(scope, pos);
                    break;
                }
            }
        }
        Ok(effects)
    }
}
