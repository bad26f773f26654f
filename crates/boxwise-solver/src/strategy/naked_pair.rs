use boxwise_core::{CandidateGrid, House, Position};

use super::{BoxScope, BoxedStrategy, StepEffects, Strategy};
use crate::SolveError;

const NAME: &str = "naked pair";

/// Eliminates candidates locked into two cells with identical candidate sets.
///
/// When an undecided cell of the box carries at most two candidates and some
/// other cell of the same line or box has the exact same candidate set,
/// those digits are spoken for and disappear from the rest of the region.
/// The degenerate single-candidate match just duplicates what naked singles
/// would do and is left in for the same reason the source keeps it: the
/// set comparison is the whole test.
#[derive(Debug, Default, Clone, Copy)]
pub struct NakedPair;

impl NakedPair {
    /// Creates a new `NakedPair` strategy.
    #[must_use]
    pub const fn new() -> Self {
        NakedPair
    }

    fn eliminate_from_region(
        grid: &CandidateGrid,
        scope: BoxScope,
        region: House,
        pos: Position,
        effects: &mut StepEffects,
    ) -> Result<(), SolveError> {
        let candidates = grid.candidates_at(pos);
        let partner = region.positions().into_iter().find(|other| {
            *other != pos && !grid.is_decided(*other) && grid.candidates_at(*other) == candidates
        });
        let Some(partner) = partner else {
            return Ok(());
        };
        for other in region.positions() {
            if other == pos || other == partner {
                continue;
            }
            if grid.eliminate_set(other, candidates)? {
                effects.record_change(scope, other);
            }
        }
        Ok(())
    }
}

impl Strategy for NakedPair {
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
            if candidates.is_empty() || candidates.len() > 2 {
                continue;
            }
            for region in [scope.line_through(pos), scope.house()] {
                Self::eliminate_from_region(grid, scope, region, pos, &mut effects)?;
            }
        }
        Ok(effects)
    }
}
