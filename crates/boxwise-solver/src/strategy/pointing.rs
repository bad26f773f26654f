use boxwise_core::{CandidateGrid, Digit, Position};
use tinyvec::ArrayVec;

use super::{BoxScope, BoxedStrategy, Orientation, StepEffects, Strategy};
use crate::SolveError;

const NAME: &str = "pointing";

/// Points a digit out of the box along its confined line.
///
/// If every cell of the box that still allows a digit sits on one row (or
/// one column, in a column-oriented pass), the digit is pinned to that line
/// segment and disappears from the line outside the box. All of this
/// strategy's eliminations land in foreign boxes, which the scheduler then
/// re-dirties from the reported effects.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pointing;

impl Pointing {
    /// Creates a new `Pointing` strategy.
    #[must_use]
    pub const fn new() -> Self {
        Pointing
    }

    fn line_coordinate(orientation: Orientation, pos: Position) -> u8 {
        match orientation {
            Orientation::Rows => pos.y(),
            Orientation::Cols => pos.x(),
        }
    }
}

impl Strategy for Pointing {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedStrategy {
        Box::new(*self)
    }

    fn apply(&self, grid: &CandidateGrid, scope: BoxScope) -> Result<StepEffects, SolveError> {
        let mut effects = StepEffects::none();
        for digit in Digit::ALL {
            let coordinates: ArrayVec<[u8; 9]> = scope
                .cells()
                .into_iter()
                .filter(|pos| grid.candidates_at(*pos).contains(digit))
                .map(|pos| Self::line_coordinate(scope.orientation(), pos))
                .collect();
            let Some((&first, rest)) = coordinates.split_first() else {
                continue;
            };
            if rest.iter().any(|&coordinate| coordinate != first) {
                continue;
            }

            let line = match scope.orientation() {
                Orientation::Rows => boxwise_core::House::Row { y: first },
                Orientation::Cols => boxwise_core::House::Column { x: first },
            };
            for pos in line.positions() {
                if scope.contains(pos) {
                    continue;
                }
                if grid.eliminate(pos, digit)? {
                    effects.record_change(scope, pos);
                }
            }
        }
        Ok(effects)
    }
}
