use boxwise_core::{CandidateGrid, Digit};

use super::{BoxScope, BoxedStrategy, StepEffects, Strategy};
use crate::SolveError;

const NAME: &str = "box-line";

/// Claims a digit for one line segment of the box.
///
/// For each of the three lines crossing the box: if every position of the
/// whole line that still allows a digit lies inside this box, the digit must
/// land on that segment, so it is removed from the other two lines of the
/// box. A line with no position at all for some digit is contradictory and
/// aborts the attempt.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoxLine;

impl BoxLine {
    /// Creates a new `BoxLine` strategy.
    #[must_use]
    pub const fn new() -> Self {
        BoxLine
    }
}

impl Strategy for BoxLine {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedStrategy {
        Box::new(*self)
    }

    fn apply(&self, grid: &CandidateGrid, scope: BoxScope) -> Result<StepEffects, SolveError> {
        let mut effects = StepEffects::none();
        for line in scope.lines() {
            for digit in Digit::ALL {
                let mut any_in_line = false;
                let mut confined_to_box = true;
                for pos in line.positions() {
                    if grid.candidates_at(pos).contains(digit) {
                        any_in_line = true;
                        if !scope.contains(pos) {
                            confined_to_box = false;
                        }
                    }
                }
                if !any_in_line {
                    return Err(SolveError::MissingDigit { digit, house: line });
                }
                if !confined_to_box {
                    continue;
                }
                for pos in scope.cells() {
                    if line.contains(pos) {
                        continue;
                    }
                    if grid.eliminate(pos, digit)? {
                        effects.record_change(scope, pos);
                    }
                }
            }
        }
        Ok(effects)
    }
}
