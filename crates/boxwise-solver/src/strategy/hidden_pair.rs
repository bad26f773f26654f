use boxwise_core::{CandidateGrid, Digit, DigitSet};
use tinyvec::ArrayVec;

use super::{BoxScope, BoxedStrategy, StepEffects, Strategy};
use crate::SolveError;

const NAME: &str = "hidden pair";

/// Strips excess candidates from two cells that monopolize a digit pair.
///
/// For a cell of the box holding candidates `c1` and `c2`: if exactly one
/// other cell of the scanned line (or of the box) holds either digit, the
/// two digits have nowhere else to go, so both cells shed every candidate
/// outside the pair. The partner cell may sit in a neighbouring box of the
/// line, in which case the elimination is reported as a foreign effect.
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenPair;

impl HiddenPair {
    /// Creates a new `HiddenPair` strategy.
    #[must_use]
    pub const fn new() -> Self {
        HiddenPair
    }
}

impl Strategy for HiddenPair {
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
            let digits: ArrayVec<[u8; 9]> =
                grid.candidates_at(pos).iter().map(Digit::value).collect();
            if digits.len() < 2 {
                continue;
            }
            for (i, &v1) in digits.iter().enumerate() {
                for &v2 in &digits[i + 1..] {
                    let pair =
                        DigitSet::from_iter([Digit::from_value(v1), Digit::from_value(v2)]);
                    // Earlier eliminations may have split the pair at this cell.
                    if grid.candidates_at(pos) & pair != pair {
                        continue;
                    }
                    for region in [scope.line_through(pos), scope.house()] {
                        let mut holders = 0;
                        let mut partner = None;
                        for other in region.positions() {
                            if other == pos {
                                continue;
                            }
                            if !(grid.candidates_at(other) & pair).is_empty() {
                                holders += 1;
                                partner.get_or_insert(other);
                            }
                        }
                        let Some(partner) = partner else { continue };
                        if holders != 1 {
                            continue;
                        }
                        if grid.eliminate_set(pos, !pair)? {
                            effects.record_change(scope, pos);
                        }
                        if grid.eliminate_set(partner, !pair)? {
                            effects.record_change(scope, partner);
                        }
                    }
                }
            }
        }
        Ok(effects)
    }
}
