//! Test utilities for strategy implementations.
//!
//! [`StrategyTester`] tracks a grid's initial and current candidate state so
//! tests can apply a strategy to chosen boxes and assert on the resulting
//! placements and eliminations with a fluent chain.

use std::str::FromStr as _;

use boxwise_core::{CandidateGrid, Digit, DigitGrid, DigitSet, Position};

use crate::strategy::{BoxScope, Orientation, StepEffects, Strategy};

/// A fluent test harness for box-scoped strategies.
///
/// All assertion methods return `self` for chaining and panic with a
/// descriptive message on failure, reporting the caller's location.
#[derive(Debug)]
pub(crate) struct StrategyTester {
    initial: CandidateGrid,
    current: CandidateGrid,
}

impl StrategyTester {
    /// Creates a tester from a prepared candidate grid.
    pub(crate) fn new(grid: CandidateGrid) -> Self {
        let current = grid.clone();
        Self {
            initial: grid,
            current,
        }
    }

    /// Creates a tester from a grid string, propagating every given.
    ///
    /// # Panics
    ///
    /// Panics if the string does not parse or the givens are contradictory.
    #[track_caller]
    pub(crate) fn from_str(s: &str) -> Self {
        let givens = DigitGrid::from_str(s).unwrap();
        let grid = CandidateGrid::new();
        for (pos, digit) in givens.givens() {
            grid.set_value(pos, digit).unwrap();
        }
        Self::new(grid)
    }

    /// Returns the current candidate grid.
    pub(crate) fn grid(&self) -> &CandidateGrid {
        &self.current
    }

    /// Applies the strategy to one box in one orientation.
    ///
    /// # Panics
    ///
    /// Panics if the strategy reports a contradiction.
    #[track_caller]
    pub(crate) fn apply<S>(self, strategy: &S, box_index: u8, orientation: Orientation) -> Self
    where
        S: Strategy,
    {
        let scope = BoxScope::new(box_index, orientation);
        strategy.apply(&self.current, scope).unwrap();
        self
    }

    /// Applies the strategy once to every box in both orientations.
    ///
    /// # Panics
    ///
    /// Panics if the strategy reports a contradiction.
    #[track_caller]
    pub(crate) fn apply_everywhere<S>(self, strategy: &S) -> Self
    where
        S: Strategy,
    {
        self.apply_everywhere_inner(strategy);
        self
    }

    /// Applies the strategy over the whole board until it stops changing it.
    ///
    /// # Panics
    ///
    /// Panics if the strategy reports a contradiction.
    #[track_caller]
    pub(crate) fn apply_until_stuck<S>(self, strategy: &S) -> Self
    where
        S: Strategy,
    {
        while !self.apply_everywhere_inner(strategy).is_empty() {}
        self
    }

    #[track_caller]
    fn apply_everywhere_inner<S>(&self, strategy: &S) -> StepEffects
    where
        S: Strategy,
    {
        let mut effects = StepEffects::none();
        for box_index in 0..9 {
            for orientation in [Orientation::Rows, Orientation::Cols] {
                let scope = BoxScope::new(box_index, orientation);
                effects.merge(strategy.apply(&self.current, scope).unwrap());
            }
        }
        effects
    }

    /// Asserts that a previously undecided cell now holds the given digit.
    #[track_caller]
    pub(crate) fn assert_value(self, pos: Position, digit: Digit) -> Self {
        assert!(
            self.initial.value_at(pos).is_none(),
            "expected {pos} to start undecided, but it held {:?}",
            self.initial.value_at(pos)
        );
        assert_eq!(
            self.current.value_at(pos),
            Some(digit),
            "expected {digit} at {pos}, candidates are {:?}",
            self.current.candidates_at(pos)
        );
        self
    }

    /// Asserts that all the given candidates were removed from a cell.
    ///
    /// The digits must have been present initially; other candidates may
    /// have been removed as well.
    #[track_caller]
    pub(crate) fn assert_removed<C>(self, pos: Position, digits: C) -> Self
    where
        C: IntoIterator<Item = Digit>,
    {
        let digits = DigitSet::from_iter(digits);
        let initial = self.initial.candidates_at(pos);
        let current = self.current.candidates_at(pos);
        assert_eq!(
            initial & digits,
            digits,
            "expected {digits:?} to start as candidates at {pos}, but found {initial:?}"
        );
        assert!(
            (current & digits).is_empty(),
            "expected {digits:?} to be removed from {pos}, but {:?} remain",
            current & digits
        );
        self
    }

    /// Asserts that the cell's candidates are exactly the given set.
    #[track_caller]
    pub(crate) fn assert_candidates<C>(self, pos: Position, digits: C) -> Self
    where
        C: IntoIterator<Item = Digit>,
    {
        let digits = DigitSet::from_iter(digits);
        let current = self.current.candidates_at(pos);
        assert_eq!(
            current, digits,
            "expected candidates {digits:?} at {pos}, but found {current:?}"
        );
        self
    }

    /// Asserts that a cell's candidates did not change.
    #[track_caller]
    pub(crate) fn assert_no_change(self, pos: Position) -> Self {
        let initial = self.initial.candidates_at(pos);
        let current = self.current.candidates_at(pos);
        assert_eq!(
            initial, current,
            "expected no change at {pos}, but candidates went from {initial:?} to {current:?}"
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SolveError;
    use crate::strategy::BoxedStrategy;

    #[derive(Debug)]
    struct NoOpStrategy;

    impl Strategy for NoOpStrategy {
        fn name(&self) -> &'static str {
            "no-op"
        }

        fn clone_box(&self) -> BoxedStrategy {
            Box::new(NoOpStrategy)
        }

        fn apply(
            &self,
            _grid: &CandidateGrid,
            _scope: BoxScope,
        ) -> Result<StepEffects, SolveError> {
            Ok(StepEffects::none())
        }
    }

    #[derive(Debug)]
    struct PlaceD1AtOrigin;

    impl Strategy for PlaceD1AtOrigin {
        fn name(&self) -> &'static str {
            "place-d1-at-origin"
        }

        fn clone_box(&self) -> BoxedStrategy {
            Box::new(PlaceD1AtOrigin)
        }

        fn apply(&self, grid: &CandidateGrid, scope: BoxScope) -> Result<StepEffects, SolveError> {
            let pos = Position::new(0, 0);
            let mut effects = StepEffects::none();
            if scope.box_index() == 0 && !grid.is_decided(pos) {
                grid.set_value(pos, Digit::D1)?;
                effects.record_change(scope, pos);
            }
            Ok(effects)
        }
    }

    #[test]
    fn test_from_str_propagates_givens() {
        let tester = StrategyTester::from_str(&format!("5{}", ".".repeat(80)));
        assert!(
            !tester
                .grid()
                .candidates_at(Position::new(8, 0))
                .contains(Digit::D5)
        );
    }

    #[test]
    fn test_apply_and_assert_value() {
        StrategyTester::new(CandidateGrid::new())
            .apply(&PlaceD1AtOrigin, 0, Orientation::Rows)
            .assert_value(Position::new(0, 0), Digit::D1)
            .assert_removed(Position::new(1, 0), [Digit::D1]);
    }

    #[test]
    fn test_apply_until_stuck_terminates() {
        StrategyTester::new(CandidateGrid::new())
            .apply_until_stuck(&PlaceD1AtOrigin)
            .assert_value(Position::new(0, 0), Digit::D1);
    }

    #[test]
    fn test_assert_no_change_with_noop() {
        StrategyTester::new(CandidateGrid::new())
            .apply_everywhere(&NoOpStrategy)
            .assert_no_change(Position::new(4, 4))
            .assert_candidates(Position::new(4, 4), Digit::ALL);
    }

    #[test]
    #[should_panic(expected = "expected no change")]
    fn test_assert_no_change_detects_changes() {
        StrategyTester::new(CandidateGrid::new())
            .apply(&PlaceD1AtOrigin, 0, Orientation::Rows)
            .assert_no_change(Position::new(0, 0));
    }
}
