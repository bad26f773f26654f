//! Box-scoped deduction strategies.
//!
//! Every strategy examines one 3×3 box (plus, for the line-oriented rules,
//! the rows or columns running through it) and reports its effects back to
//! the scheduler as a [`StepEffects`] message instead of touching the dirty
//! queue itself. Strategies may place values inside their box and eliminate
//! candidates anywhere in the scanned lines; they never add candidates and
//! never unset values.

use std::fmt::Debug;

use boxwise_core::{CandidateGrid, House, Position};

pub use self::{
    box_line::BoxLine, hidden_pair::HiddenPair, hidden_single::HiddenSingle,
    naked_pair::NakedPair, naked_single::NakedSingle, pointing::Pointing,
};
use crate::SolveError;

mod box_line;
mod hidden_pair;
mod hidden_single;
mod naked_pair;
mod naked_single;
mod pointing;

/// Returns all strategies in application order.
///
/// The order runs from the cheapest rule to the most specific one: naked
/// singles, hidden singles, naked pairs, hidden pairs, box-line, pointing.
/// The scheduler applies them in this order on every pass over a dirty box.
#[must_use]
pub fn all_strategies() -> Vec<BoxedStrategy> {
    vec![
        Box::new(NakedSingle::new()),
        Box::new(HiddenSingle::new()),
        Box::new(NakedPair::new()),
        Box::new(HiddenPair::new()),
        Box::new(BoxLine::new()),
        Box::new(Pointing::new()),
    ]
}

/// The scan direction of a solver pass.
///
/// A row-oriented pass lets the line-scoped strategies look along the rows
/// running through the box; a column-oriented pass looks along the columns.
/// The box-scoped parts of each strategy run in both orientations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Scan the rows through the box.
    Rows,
    /// Scan the columns through the box.
    Cols,
}

impl Orientation {
    /// Returns the line of this orientation running through a position.
    #[must_use]
    pub fn line_through(self, pos: Position) -> House {
        match self {
            Orientation::Rows => House::Row { y: pos.y() },
            Orientation::Cols => House::Column { x: pos.x() },
        }
    }
}

/// The box (and scan orientation) a strategy invocation is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxScope {
    box_index: u8,
    orientation: Orientation,
}

impl BoxScope {
    /// Creates a scope for one box and orientation.
    ///
    /// # Panics
    ///
    /// Panics if `box_index` is 9 or more.
    #[must_use]
    pub fn new(box_index: u8, orientation: Orientation) -> Self {
        assert!(box_index < 9);
        Self {
            box_index,
            orientation,
        }
    }

    /// Returns the index of the scoped box (0-8).
    #[must_use]
    pub fn box_index(self) -> u8 {
        self.box_index
    }

    /// Returns the scan orientation.
    #[must_use]
    pub fn orientation(self) -> Orientation {
        self.orientation
    }

    /// Returns the nine cells of the scoped box.
    #[must_use]
    pub fn cells(self) -> [Position; 9] {
        Position::BOXES[usize::from(self.box_index)]
    }

    /// Returns the scoped box as a house.
    #[must_use]
    pub fn house(self) -> House {
        House::Box {
            index: self.box_index,
        }
    }

    /// Returns the line of the scan orientation through a position.
    #[must_use]
    pub fn line_through(self, pos: Position) -> House {
        self.orientation.line_through(pos)
    }

    /// Returns the three lines of the scan orientation crossing the box.
    #[must_use]
    pub fn lines(self) -> [House; 3] {
        let origin = Position::BOXES[usize::from(self.box_index)][0];
        match self.orientation {
            Orientation::Rows => [
                House::Row { y: origin.y() },
                House::Row { y: origin.y() + 1 },
                House::Row { y: origin.y() + 2 },
            ],
            Orientation::Cols => [
                House::Column { x: origin.x() },
                House::Column { x: origin.x() + 1 },
                House::Column { x: origin.x() + 2 },
            ],
        }
    }

    /// Returns `true` if the position lies inside the scoped box.
    #[must_use]
    pub fn contains(self, pos: Position) -> bool {
        pos.box_index() == self.box_index
    }
}

/// What a strategy invocation did to the grid.
///
/// The scheduler turns this message into dirty-flag updates: any change
/// re-dirties the row band and column stack of the box holding the changed
/// cell, whether that box is the scoped one or a foreign box hit by a
/// line-scoped elimination. Centralizing the flag writes in the scheduler
/// keeps the strategies free of scheduling concerns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepEffects {
    changed_in_box: bool,
    foreign: u16,
}

impl StepEffects {
    /// An empty effect set.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Records a candidate change at a position, classifying it as in-box or
    /// foreign relative to the scope.
    pub fn record_change(&mut self, scope: BoxScope, pos: Position) {
        if scope.contains(pos) {
            self.changed_in_box = true;
        } else {
            self.foreign |= 1 << pos.box_index();
        }
    }

    /// Returns `true` if the strategy changed anything inside its own box.
    #[must_use]
    pub fn changed_in_box(self) -> bool {
        self.changed_in_box
    }

    /// Returns `true` if nothing changed anywhere.
    #[must_use]
    pub fn is_empty(self) -> bool {
        !self.changed_in_box && self.foreign == 0
    }

    /// Returns the indices of foreign boxes that lost candidates.
    pub fn foreign_boxes(self) -> impl Iterator<Item = u8> {
        (0..9).filter(move |b| self.foreign & (1 << b) != 0)
    }

    /// Folds another effect set into this one.
    pub fn merge(&mut self, other: Self) {
        self.changed_in_box |= other.changed_in_box;
        self.foreign |= other.foreign;
    }
}

/// A box-scoped deduction rule.
///
/// Implementations must be pure functions of the grid state within their
/// contract: they may eliminate candidates and place values as described in
/// the module docs, but must not consult or mutate anything else.
pub trait Strategy: Debug + Send + Sync {
    /// Returns the name of the strategy.
    fn name(&self) -> &'static str;

    /// Returns a boxed clone of the strategy.
    fn clone_box(&self) -> BoxedStrategy;

    /// Applies the strategy to one box of the grid.
    ///
    /// # Errors
    ///
    /// Returns a [`SolveError`] when the strategy detects a contradiction;
    /// the grid must be considered dead afterwards.
    fn apply(&self, grid: &CandidateGrid, scope: BoxScope) -> Result<StepEffects, SolveError>;
}

/// A boxed strategy.
pub type BoxedStrategy = Box<dyn Strategy>;

impl Clone for BoxedStrategy {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_strategies_order() {
        let names: Vec<_> = all_strategies().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            [
                "naked single",
                "hidden single",
                "naked pair",
                "hidden pair",
                "box-line",
                "pointing",
            ]
        );
    }

    #[test]
    fn test_scope_lines() {
        let scope = BoxScope::new(4, Orientation::Rows);
        assert_eq!(
            scope.lines(),
            [
                House::Row { y: 3 },
                House::Row { y: 4 },
                House::Row { y: 5 },
            ]
        );
        let scope = BoxScope::new(4, Orientation::Cols);
        assert_eq!(
            scope.lines(),
            [
                House::Column { x: 3 },
                House::Column { x: 4 },
                House::Column { x: 5 },
            ]
        );
    }

    #[test]
    fn test_effects_classify_changes() {
        let scope = BoxScope::new(0, Orientation::Rows);
        let mut effects = StepEffects::none();
        assert!(effects.is_empty());

        effects.record_change(scope, Position::new(1, 1));
        assert!(effects.changed_in_box());
        assert_eq!(effects.foreign_boxes().count(), 0);

        effects.record_change(scope, Position::new(8, 0));
        let foreign: Vec<_> = effects.foreign_boxes().collect();
        assert_eq!(foreign, [2]);
    }

    #[test]
    fn test_effects_merge() {
        let scope = BoxScope::new(0, Orientation::Rows);
        let mut a = StepEffects::none();
        let mut b = StepEffects::none();
        b.record_change(scope, Position::new(4, 0));
        a.merge(b);
        assert!(!a.changed_in_box());
        assert_eq!(a.foreign_boxes().collect::<Vec<_>>(), [1]);
    }
}
