//! Core data structures for the Boxwise Sudoku solver.
//!
//! This crate holds the board-domain types shared by the deduction engine
//! and the surrounding tooling:
//!
//! - [`digit`]: type-safe Sudoku digits 1-9 and [`DigitSet`], the bitset the
//!   whole engine uses for candidate sets
//! - [`position`]: board coordinates with box index math and the const
//!   row/column/box lookup tables
//! - [`house`]: rows, columns, and boxes as first-class regions
//! - [`digit_grid`]: the plain 9×9 exchange grid with string and
//!   integer-array conversions
//! - [`candidate_grid`]: the shared, atomically mutated candidate state a
//!   solve attempt works on
//!
//! # Examples
//!
//! ```
//! use boxwise_core::{CandidateGrid, Digit, Position};
//!
//! let grid = CandidateGrid::new();
//! grid.set_value(Position::new(4, 4), Digit::D5)?;
//!
//! // The placement propagated to the peers.
//! assert!(!grid.candidates_at(Position::new(4, 0)).contains(Digit::D5));
//! # Ok::<(), boxwise_core::ConsistencyError>(())
//! ```

pub mod candidate_grid;
pub mod digit;
pub mod digit_grid;
pub mod digit_set;
pub mod house;
pub mod position;

// Re-export commonly used types
pub use self::{
    candidate_grid::{CandidateGrid, ConsistencyError},
    digit::Digit,
    digit_grid::{DigitGrid, GridParseError},
    digit_set::{DigitSet, DigitSetIter},
    house::House,
    position::Position,
};
