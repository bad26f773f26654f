//! The Boxwise deduction engine.
//!
//! The solver combines human-style logical deduction with recursive
//! guess-and-check:
//!
//! - [`strategy`]: box-scoped deduction rules (naked/hidden singles,
//!   naked/hidden pairs, box-line, pointing)
//! - a dirty-box scheduler that sweeps the strategies over flagged boxes
//!   until no deduction remains
//! - a guess driver that branches on the most constrained cell over
//!   deep-copied states when deduction alone is not enough
//!
//! The whole pipeline runs in one of three [`Mode`]s: sequential,
//! independent-parallel (shared state, advisory locks, forked guess
//! branches), or coordinated-parallel (statically partitioned round-based
//! workers).
//!
//! # Examples
//!
//! ```
//! use boxwise_solver::{Mode, Solver};
//!
//! let givens = "
//!     53_ _7_ ___
//!     6__ 195 ___
//!     _98 ___ _6_
//!     8__ _6_ __3
//!     4__ 8_3 __1
//!     7__ _2_ __6
//!     _6_ ___ 28_
//!     ___ 419 __5
//!     ___ _8_ _79
//! "
//! .parse()?;
//!
//! match Solver::new(Mode::Sequential).solve(&givens) {
//!     Ok(solution) => println!("{}", solution.grid),
//!     Err(report) => println!("{report}"),
//! }
//! # Ok::<(), boxwise_core::GridParseError>(())
//! ```

pub use self::{
    error::SolveError,
    solver::{Mode, Solution, SolveStats, Solver, Unsolvable},
};

mod coordinated;
mod error;
mod guess;
mod parallel;
mod scheduler;
mod solver;
mod state;
pub mod strategy;

#[cfg(test)]
mod testing;
