//! Shared candidate state for a solve attempt.
//!
//! [`CandidateGrid`] tracks, for every cell, the set of digits still possible
//! there plus the decided value if one has been placed. All mutation goes
//! through atomic read-modify-write operations, so a single grid can be
//! worked on concurrently by several solver workers: candidate masks only
//! ever lose bits after construction and values only ever move from
//! "undecided" to a digit, which makes racing eliminations harmless.

use std::{
    fmt::{self, Debug},
    sync::atomic::{AtomicU8, AtomicU16, Ordering},
};

use crate::{Digit, DigitSet, House, Position};

/// Violations of the Sudoku candidate invariants.
///
/// Any of these means the current solve attempt is contradictory and must be
/// abandoned (or, inside a guess branch, that the branch is dead).
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConsistencyError {
    /// A cell has no remaining candidates.
    #[display("cell {_0} has no remaining candidates")]
    EmptyCell(#[error(not(source))] Position),
    /// A digit was placed in a cell where it is not a candidate.
    #[display("digit {digit} is not a candidate at {pos}")]
    ExcludedDigit {
        /// The cell the placement targeted.
        pos: Position,
        /// The digit that was no longer available.
        digit: Digit,
    },
    /// Two cells in one house hold the same digit.
    #[display("digit {digit} appears more than once in {house}")]
    DuplicateDigit {
        /// The duplicated digit.
        digit: Digit,
        /// The house containing the duplicate.
        house: House,
    },
    /// A placed digit is still a candidate elsewhere in the same house.
    #[display("digit {digit} was placed in {house} but remains a candidate at {pos}")]
    StaleCandidate {
        /// The cell still carrying the stale candidate.
        pos: Position,
        /// The placed digit.
        digit: Digit,
        /// The house the digit was placed in.
        house: House,
    },
}

/// Candidate and value state for all 81 cells.
///
/// A fresh grid has every digit as a candidate in every cell and no values.
/// Placing a value with [`set_value`](Self::set_value) collapses the cell to
/// a single candidate and removes that digit from every peer in the same
/// row, column, and box; this is the only propagation mechanism in the
/// engine, so candidate state can never silently drift between the
/// sequential and parallel solvers.
///
/// # Examples
///
/// ```
/// use boxwise_core::{CandidateGrid, Digit, Position};
///
/// let grid = CandidateGrid::new();
/// grid.set_value(Position::new(0, 0), Digit::D5)?;
///
/// assert_eq!(grid.value_at(Position::new(0, 0)), Some(Digit::D5));
/// // D5 is gone from the rest of the row, column, and box.
/// assert!(!grid.candidates_at(Position::new(8, 0)).contains(Digit::D5));
/// assert!(!grid.candidates_at(Position::new(0, 8)).contains(Digit::D5));
/// assert!(!grid.candidates_at(Position::new(1, 1)).contains(Digit::D5));
/// # Ok::<(), boxwise_core::ConsistencyError>(())
/// ```
pub struct CandidateGrid {
    /// Per-cell candidate masks; bit `n` is digit `n + 1`.
    cells: [AtomicU16; 81],
    /// Per-cell decided values; 0 means undecided.
    values: [AtomicU8; 81],
}

impl CandidateGrid {
    /// Creates a grid with every digit possible in every cell.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: std::array::from_fn(|_| AtomicU16::new(DigitSet::FULL.bits())),
            values: std::array::from_fn(|_| AtomicU8::new(0)),
        }
    }

    /// Returns the candidate set at a position.
    #[must_use]
    #[inline]
    pub fn candidates_at(&self, pos: Position) -> DigitSet {
        DigitSet::from_bits(self.cells[pos.index()].load(Ordering::Acquire))
    }

    /// Returns the number of candidates at a position.
    #[must_use]
    #[inline]
    pub fn candidate_count(&self, pos: Position) -> usize {
        self.candidates_at(pos).len()
    }

    /// Returns the decided value at a position, if any.
    #[must_use]
    #[inline]
    pub fn value_at(&self, pos: Position) -> Option<Digit> {
        match self.values[pos.index()].load(Ordering::Acquire) {
            0 => None,
            value => Some(Digit::from_value(value)),
        }
    }

    /// Returns `true` if a value has been placed at the position.
    #[must_use]
    #[inline]
    pub fn is_decided(&self, pos: Position) -> bool {
        self.values[pos.index()].load(Ordering::Acquire) != 0
    }

    /// Returns an iterator over the positions without a decided value, in
    /// row-major order.
    pub fn undecided(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL.into_iter().filter(|pos| !self.is_decided(*pos))
    }

    /// Places a digit at a position and propagates the eliminations.
    ///
    /// The cell's candidates collapse to the placed digit and the digit is
    /// removed from every other cell in the same row, column, and box. The
    /// peer eliminations are published before the value itself, so a
    /// concurrent reader that observes the value also observes every
    /// elimination it implies.
    ///
    /// # Errors
    ///
    /// Returns [`ConsistencyError::ExcludedDigit`] if the digit is not a
    /// candidate at the position, and [`ConsistencyError::EmptyCell`] if a
    /// peer loses its last candidate. The grid must be considered
    /// contradictory after either error.
    pub fn set_value(&self, pos: Position, digit: Digit) -> Result<(), ConsistencyError> {
        let only = DigitSet::from_elem(digit).bits();
        let prev = self.cells[pos.index()].fetch_and(only, Ordering::AcqRel);
        if prev & only == 0 {
            return Err(ConsistencyError::ExcludedDigit { pos, digit });
        }

        for peer in Self::peers(pos) {
            self.eliminate(peer, digit)?;
        }
        self.values[pos.index()].store(digit.value(), Ordering::Release);
        Ok(())
    }

    /// Removes a candidate digit from a cell.
    ///
    /// Returns `true` if the digit was present.
    ///
    /// # Errors
    ///
    /// Returns [`ConsistencyError::EmptyCell`] if the removal leaves the cell
    /// with no candidates.
    #[inline]
    pub fn eliminate(&self, pos: Position, digit: Digit) -> Result<bool, ConsistencyError> {
        self.eliminate_set(pos, DigitSet::from_elem(digit))
    }

    /// Removes a set of candidate digits from a cell.
    ///
    /// Returns `true` if any of the digits were present.
    ///
    /// # Errors
    ///
    /// Returns [`ConsistencyError::EmptyCell`] if the removal leaves the cell
    /// with no candidates.
    pub fn eliminate_set(&self, pos: Position, digits: DigitSet) -> Result<bool, ConsistencyError> {
        let prev = self.cells[pos.index()].fetch_and(!digits.bits(), Ordering::AcqRel);
        let prev = DigitSet::from_bits(prev);
        let removed = prev & digits;
        if removed.is_empty() {
            return Ok(false);
        }
        if prev.difference(digits).is_empty() {
            return Err(ConsistencyError::EmptyCell(pos));
        }
        Ok(true)
    }

    /// Returns the decided cells as a [`DigitGrid`](crate::DigitGrid).
    #[must_use]
    pub fn to_digit_grid(&self) -> crate::DigitGrid {
        let mut grid = crate::DigitGrid::new();
        for pos in Position::ALL {
            grid.set(pos, self.value_at(pos));
        }
        grid
    }

    /// Checks the candidate invariants.
    ///
    /// Verifies that every cell keeps at least one candidate, that decided
    /// cells carry exactly their own digit as a candidate, that no house
    /// holds a digit twice, and that placed digits have been removed from
    /// their peers' candidates.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a [`ConsistencyError`].
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        for pos in Position::ALL {
            let candidates = self.candidates_at(pos);
            if candidates.is_empty() {
                return Err(ConsistencyError::EmptyCell(pos));
            }
            if let Some(digit) = self.value_at(pos)
                && candidates.single() != Some(digit)
            {
                return Err(ConsistencyError::ExcludedDigit { pos, digit });
            }
        }

        for house in House::ALL {
            let mut placed = DigitSet::EMPTY;
            for pos in house.positions() {
                if let Some(digit) = self.value_at(pos)
                    && !placed.insert(digit)
                {
                    return Err(ConsistencyError::DuplicateDigit { digit, house });
                }
            }
            for pos in house.positions() {
                if self.is_decided(pos) {
                    continue;
                }
                let stale = self.candidates_at(pos) & placed;
                if let Some(digit) = stale.first() {
                    return Err(ConsistencyError::StaleCandidate { pos, digit, house });
                }
            }
        }
        Ok(())
    }

    /// Returns `true` if every cell is decided and the grid is consistent.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.undecided().next().is_none() && self.check_consistency().is_ok()
    }

    fn peers(pos: Position) -> impl Iterator<Item = Position> {
        let row = Position::ROWS[usize::from(pos.y())];
        let column = Position::COLUMNS[usize::from(pos.x())];
        let in_box = Position::BOXES[usize::from(pos.box_index())];
        row.into_iter()
            .chain(column)
            .chain(
                in_box
                    .into_iter()
                    .filter(move |peer| peer.x() != pos.x() && peer.y() != pos.y()),
            )
            .filter(move |peer| *peer != pos)
    }
}

impl Default for CandidateGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CandidateGrid {
    fn clone(&self) -> Self {
        Self {
            cells: std::array::from_fn(|i| AtomicU16::new(self.cells[i].load(Ordering::Acquire))),
            values: std::array::from_fn(|i| AtomicU8::new(self.values[i].load(Ordering::Acquire))),
        }
    }
}

impl PartialEq for CandidateGrid {
    fn eq(&self, other: &Self) -> bool {
        Position::ALL.into_iter().all(|pos| {
            self.candidates_at(pos) == other.candidates_at(pos)
                && self.value_at(pos) == other.value_at(pos)
        })
    }
}

impl Eq for CandidateGrid {}

impl Debug for CandidateGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CandidateGrid {{")?;
        for y in 0..9 {
            write!(f, "    ")?;
            for x in 0..9 {
                let pos = Position::new(x, y);
                match self.value_at(pos) {
                    Some(digit) => write!(f, "[{digit}]       ")?,
                    None => {
                        let candidates = self.candidates_at(pos);
                        let mut rendered = String::new();
                        for digit in candidates {
                            rendered.push(char::from(b'0' + digit.value()));
                        }
                        write!(f, "{rendered:<10}")?;
                    }
                }
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}
