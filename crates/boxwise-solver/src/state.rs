//! Per-attempt solver state: the shared grid plus scheduling bookkeeping.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use boxwise_core::{CandidateGrid, DigitGrid};

use crate::{SolveError, strategy::Orientation};

/// Per-box re-examination flags, one per orientation.
///
/// `rows[b]` means box `b` needs a row-oriented pass, `cols[b]` a
/// column-oriented one. Flags may be spuriously true (the pass is then a
/// no-op), but a mutation that should dirty a box always sets its flag
/// before the mutating step reports completion, so a flag is never
/// spuriously false.
#[derive(Debug)]
pub(crate) struct DirtyFlags {
    rows: [AtomicBool; 9],
    cols: [AtomicBool; 9],
}

impl DirtyFlags {
    fn new(initial: bool) -> Self {
        Self {
            rows: std::array::from_fn(|_| AtomicBool::new(initial)),
            cols: std::array::from_fn(|_| AtomicBool::new(initial)),
        }
    }

    fn flags(&self, orientation: Orientation) -> &[AtomicBool; 9] {
        match orientation {
            Orientation::Rows => &self.rows,
            Orientation::Cols => &self.cols,
        }
    }

    /// Marks every flag in both orientations.
    pub(crate) fn mark_all(&self) {
        for b in 0..9 {
            self.rows[b].store(true, Ordering::Release);
            self.cols[b].store(true, Ordering::Release);
        }
    }

    /// Returns the flag for a box without clearing it.
    pub(crate) fn peek(&self, box_index: u8, orientation: Orientation) -> bool {
        self.flags(orientation)[usize::from(box_index)].load(Ordering::Acquire)
    }

    /// Clears the flag for a box, returning whether it was set.
    pub(crate) fn take(&self, box_index: u8, orientation: Orientation) -> bool {
        self.flags(orientation)[usize::from(box_index)].swap(false, Ordering::AcqRel)
    }

    /// Marks one box for re-examination in one orientation.
    pub(crate) fn mark(&self, box_index: u8, orientation: Orientation) {
        self.flags(orientation)[usize::from(box_index)].store(true, Ordering::Release);
    }

    /// Marks the row flags of every box in the row band of `box_index`.
    pub(crate) fn mark_row_band(&self, box_index: u8) {
        let band = (box_index / 3) * 3;
        for bx in 0..3 {
            self.mark(band + bx, Orientation::Rows);
        }
    }

    /// Marks the column flags of every box in the column stack of `box_index`.
    pub(crate) fn mark_col_stack(&self, box_index: u8) {
        let stack = box_index % 3;
        for by in 0..3 {
            self.mark(stack + by * 3, Orientation::Cols);
        }
    }

    /// Returns `true` if any flag in either orientation is set.
    pub(crate) fn any(&self) -> bool {
        (0..9).any(|b| {
            self.rows[b].load(Ordering::Acquire) || self.cols[b].load(Ordering::Acquire)
        })
    }
}

/// State owned by one logical solve attempt.
///
/// Holds the shared [`CandidateGrid`], the dirty-box queue, and the step and
/// guess counters. A `SolveState` is either driven by a single thread
/// (sequential mode) or shared by reference between the workers of one
/// attempt (parallel modes); guess branches never share: they work on
/// [`child`](Self::child) copies.
#[derive(Debug)]
pub(crate) struct SolveState {
    pub(crate) grid: CandidateGrid,
    pub(crate) dirty: DirtyFlags,
    steps: AtomicU64,
    guesses: AtomicU64,
}

impl SolveState {
    /// Creates a blank state with no dirty boxes.
    pub(crate) fn new() -> Self {
        Self {
            grid: CandidateGrid::new(),
            dirty: DirtyFlags::new(false),
            steps: AtomicU64::new(0),
            guesses: AtomicU64::new(0),
        }
    }

    /// Applies the givens and marks the whole board dirty.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::GivensConflict`] if a given's digit has already
    /// been excluded from its cell by an earlier given, and a contradiction
    /// error if propagating a given empties some other cell.
    pub(crate) fn apply_givens(&self, givens: &DigitGrid) -> Result<(), SolveError> {
        for (pos, digit) in givens.givens() {
            if !self.grid.candidates_at(pos).contains(digit) {
                return Err(SolveError::GivensConflict { pos, digit });
            }
            self.grid.set_value(pos, digit)?;
        }
        self.dirty.mark_all();
        Ok(())
    }

    /// Deep-copies the state for a guess branch.
    ///
    /// The child starts with every box dirty so the branch re-runs deduction
    /// from scratch; counters carry over so the adopted branch reports totals
    /// for its whole solution path.
    pub(crate) fn child(&self) -> Self {
        Self {
            grid: self.grid.clone(),
            dirty: DirtyFlags::new(true),
            steps: AtomicU64::new(self.steps.load(Ordering::Relaxed)),
            guesses: AtomicU64::new(self.guesses.load(Ordering::Relaxed)),
        }
    }

    pub(crate) fn note_step(&self) {
        self.steps.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn note_guess(&self) {
        self.guesses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn steps(&self) -> u64 {
        self.steps.load(Ordering::Relaxed)
    }

    pub(crate) fn guesses(&self) -> u64 {
        self.guesses.load(Ordering::Relaxed)
    }
}
