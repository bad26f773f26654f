//! Independent-parallel orchestration.
//!
//! A fixed number of workers run the sequential sweep loop concurrently over
//! one shared [`SolveState`], coordinating through an advisory lock table:
//! one writer per box, counted readers per row band and column stack. A
//! worker first tries to skip contended resources and move on; once a whole
//! pass yields nothing but contention it relaxes the avoidance, waiting for
//! the box writer and incrementing the reader counters unconditionally
//! (concurrent readers on one line are fine, concurrent writers on one box
//! are not). Acquisition is box-then-line and release is the reverse, on
//! every exit path.

use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use crate::{
    SolveError, scheduler,
    state::SolveState,
    strategy::{BoxedStrategy, Orientation},
};

/// Number of concurrent sweep workers, as in the source engine.
const WORKER_COUNT: usize = 3;

/// Advisory per-box writer flags and per-line reader counters.
#[derive(Debug)]
struct LockTable {
    boxes: [AtomicBool; 9],
    row_bands: [AtomicUsize; 3],
    col_stacks: [AtomicUsize; 3],
}

impl LockTable {
    fn new() -> Self {
        Self {
            boxes: std::array::from_fn(|_| AtomicBool::new(false)),
            row_bands: std::array::from_fn(|_| AtomicUsize::new(0)),
            col_stacks: std::array::from_fn(|_| AtomicUsize::new(0)),
        }
    }

    fn try_acquire_box(&self, box_index: u8) -> bool {
        self.boxes[usize::from(box_index)]
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    fn release_box(&self, box_index: u8) {
        self.boxes[usize::from(box_index)].store(false, Ordering::Release);
    }

    fn line(&self, box_index: u8, orientation: Orientation) -> &AtomicUsize {
        match orientation {
            Orientation::Rows => &self.row_bands[usize::from(box_index / 3)],
            Orientation::Cols => &self.col_stacks[usize::from(box_index % 3)],
        }
    }

    /// Sole-reader acquisition; fails if anyone else is scanning the line.
    fn try_acquire_line(&self, box_index: u8, orientation: Orientation) -> bool {
        self.line(box_index, orientation)
            .compare_exchange(0, 1, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    /// Shared-reader acquisition; always succeeds.
    fn acquire_line_shared(&self, box_index: u8, orientation: Orientation) {
        self.line(box_index, orientation).fetch_add(1, Ordering::AcqRel);
    }

    fn release_line(&self, box_index: u8, orientation: Orientation) {
        self.line(box_index, orientation).fetch_sub(1, Ordering::Release);
    }
}

/// First contradiction observed by any worker of the attempt.
#[derive(Debug, Default)]
struct FailureSlot {
    failed: AtomicBool,
    error: Mutex<Option<SolveError>>,
}

impl FailureSlot {
    fn set(&self, error: SolveError) {
        let mut slot = self
            .error
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        slot.get_or_insert(error);
        self.failed.store(true, Ordering::Release);
    }

    fn is_set(&self) -> bool {
        self.failed.load(Ordering::Acquire)
    }

    fn take(&self) -> Option<SolveError> {
        self.error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

fn sweep_order() -> impl Iterator<Item = (u8, Orientation)> {
    let rows = (0..9).map(|box_index| (box_index, Orientation::Rows));
    let cols = [0u8, 3, 6, 1, 4, 7, 2, 5, 8]
        .into_iter()
        .map(|box_index| (box_index, Orientation::Cols));
    rows.chain(cols)
}

/// One worker's sweep loop over the shared state.
///
/// Exits when a full pass sees no dirty box, no contention, and no dirty
/// flag anywhere, or as soon as a peer records a failure.
fn worker_sweep(
    state: &SolveState,
    strategies: &[BoxedStrategy],
    locks: &LockTable,
    failure: &FailureSlot,
    worker: usize,
) -> Result<(), SolveError> {
    let mut avoid_contention = true;
    loop {
        if failure.is_set() {
            return Ok(());
        }
        let mut progressed = false;
        let mut contended = false;
        for (box_index, orientation) in sweep_order() {
            if failure.is_set() {
                return Ok(());
            }
            if !state.dirty.peek(box_index, orientation) {
                continue;
            }

            if !locks.try_acquire_box(box_index) {
                if avoid_contention {
                    contended = true;
                    continue;
                }
                let mut acquired = false;
                while !acquired {
                    if failure.is_set() {
                        return Ok(());
                    }
                    std::hint::spin_loop();
                    acquired = locks.try_acquire_box(box_index);
                }
            }
            let line_held = if avoid_contention {
                locks.try_acquire_line(box_index, orientation)
            } else {
                locks.acquire_line_shared(box_index, orientation);
                true
            };
            if !line_held {
                locks.release_box(box_index);
                contended = true;
                continue;
            }

            // The flag may have been consumed by a peer between the peek and
            // the acquisition.
            let step = if state.dirty.take(box_index, orientation) {
                progressed = true;
                scheduler::solve_step(state, strategies, box_index, orientation).map(|_| ())
            } else {
                Ok(())
            };
            locks.release_line(box_index, orientation);
            locks.release_box(box_index);
            step?;
        }

        if progressed {
            avoid_contention = true;
        } else if contended {
            log::trace!("worker {worker} relaxing contention avoidance");
            avoid_contention = false;
        } else if !state.dirty.any() {
            log::trace!("worker {worker} quiescent");
            return Ok(());
        }
    }
}

/// Runs the shared-state sweep with [`WORKER_COUNT`] workers, then drains
/// any leftovers sequentially.
///
/// The drain covers the window in which one worker re-dirties boxes while
/// its peers have already exited; it is a no-op when the workers truly
/// quiesced.
///
/// # Errors
///
/// Propagates the first contradiction recorded by any worker.
pub(crate) fn run_to_quiescence(
    state: &SolveState,
    strategies: &[BoxedStrategy],
) -> Result<(), SolveError> {
    let locks = LockTable::new();
    let failure = FailureSlot::default();

    rayon::scope(|scope| {
        for worker in 0..WORKER_COUNT {
            let locks = &locks;
            let failure = &failure;
            scope.spawn(move |_| {
                if let Err(error) = worker_sweep(state, strategies, locks, failure, worker) {
                    failure.set(error);
                }
            });
        }
    });

    if let Some(error) = failure.take() {
        return Err(error);
    }
    scheduler::run_to_quiescence(state, strategies)
}
