//! Command-line front end for the Boxwise solver.
//!
//! Loads a puzzle file, runs the requested solver variant, and prints the
//! result. The exit code is nonzero only for unreadable or malformed input;
//! an unsolvable puzzle is reported on stdout and exits cleanly.

use std::{fmt::Write as _, path::PathBuf, process::ExitCode};

use boxwise_core::{DigitGrid, Position};
use boxwise_solver::{Mode, Solver, Unsolvable};
use clap::{Parser, ValueEnum};

/// Solver variant selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    /// Single-threaded logical deduction with guess-and-check.
    Logical,
    /// Shared-state workers with contention backoff.
    ParallelLogical,
    /// Round-based statically partitioned workers.
    CoordinatedLogical,
}

impl Algorithm {
    fn mode(self) -> Mode {
        match self {
            Algorithm::Logical => Mode::Sequential,
            Algorithm::ParallelLogical => Mode::Parallel,
            Algorithm::CoordinatedLogical => Mode::Coordinated,
        }
    }
}

/// Solve a Sudoku puzzle from a grid file.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the puzzle file: nine lines of nine characters, digits for
    /// givens and `0` or `.` for unknowns.
    filename: PathBuf,
    /// Solver variant to run.
    #[arg(value_enum)]
    algorithm: Algorithm,
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();
    let args = Args::parse();

    let contents = match std::fs::read_to_string(&args.filename) {
        Ok(contents) => contents,
        Err(error) => {
            eprintln!("cannot read {}: {error}", args.filename.display());
            return ExitCode::FAILURE;
        }
    };
    let givens: DigitGrid = match contents.parse() {
        Ok(givens) => givens,
        Err(error) => {
            eprintln!("cannot parse {}: {error}", args.filename.display());
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "solving {} ({} givens) with {:?}",
        args.filename.display(),
        givens.known_count(),
        args.algorithm
    );
    match Solver::new(args.algorithm.mode()).solve(&givens) {
        Ok(solution) => {
            print!("{}", render(&solution.grid));
            log::info!(
                "solved with {} strategy steps and {} guesses",
                solution.stats.strategy_steps,
                solution.stats.guesses
            );
        }
        Err(report) => print!("{}", render_failure(&report)),
    }
    ExitCode::SUCCESS
}

/// Renders a grid with box borders.
fn render(grid: &DigitGrid) -> String {
    let mut out = String::new();
    for y in 0..9 {
        if y % 3 == 0 {
            out.push_str("+-------+-------+-------+\n");
        }
        for x in 0..9 {
            if x % 3 == 0 {
                out.push_str("| ");
            }
            match grid.get(Position::new(x, y)) {
                Some(digit) => {
                    let _ = write!(out, "{digit} ");
                }
                None => out.push_str(". "),
            }
        }
        out.push_str("|\n");
    }
    out.push_str("+-------+-------+-------+\n");
    out
}

fn render_failure(report: &Unsolvable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{report}");
    out.push_str(&render(&report.partial));
    if !report.candidates.is_empty() {
        out.push_str("remaining candidates:\n");
        for (pos, candidates) in &report.candidates {
            let _ = writeln!(out, "  {pos}: {candidates:?}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn test_algorithm_mode_mapping() {
        assert_eq!(Algorithm::Logical.mode(), Mode::Sequential);
        assert_eq!(Algorithm::ParallelLogical.mode(), Mode::Parallel);
        assert_eq!(Algorithm::CoordinatedLogical.mode(), Mode::Coordinated);
    }

    #[test]
    fn test_render_draws_borders() {
        let grid = DigitGrid::from_str(&format!("5{}", ".".repeat(80))).unwrap();
        let rendered = render(&grid);
        assert!(rendered.starts_with("+-------+-------+-------+\n| 5 . . |"));
        assert_eq!(rendered.lines().count(), 13);
    }

    #[test]
    fn test_render_failure_mentions_reason_and_state() {
        let givens = DigitGrid::from_str(&format!("5...5....{}", ".".repeat(72))).unwrap();
        let report = Solver::new(Mode::Sequential).solve(&givens).unwrap_err();
        let rendered = render_failure(&report);
        assert!(rendered.starts_with("sudoku cannot be solved"));
        assert!(rendered.contains("| 5 . . |"));
    }

    #[test]
    fn test_args_parse() {
        use clap::CommandFactory as _;
        Args::command().debug_assert();
    }
}
