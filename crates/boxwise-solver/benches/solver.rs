//! End-to-end solve benchmarks for the three execution modes.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench solver
//! ```

use boxwise_core::DigitGrid;
use boxwise_solver::{Mode, Solver};
use criterion::{BenchmarkId, Criterion, PlottingBackend, criterion_group, criterion_main};

const SINGLES_PUZZLE: &str = "
    53_ _7_ ___
    6__ 195 ___
    _98 ___ _6_
    8__ _6_ __3
    4__ 8_3 __1
    7__ _2_ __6
    _6_ ___ 28_
    ___ 419 __5
    ___ _8_ _79
";

const SEVENTEEN_CLUES: &str = "
    ___ ___ _1_
    4__ ___ ___
    _2_ ___ ___
    ___ _5_ 4_7
    __8 ___ 3__
    __1 _9_ ___
    3__ 4__ 2__
    _5_ 1__ ___
    ___ 8_6 ___
";

fn bench_solve_cases(c: &mut Criterion, bench_name: &'static str, mode: Mode) {
    let puzzles: [(&str, DigitGrid); 2] = [
        ("singles", SINGLES_PUZZLE.parse().unwrap()),
        ("seventeen_clues", SEVENTEEN_CLUES.parse().unwrap()),
    ];
    let solver = Solver::new(mode);
    for (param, givens) in &puzzles {
        c.bench_with_input(BenchmarkId::new(bench_name, param), givens, |b, givens| {
            b.iter(|| solver.solve(givens).unwrap());
        });
    }
}

fn bench_sequential_solve(c: &mut Criterion) {
    bench_solve_cases(c, "sequential_solve", Mode::Sequential);
}

fn bench_parallel_solve(c: &mut Criterion) {
    bench_solve_cases(c, "parallel_solve", Mode::Parallel);
}

fn bench_coordinated_solve(c: &mut Criterion) {
    bench_solve_cases(c, "coordinated_solve", Mode::Coordinated);
}

criterion_group!(
    name = benches;
    config =
        Criterion::default()
            .plotting_backend(PlottingBackend::Plotters);
    targets =
        bench_sequential_solve,
        bench_parallel_solve,
        bench_coordinated_solve,
);

criterion_main!(benches);
