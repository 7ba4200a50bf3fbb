//! Spin Evaluation Benchmarks

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rf_win_eval::{Credits, EngineConfig, Grid, SymbolId::*, evaluate_spin, expand_wilds};

fn fixtures() -> Vec<(&'static str, Grid)> {
    vec![
        (
            "losing",
            Grid::from_rows([
                [Seven, Bell, Plum, Lemon, Orange],
                [Lemon, Cherry, Bell, Plum, Grapes],
                [Plum, Orange, Cherry, Bell, Lemon],
            ]),
        ),
        (
            "expanding",
            Grid::from_rows([
                [Seven, Wild, Plum, Lemon, Orange],
                [Seven, Cherry, Bell, Wild, Grapes],
                [Plum, Orange, Wild, Bell, Lemon],
            ]),
        ),
        ("all_lines", Grid::filled(Cherry)),
    ]
}

/// Benchmark full spin evaluation
fn bench_evaluate_spin(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_spin");
    let config = EngineConfig::standard();

    for (name, grid) in fixtures() {
        group.bench_with_input(BenchmarkId::new("standard", name), &grid, |b, grid| {
            b.iter(|| black_box(evaluate_spin(grid, Credits::from_whole(1), Some(&config))))
        });
    }

    group.finish();
}

/// Benchmark wild expansion alone
fn bench_expand_wilds(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand_wilds");

    for (name, grid) in fixtures() {
        group.bench_with_input(BenchmarkId::new("wild", name), &grid, |b, grid| {
            b.iter(|| black_box(expand_wilds(grid, Wild)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_evaluate_spin, bench_expand_wilds);
criterion_main!(benches);
