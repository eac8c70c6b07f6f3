//! Benchmarks for the water jug search strategies.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use waterjug::heuristic::{Heuristic, HeuristicKind};
use waterjug::{solve, SearchConfig, State, StrategyKind};

/// Benchmark every strategy on the classic (5, 3, 4) instance.
fn bench_strategies(c: &mut Criterion) {
    let config = SearchConfig::default().with_seed(42);
    let mut group = c.benchmark_group("solve_5_3_4");

    for kind in StrategyKind::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(kind.name()), &kind, |b, &kind| {
            b.iter(|| solve(black_box(kind), 5, 3, 4, &config))
        });
    }
    group.finish();
}

/// Benchmark the exhaustive strategies on an instance needing a long path.
fn bench_large_instance(c: &mut Criterion) {
    let config = SearchConfig::default();
    let mut group = c.benchmark_group("solve_101_37_1");
    group.sample_size(20);

    for kind in [StrategyKind::Bfs, StrategyKind::Backtracking, StrategyKind::BestFirst] {
        group.bench_with_input(BenchmarkId::from_parameter(kind.name()), &kind, |b, &kind| {
            b.iter(|| solve(black_box(kind), 101, 37, 1, &config))
        });
    }
    group.finish();
}

/// Benchmark a full solvability check.
fn bench_has_solution(c: &mut Criterion) {
    let state = State::initial(1_000_003, 999_983, 17);

    c.bench_function("has_solution", |b| b.iter(|| black_box(state).has_solution()));
}

/// Benchmark each heuristic on a mid-search state.
fn bench_heuristics(c: &mut Criterion) {
    let state = State::new(5, 2, 5, 3, 4).expect("valid state");
    let mut group = c.benchmark_group("heuristic");

    for heuristic in HeuristicKind::ALL {
        group.bench_function(heuristic.name(), |b| {
            b.iter(|| heuristic.evaluate(black_box(&state)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_strategies,
    bench_large_instance,
    bench_has_solution,
    bench_heuristics
);
criterion_main!(benches);
