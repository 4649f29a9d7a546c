//! Benchmarks for traced algorithms
//!
//! Traces go to `io::sink()`, so the numbers cover instrumentation and JSON
//! formatting without I/O. Pretty vs compact output is compared for quick sort.

use std::io;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use algotrace_core::{
    merge_sort, quick_sort, trace_sequence, Fixture, FixtureConfig, Grid, MazeGenerator, PivotStrategy,
    TraceConfig, TraceLogger,
};

fn input(size: usize) -> Vec<i32> {
    Fixture::Random.generate(&FixtureConfig { size, uniques: 4 }, 42)
}

fn compact() -> TraceConfig {
    TraceConfig {
        pretty: false,
        ..TraceConfig::default()
    }
}

fn bench_quick_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("quick_sort");
    for size in [64, 512] {
        let data = input(size);
        for (label, config) in [("pretty", TraceConfig::default()), ("compact", compact())] {
            group.bench_with_input(BenchmarkId::new(label, size), &data, |b, data| {
                b.iter(|| {
                    let (sorted, ()) = trace_sequence(io::sink(), &config, data.clone(), |v| {
                        quick_sort(&v.begin(), &v.end(), PivotStrategy::MedianOfThree)
                    })
                    .unwrap();
                    black_box(sorted)
                })
            });
        }
    }
    group.finish();
}

fn bench_merge_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_sort");
    let config = compact();
    for size in [64, 512] {
        let data = input(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                let (sorted, ()) =
                    trace_sequence(io::sink(), &config, data.clone(), |v| merge_sort(&v.begin(), &v.end())).unwrap();
                black_box(sorted)
            })
        });
    }
    group.finish();
}

fn bench_dfs_maze(c: &mut Criterion) {
    c.bench_function("dfs_maze_32x32", |b| {
        b.iter(|| {
            let logger = TraceLogger::compact(io::sink());
            let mut rng = ChaCha8Rng::seed_from_u64(42);
            let maze = MazeGenerator::Dfs.generate(&logger, Grid::new(32, 32), 0, &mut rng);
            logger.finish().unwrap();
            black_box(maze)
        })
    });
}

criterion_group!(benches, bench_quick_sort, bench_merge_sort, bench_dfs_maze);
criterion_main!(benches);
