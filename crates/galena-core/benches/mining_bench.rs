//! # Mining Benchmarks
//!
//! Performance benchmarks for galena-core.
//!
//! Run with: `cargo bench -p galena-core`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use galena_core::{
    DirectConvolutionCalculator, DivideAndConquerCalculator, MemoryDatabase, MinerBuilder,
    SearchStrategy, SupportCalculator, Vocabulary,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

/// Seeded synthetic database with the given shape.
fn create_database(n: usize, v: usize, density: f64) -> MemoryDatabase {
    let mut rng = ChaCha8Rng::seed_from_u64(0xD1CE);
    let vocab = Vocabulary::from_names((0..v).map(|i| format!("item{i}"))).expect("vocab");
    let transactions = (0..n)
        .map(|_| {
            (0..v as u32)
                .filter_map(|item| {
                    rng.gen_bool(density)
                        .then(|| (item, rng.gen_range(0.1..0.95)))
                })
                .collect()
        })
        .collect();
    MemoryDatabase::new(vocab, transactions).expect("database")
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_calculators(c: &mut Criterion) {
    let mut group = c.benchmark_group("support_calculator");
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for size in [32, 256, 1024] {
        let probs: Vec<f64> = (0..size).map(|_| rng.gen_range(0.05..0.95)).collect();

        let direct = DirectConvolutionCalculator::new(0.5).expect("calculator");
        group.bench_with_input(BenchmarkId::new("direct", size), &probs, |b, probs| {
            b.iter(|| black_box(direct.support_from_probabilities(probs)));
        });

        let dnc = DivideAndConquerCalculator::new(0.5).expect("calculator");
        group.bench_with_input(BenchmarkId::new("dnc", size), &probs, |b, probs| {
            b.iter(|| black_box(dnc.support_from_probabilities(probs)));
        });
    }

    group.finish();
}

fn bench_mining_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("mine");
    let db = create_database(500, 40, 0.2);

    for (name, strategy) in [
        ("best_first", SearchStrategy::BestFirst),
        ("dfs", SearchStrategy::Dfs),
        ("bfs", SearchStrategy::Bfs),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let miner = MinerBuilder::new(&db, 0.6, 10)
                    .strategy(strategy)
                    .build()
                    .expect("miner");
                black_box(miner.mine())
            });
        });
    }

    group.finish();
}

fn bench_database_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("mine_scaling");

    for n in [100, 500, 1000] {
        let db = create_database(n, 30, 0.2);
        group.bench_with_input(BenchmarkId::from_parameter(n), &db, |b, db| {
            b.iter(|| {
                let miner = MinerBuilder::new(db, 0.6, 10).build().expect("miner");
                black_box(miner.mine())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_calculators,
    bench_mining_strategies,
    bench_database_scaling
);
criterion_main!(benches);
