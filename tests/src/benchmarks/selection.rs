//! # Selection Benchmarks
//!
//! Pool sizes far beyond a realistic round, with random scores and budgets
//! so the first-fit pass both accepts and skips.

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use rf_03_project_registry::{plan_selection, SelectionCandidate};
use shared_types::{Address, Amount};
use std::time::Duration;

/// Random pool of `size` candidates.
pub fn random_pool(size: usize) -> Vec<SelectionCandidate> {
    let mut rng = rand::thread_rng();
    (0..size)
        .map(|i| {
            let mut owner = [0u8; 20];
            rng.fill(&mut owner);
            SelectionCandidate {
                owner: Address::new(owner),
                score: rng.gen_range(0..1_280),
                budget_estimate: rng.gen_range(1..10_000),
                sequence: i as u64,
            }
        })
        .collect()
}

pub fn bench_plan_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("rf-03-selection");
    group.measurement_time(Duration::from_secs(5));

    for size in [10, 100, 1_000, 10_000] {
        let pool = random_pool(size);
        // Roughly half the pool fits.
        let available: Amount = pool.iter().map(|c| c.budget_estimate).sum::<Amount>() / 2;

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("plan_selection", size), &pool, |b, pool| {
            b.iter(|| black_box(plan_selection(black_box(pool), available)))
        });
    }

    // Every score equal: ordering falls back to registration sequence.
    let mut ties = random_pool(1_000);
    for candidate in &mut ties {
        candidate.score = 7;
    }
    group.bench_function("plan_selection_all_ties", |b| {
        b.iter(|| black_box(plan_selection(black_box(&ties), 1_000_000)))
    });

    group.finish();
}
