//! # Ballot and Payout Benchmarks

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use rf_03_project_registry::{count_yes_answers, MAX_BALLOT_LENGTH};
use rf_04_milestone_tracker::payout_schedule;

fn random_ballot(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| if rng.gen_bool(0.5) { '1' } else { '0' })
        .collect()
}

pub fn bench_count_yes_answers(c: &mut Criterion) {
    let mut group = c.benchmark_group("rf-03-ballots");

    for length in [1, 16, 64, MAX_BALLOT_LENGTH] {
        let ballot = random_ballot(length);
        group.throughput(Throughput::Bytes(length as u64));
        group.bench_with_input(
            BenchmarkId::new("count_yes_answers", length),
            &ballot,
            |b, ballot| b.iter(|| black_box(count_yes_answers(black_box(ballot)))),
        );
    }

    group.finish();
}

pub fn bench_payout_schedule(c: &mut Criterion) {
    let mut group = c.benchmark_group("rf-04-payout");

    for milestones in [1u32, 3, 12, 120] {
        group.bench_with_input(
            BenchmarkId::new("payout_schedule", milestones),
            &milestones,
            |b, &milestones| b.iter(|| black_box(payout_schedule(black_box(1_000_003), milestones))),
        );
    }

    group.finish();
}
