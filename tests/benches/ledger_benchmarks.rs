//! # Research-Funding Ledger Benchmarks
//!
//! | Crate | Path | Target |
//! |-------|------|--------|
//! | rf-03 Project Registry | selection over 10k candidates | < 10ms |
//! | rf-03 Project Registry | ballot of 256 answers | < 1µs |
//! | rf-04 Milestone Tracker | payout schedule | < 1µs |

use criterion::{criterion_group, criterion_main};
use rf_tests::benchmarks::{ballots, selection};

criterion_group!(
    benches,
    selection::bench_plan_selection,
    ballots::bench_count_yes_answers,
    ballots::bench_payout_schedule
);
criterion_main!(benches);
