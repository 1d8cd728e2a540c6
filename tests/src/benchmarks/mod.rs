//! # Ledger Benchmarks
//!
//! Criterion benchmarks of the pure hot paths, driven from
//! `benches/ledger_benchmarks.rs`.
//!
//! | Path                 | Claim                                  |
//! |----------------------|----------------------------------------|
//! | `plan_selection`     | O(n log n) in the candidate pool       |
//! | `count_yes_answers`  | linear in ballot length                |
//! | `payout_schedule`    | linear in milestone count              |

pub mod ballots;
pub mod selection;
