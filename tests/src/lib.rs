//! # Research-Funding Ledger Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion benchmarks of the hot paths
//! │   ├── selection.rs
//! │   └── ballots.rs
//! │
//! └── integration/      # Whole-ledger scenarios through the service
//!     ├── harness.rs    # Shared fixtures (principals, staffing, scoring)
//!     ├── funding_round.rs
//!     ├── adversarial.rs
//!     └── event_flow.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p rf-tests
//!
//! # By category
//! cargo test -p rf-tests integration::funding_round::
//! cargo test -p rf-tests integration::adversarial::
//!
//! # Benchmarks
//! cargo bench -p rf-tests
//! ```

#![allow(dead_code)]

pub mod benchmarks;
pub mod integration;
