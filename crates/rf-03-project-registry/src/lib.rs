//! # RF-03 Project Registry
//!
//! Proposals, peer ballots, scores and the funding-selection algorithm.
//!
//! **Subsystem ID:** 3  
//! **Depends on:** Admin Registry (1), Validator Registry (2), and the
//! Milestone Tracker (4) through a narrow track-opening port.
//!
//! ## Project Lifecycle
//!
//! ```text
//! [PENDING] ──5th ballot──→ [SCORED] ──selection──→ [SELECTED] ──last milestone──→ [COMPLETED]
//!                              ↑   │
//!                              └───┘ does not fit the area budget (stays in the pool)
//! ```
//!
//! ## Money-Moving Entry Points
//!
//! `credit_funds`, `credit_additional_funds` and `mark_completed` accept only
//! the configured milestone authority. Changing that authority is an
//! owner-only, audited operation.
//!
//! ## Module Structure
//!
//! ```text
//! rf-03-project-registry/
//! ├── domain/          # Project, ProjectStatus, Ballot, selection algorithm
//! ├── ports/           # FundingDirectory, ValidatorDirectory, MilestoneTrackOpener
//! └── registry.rs      # ProjectRegistry
//! ```

#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod registry;

pub use domain::{
    count_yes_answers, plan_selection, Ballot, Project, ProjectError, ProjectResult,
    ProjectStatus, SelectionCandidate, SelectionOutcome, SelectionPlan, BALLOT_QUORUM,
    MAX_BALLOT_LENGTH,
};
pub use ports::{
    AreaTerms, FundingDirectory, MilestoneTrackOpener, MockFundingDirectory, MockTrackOpener,
    MockValidatorDirectory, ValidatorDirectory,
};
pub use registry::ProjectRegistry;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
