//! # RF-04 Milestone Tracker
//!
//! Staged disbursement of funded projects. Every funded project gets a
//! track at selection time; the owner requests review of the current
//! milestone and a verified validator of the project's research area
//! approves or rejects it.
//!
//! **Subsystem ID:** 4
//! **Depends on:** Project Registry (3) for fund crediting, Validator
//! Registry (2) for approver eligibility, Admin Registry (1) for bonus
//! awards.
//!
//! ## Payout Rule
//!
//! ```text
//! payment = remaining_budget                                  (last milestone)
//!         = ceil(remaining_budget / remaining_milestones)     (otherwise)
//! ```
//!
//! A budget of 2000 over three milestones pays 667, 667, 666.
//!
//! ## Module Structure
//!
//! ```text
//! rf-04-milestone-tracker/
//! ├── domain/          # MilestoneRecord, SubmissionState, payout rule
//! ├── ports/           # ProjectLedger, ApproverDirectory, AdminDirectory
//! └── tracker.rs       # MilestoneTracker
//! ```

#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod tracker;

pub use domain::{
    milestone_payment, payout_schedule, ApprovalOutcome, MilestoneDetails, MilestoneRecord,
    MilestoneStatus, SubmissionState, TrackerError, TrackerResult,
};
pub use ports::{
    AdminDirectory, ApproverDirectory, FundedProject, MockAdminDirectory, MockApproverDirectory,
    MockProject, MockProjectLedger, ProjectLedger,
};
pub use tracker::MilestoneTracker;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
