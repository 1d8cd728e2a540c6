//! # RF-02 Validator Registry
//!
//! Independent reviewers register themselves against a research area and are
//! vetted by an admin quorum before they may score proposals or approve
//! milestones.
//!
//! **Subsystem ID:** 2  
//! **Depends on:** Admin Registry (1) through [`ports::AdminDirectory`]
//!
//! ## Verification
//!
//! Each admin holds one revocable vote per validator. The positive count is
//! recomputed from the vote ledger on every vote and the status follows it:
//!
//! ```text
//! [UNVERIFIED] ──positive votes >= 3──→ [VERIFIED]
//!      ↑                                    │
//!      └──────── votes retracted below 3 ───┘
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! rf-02-validator-registry/
//! ├── domain/          # Validator, VerificationStatus, VerificationVote
//! ├── ports/           # AdminDirectory (outbound)
//! └── registry.rs      # ValidatorRegistry
//! ```

#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod registry;

pub use domain::{
    Validator, ValidatorError, ValidatorResult, ValidatorView, VerificationStatus,
    VerificationVote, VERIFICATION_QUORUM,
};
pub use ports::{AdminDirectory, MockAdminDirectory};
pub use registry::ValidatorRegistry;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
