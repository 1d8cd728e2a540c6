//! # Ledger Errors
//!
//! One error type for every rejected call, wrapping the registry errors.

use rf_01_admin_registry::AdminError;
use rf_02_validator_registry::ValidatorError;
use rf_03_project_registry::ProjectError;
use rf_04_milestone_tracker::TrackerError;
use shared_bus::ReplayError;
use shared_types::{ClassifiedError, ErrorKind};
use thiserror::Error;

/// Ledger error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Rejected by the admin registry.
    #[error(transparent)]
    Admin(#[from] AdminError),

    /// Rejected by the validator registry.
    #[error(transparent)]
    Validator(#[from] ValidatorError),

    /// Rejected by the project registry.
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// Rejected by the milestone tracker.
    #[error(transparent)]
    Milestone(#[from] TrackerError),

    /// Request id already applied, or issued outside the accepted window.
    #[error("Replay rejected: {0}")]
    Replay(#[from] ReplayError),

    /// The single-writer service has stopped.
    #[error("Ledger service unavailable")]
    ServiceUnavailable,

    /// Snapshot could not be encoded or decoded.
    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

impl ClassifiedError for LedgerError {
    fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Admin(e) => e.kind(),
            LedgerError::Validator(e) => e.kind(),
            LedgerError::Project(e) => e.kind(),
            LedgerError::Milestone(e) => e.kind(),
            LedgerError::Replay(_) | LedgerError::ServiceUnavailable => ErrorKind::InvalidState,
            LedgerError::Snapshot(_) => ErrorKind::InvalidInput,
        }
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
