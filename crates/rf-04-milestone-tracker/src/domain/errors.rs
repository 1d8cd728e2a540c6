//! # Domain Errors
//!
//! Error types for the Milestone Tracker.

use super::entities::SubmissionState;
use shared_types::{Address, ClassifiedError, ErrorKind};
use thiserror::Error;

/// Milestone tracker error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// No track for this owner (project unknown or not funded).
    #[error("Project does not exist: {0}")]
    TrackNotFound(Address),

    /// The project is no longer in disbursement.
    #[error("Project is not open for milestone funding: {0}")]
    ProjectNotActive(Address),

    /// A track was already opened for this owner.
    #[error("Milestone track already open for {0}")]
    TrackExists(Address),

    /// Tracks need at least one milestone.
    #[error("Milestone count must be positive")]
    InvalidMilestoneCount,

    /// Owner asked again while a decision is outstanding.
    #[error("Milestone approval already requested")]
    AlreadyPending,

    /// Approval called with nothing to decide.
    #[error("No milestone approval pending")]
    NoPendingApproval,

    /// Every milestone has already been paid.
    #[error("All milestones already disbursed")]
    AllDisbursed,

    /// Approver is not a verified validator of the project's area.
    #[error("Only eligible validators can approve milestones: {0}")]
    NotEligibleApprover(Address),

    /// Owners may not approve their own milestones.
    #[error("Project owner cannot approve own milestone")]
    SelfApproval,

    /// Caller is not an admin.
    #[error("Only admin can perform this action: {0}")]
    NotAdmin(Address),

    /// The project registry refused a fund mutation.
    #[error("Funding rejected ({kind}): {reason}")]
    Funding {
        /// Classification of the underlying error
        kind: ErrorKind,
        /// Underlying reason string
        reason: String,
    },

    /// Unexpected state for the operation.
    #[error("Invalid milestone state: {0:?}")]
    InvalidState(SubmissionState),
}

impl TrackerError {
    /// Wrap an error returned by the project registry.
    pub fn funding<E: ClassifiedError>(err: E) -> Self {
        TrackerError::Funding {
            kind: err.kind(),
            reason: err.to_string(),
        }
    }
}

impl ClassifiedError for TrackerError {
    fn kind(&self) -> ErrorKind {
        match self {
            TrackerError::NotEligibleApprover(_)
            | TrackerError::SelfApproval
            | TrackerError::NotAdmin(_) => ErrorKind::Unauthorized,
            TrackerError::TrackExists(_)
            | TrackerError::AlreadyPending
            | TrackerError::NoPendingApproval
            | TrackerError::AllDisbursed
            | TrackerError::ProjectNotActive(_)
            | TrackerError::InvalidState(_) => ErrorKind::InvalidState,
            TrackerError::TrackNotFound(_) => ErrorKind::NotFound,
            TrackerError::InvalidMilestoneCount => ErrorKind::InvalidInput,
            TrackerError::Funding { kind, .. } => *kind,
        }
    }
}

/// Result type for milestone tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;
