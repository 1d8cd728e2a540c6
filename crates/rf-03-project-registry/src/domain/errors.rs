//! # Domain Errors
//!
//! Error types for the Project Registry.

use super::entities::ProjectStatus;
use shared_types::{Address, Amount, ClassifiedError, ErrorKind, ResearchAreaId};
use thiserror::Error;

/// Project registry error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    /// Caller already owns a proposal.
    #[error("Project already exists for owner {0}")]
    AlreadyRegistered(Address),

    /// Research area does not exist.
    #[error("Research ID does not exist: {0}")]
    ResearchAreaNotFound(ResearchAreaId),

    /// Budget estimate must be positive.
    #[error("Budget estimate must be positive")]
    ZeroBudget,

    /// Unknown proposal.
    #[error("Project does not exist: {0}")]
    ProjectNotFound(Address),

    /// Caller is not a verified validator.
    #[error("Validator not verified: {0}")]
    ValidatorNotVerified(Address),

    /// Validator belongs to another research area.
    #[error("Validator research area {validator_area} does not match project research area {project_area}")]
    ResearchAreaMismatch {
        /// Area the validator is registered for
        validator_area: ResearchAreaId,
        /// Area of the project
        project_area: ResearchAreaId,
    },

    /// Owners may not score their own proposal.
    #[error("Project owner cannot score own project")]
    SelfScoring,

    /// Second ballot by the same validator.
    #[error("The validator has already scored this project")]
    AlreadyScored,

    /// Ballots are closed once the proposal is funded.
    #[error("Project no longer accepts ballots (status {0:?})")]
    BallotClosed(ProjectStatus),

    /// Malformed ballot bitstring.
    #[error("Invalid ballot: {0}")]
    InvalidBallot(String),

    /// Caller may not run selection.
    #[error("Not authorized: {0}")]
    NotAuthorized(Address),

    /// Caller is not the registry owner.
    #[error("Only owner can set milestone contract address")]
    NotOwner(Address),

    /// Caller is not the configured milestone authority.
    #[error("Only Milestone contract can update funds")]
    NotMilestoneAuthority(Address),

    /// Zero address passed where a principal is required.
    #[error("Zero address is not allowed")]
    ZeroAddress,

    /// Credit amount must be positive.
    #[error("Credit amount must be positive")]
    ZeroAmount,

    /// Operation needs a funded proposal.
    #[error("Project {owner} is not funded (status {status:?})")]
    NotFunded {
        /// Proposal owner
        owner: Address,
        /// Its current status
        status: ProjectStatus,
    },

    /// Illegal status change.
    #[error("Invalid status transition: {from:?} -> {to:?}")]
    InvalidTransition {
        /// Current status
        from: ProjectStatus,
        /// Attempted status
        to: ProjectStatus,
    },

    /// Milestone tracker refused to open a track.
    #[error("Milestone track error: {0}")]
    MilestoneTrack(String),

    /// Crediting would exceed the budget estimate.
    #[error("Funds would exceed budget estimate for {owner}: {attempted} > {budget}")]
    BudgetExceeded {
        /// Proposal owner
        owner: Address,
        /// Total after the credit
        attempted: Amount,
        /// Budget estimate
        budget: Amount,
    },

    /// Completion requested before full disbursement.
    #[error("Project {owner} not fully disbursed: {received}/{budget}")]
    IncompleteDisbursement {
        /// Proposal owner
        owner: Address,
        /// Funds received so far
        received: Amount,
        /// Budget estimate
        budget: Amount,
    },

    /// Selection would commit more than the area budget.
    #[error("Selection exceeds research area {research_area} budget")]
    SelectionOverBudget {
        /// Research area
        research_area: ResearchAreaId,
    },

    /// Arithmetic overflow in an accumulator.
    #[error("Arithmetic overflow in {0}")]
    Overflow(&'static str),
}

impl ClassifiedError for ProjectError {
    fn kind(&self) -> ErrorKind {
        match self {
            ProjectError::ValidatorNotVerified(_)
            | ProjectError::ResearchAreaMismatch { .. }
            | ProjectError::SelfScoring
            | ProjectError::NotAuthorized(_)
            | ProjectError::NotOwner(_)
            | ProjectError::NotMilestoneAuthority(_) => ErrorKind::Unauthorized,
            ProjectError::AlreadyRegistered(_)
            | ProjectError::AlreadyScored
            | ProjectError::BallotClosed(_)
            | ProjectError::NotFunded { .. }
            | ProjectError::InvalidTransition { .. }
            | ProjectError::MilestoneTrack(_) => ErrorKind::InvalidState,
            ProjectError::ResearchAreaNotFound(_) | ProjectError::ProjectNotFound(_) => {
                ErrorKind::NotFound
            }
            ProjectError::ZeroBudget
            | ProjectError::InvalidBallot(_)
            | ProjectError::ZeroAddress
            | ProjectError::ZeroAmount => ErrorKind::InvalidInput,
            ProjectError::BudgetExceeded { .. }
            | ProjectError::IncompleteDisbursement { .. }
            | ProjectError::SelectionOverBudget { .. }
            | ProjectError::Overflow(_) => ErrorKind::InvariantViolation,
        }
    }
}

/// Result type for project registry operations.
pub type ProjectResult<T> = Result<T, ProjectError>;
