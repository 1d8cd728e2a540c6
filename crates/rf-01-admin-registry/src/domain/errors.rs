//! # Domain Errors
//!
//! Error types for the Admin Registry. Messages keep the reason strings
//! callers already match on.

use shared_types::{Address, ClassifiedError, ErrorKind, ResearchAreaId};
use thiserror::Error;

/// Admin registry error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminError {
    /// Caller is not the super-admin.
    #[error("Only super admin can perform this action: {caller}")]
    NotSuperAdmin {
        /// Rejected caller
        caller: Address,
    },

    /// Caller is not an admin.
    #[error("Only admin can perform this action: {caller}")]
    NotAdmin {
        /// Rejected caller
        caller: Address,
    },

    /// Address is already in the admin set.
    #[error("Admin already exists: {0}")]
    AdminAlreadyExists(Address),

    /// Zero address cannot hold a role.
    #[error("Zero address cannot be an admin")]
    ZeroAddress,

    /// Research area id already taken.
    #[error("Research ID already exists: {0}")]
    ResearchAreaExists(ResearchAreaId),

    /// Unknown research area.
    #[error("Research ID does not exist: {0}")]
    ResearchAreaNotFound(ResearchAreaId),

    /// Research area needs at least one milestone.
    #[error("Milestone count must be positive")]
    InvalidMilestoneCount,
}

impl ClassifiedError for AdminError {
    fn kind(&self) -> ErrorKind {
        match self {
            AdminError::NotSuperAdmin { .. } | AdminError::NotAdmin { .. } => {
                ErrorKind::Unauthorized
            }
            AdminError::AdminAlreadyExists(_) | AdminError::ResearchAreaExists(_) => {
                ErrorKind::InvalidState
            }
            AdminError::ResearchAreaNotFound(_) => ErrorKind::NotFound,
            AdminError::ZeroAddress | AdminError::InvalidMilestoneCount => {
                ErrorKind::InvalidInput
            }
        }
    }
}

/// Result type for admin registry operations.
pub type AdminResult<T> = Result<T, AdminError>;
