//! # Domain Errors
//!
//! Error types for the Validator Registry.

use shared_types::{Address, ClassifiedError, ErrorKind, ResearchAreaId};
use thiserror::Error;

/// Validator registry error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidatorError {
    /// Caller already has a validator record.
    #[error("Only add a new validator: {0} is already registered")]
    AlreadyRegistered(Address),

    /// Research area does not exist.
    #[error("Research ID does not exist: {0}")]
    ResearchAreaNotFound(ResearchAreaId),

    /// Caller is not an admin.
    #[error("Only admin can perform this action: {caller}")]
    NotAdmin {
        /// Rejected caller
        caller: Address,
    },

    /// No validator record for this address.
    #[error("Validator does not exist: {0}")]
    ValidatorNotFound(Address),

    /// Validator exists but has not reached verification quorum.
    #[error("Validator not verified: {0}")]
    NotVerified(Address),

    /// Vote code outside {0, 1}.
    #[error("Invalid verification vote: {0} (expected 0 or 1)")]
    InvalidVote(u8),
}

impl ClassifiedError for ValidatorError {
    fn kind(&self) -> ErrorKind {
        match self {
            ValidatorError::NotAdmin { .. } | ValidatorError::NotVerified(_) => {
                ErrorKind::Unauthorized
            }
            ValidatorError::AlreadyRegistered(_) => ErrorKind::InvalidState,
            ValidatorError::ResearchAreaNotFound(_) | ValidatorError::ValidatorNotFound(_) => {
                ErrorKind::NotFound
            }
            ValidatorError::InvalidVote(_) => ErrorKind::InvalidInput,
        }
    }
}

/// Result type for validator registry operations.
pub type ValidatorResult<T> = Result<T, ValidatorError>;
