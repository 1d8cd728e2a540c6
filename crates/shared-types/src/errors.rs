//! # Error Taxonomy
//!
//! Every registry error classifies itself into one of a few kinds so callers
//! (and the audit log) can branch without matching on each crate's enum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad category of a rejected ledger call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Caller lacks the required role.
    Unauthorized,
    /// Operation is invalid for the current status.
    InvalidState,
    /// Lookup on an unknown key.
    NotFound,
    /// Malformed argument (bad ballot, zero budget, out-of-range vote).
    InvalidInput,
    /// The call would break a fund-accounting invariant.
    ///
    /// Unreachable through the public API; seeing one means a bug.
    InvariantViolation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::InvalidState => "invalid-state",
            ErrorKind::NotFound => "not-found",
            ErrorKind::InvalidInput => "invalid-input",
            ErrorKind::InvariantViolation => "invariant-violation",
        };
        f.write_str(name)
    }
}

/// Implemented by every registry error enum.
pub trait ClassifiedError: std::error::Error {
    /// The category of this error.
    fn kind(&self) -> ErrorKind;

    /// Whether this error signals a broken invariant rather than a bad call.
    fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::InvariantViolation
    }
}
