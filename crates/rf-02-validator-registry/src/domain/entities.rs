//! # Domain Entities
//!
//! Validator records and the admin vote ledger.

use super::errors::ValidatorError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, ResearchAreaId};
use std::collections::BTreeMap;

/// Positive admin votes required for a validator to be verified.
///
/// Fixed, independent of how many admins exist.
pub const VERIFICATION_QUORUM: u32 = 3;

/// Verification status of a validator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationStatus {
    /// Below quorum.
    #[default]
    Unverified,
    /// At or above quorum.
    Verified,
}

impl VerificationStatus {
    /// Status implied by a positive-vote count.
    pub fn from_positive_votes(positive_votes: u32) -> Self {
        if positive_votes >= VERIFICATION_QUORUM {
            VerificationStatus::Verified
        } else {
            VerificationStatus::Unverified
        }
    }

    /// Numeric code exposed to presentation clients.
    pub fn code(&self) -> u8 {
        match self {
            VerificationStatus::Unverified => 0,
            VerificationStatus::Verified => 1,
        }
    }
}

/// One admin's vote on a validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationVote {
    /// Vote code 0.
    Reject,
    /// Vote code 1.
    Approve,
}

impl TryFrom<u8> for VerificationVote {
    type Error = ValidatorError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(VerificationVote::Reject),
            1 => Ok(VerificationVote::Approve),
            other => Err(ValidatorError::InvalidVote(other)),
        }
    }
}

impl From<bool> for VerificationVote {
    fn from(approve: bool) -> Self {
        if approve {
            VerificationVote::Approve
        } else {
            VerificationVote::Reject
        }
    }
}

/// A registered validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    /// Validator address (registration caller).
    pub address: Address,
    /// Research area chosen at registration; immutable.
    pub research_area: ResearchAreaId,
    /// Current status, always derived from `votes`.
    pub status: VerificationStatus,
    /// Count of `Approve` entries in `votes`.
    pub positive_votes: u32,
    /// Latest vote per admin.
    pub votes: BTreeMap<Address, VerificationVote>,
}

impl Validator {
    /// New unverified validator.
    pub fn new(address: Address, research_area: ResearchAreaId) -> Self {
        Self {
            address,
            research_area,
            status: VerificationStatus::Unverified,
            positive_votes: 0,
            votes: BTreeMap::new(),
        }
    }

    /// Record (or overwrite) `admin`'s vote and recompute status.
    ///
    /// Returns `true` when the status changed.
    pub fn record_vote(&mut self, admin: Address, vote: VerificationVote) -> bool {
        self.votes.insert(admin, vote);
        self.positive_votes = self
            .votes
            .values()
            .filter(|v| **v == VerificationVote::Approve)
            .count() as u32;

        let previous = self.status;
        self.status = VerificationStatus::from_positive_votes(self.positive_votes);
        previous != self.status
    }

    /// Whether quorum has been reached.
    pub fn is_verified(&self) -> bool {
        self.status == VerificationStatus::Verified
    }

    /// Public read view.
    pub fn view(&self) -> ValidatorView {
        ValidatorView {
            address: self.address,
            research_area: self.research_area,
            status: self.status,
            positive_votes: self.positive_votes,
        }
    }
}

/// Public read view of a validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorView {
    /// Validator address.
    pub address: Address,
    /// Assigned research area.
    pub research_area: ResearchAreaId,
    /// Verification status.
    pub status: VerificationStatus,
    /// Positive admin votes.
    pub positive_votes: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    #[test]
    fn test_vote_codes() {
        assert_eq!(VerificationVote::try_from(0), Ok(VerificationVote::Reject));
        assert_eq!(VerificationVote::try_from(1), Ok(VerificationVote::Approve));
        assert_eq!(
            VerificationVote::try_from(2),
            Err(ValidatorError::InvalidVote(2))
        );
    }

    #[test]
    fn test_quorum_reached_on_third_vote() {
        let mut v = Validator::new(admin(0xaa), 1);
        assert!(!v.record_vote(admin(1), VerificationVote::Approve));
        assert!(!v.record_vote(admin(2), VerificationVote::Approve));
        assert!(!v.is_verified());
        assert!(v.record_vote(admin(3), VerificationVote::Approve));
        assert!(v.is_verified());
        assert_eq!(v.positive_votes, 3);
    }

    #[test]
    fn test_same_admin_counts_once() {
        let mut v = Validator::new(admin(0xaa), 1);
        for _ in 0..5 {
            v.record_vote(admin(1), VerificationVote::Approve);
        }
        assert_eq!(v.positive_votes, 1);
        assert!(!v.is_verified());
    }

    #[test]
    fn test_retraction_drops_below_quorum() {
        let mut v = Validator::new(admin(0xaa), 1);
        for byte in 1..=3 {
            v.record_vote(admin(byte), VerificationVote::Approve);
        }
        assert!(v.is_verified());

        assert!(v.record_vote(admin(2), VerificationVote::Reject));
        assert_eq!(v.positive_votes, 2);
        assert_eq!(v.status, VerificationStatus::Unverified);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(VerificationStatus::Unverified.code(), 0);
        assert_eq!(VerificationStatus::Verified.code(), 1);
        assert_eq!(
            VerificationStatus::from_positive_votes(VERIFICATION_QUORUM),
            VerificationStatus::Verified
        );
    }
}
