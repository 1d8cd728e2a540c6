//! # Validator Registry
//!
//! One record per address; admins vote records into (and out of) the
//! verified set.

use crate::domain::{
    Validator, ValidatorError, ValidatorResult, ValidatorView, VerificationVote,
};
use crate::ports::AdminDirectory;
use serde::{Deserialize, Serialize};
use shared_types::{Address, DomainEvent, ResearchAreaId};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Validator registry.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ValidatorRegistry {
    /// Validator records by address.
    validators: HashMap<Address, Validator>,
    /// Addresses in registration order.
    registration_order: Vec<Address>,
    /// Events not yet drained by the runtime.
    #[serde(skip)]
    pending_events: Vec<DomainEvent>,
}

impl ValidatorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Self-register `caller` as a validator for `research_area`.
    pub fn register_validator<A: AdminDirectory>(
        &mut self,
        caller: Address,
        research_area: ResearchAreaId,
        admins: &A,
    ) -> ValidatorResult<()> {
        if self.validators.contains_key(&caller) {
            return Err(ValidatorError::AlreadyRegistered(caller));
        }
        if !admins.research_area_exists(research_area) {
            return Err(ValidatorError::ResearchAreaNotFound(research_area));
        }

        self.validators
            .insert(caller, Validator::new(caller, research_area));
        self.registration_order.push(caller);
        info!(validator = %caller, research_area, "Validator registered");
        self.pending_events.push(DomainEvent::ValidatorRegistered {
            validator: caller,
            research_area,
        });
        Ok(())
    }

    /// Record `caller`'s verification vote for `validator`.
    ///
    /// Overwrites any earlier vote by the same admin. Status is recomputed
    /// from the whole vote ledger, so a retraction can un-verify.
    pub fn cast_verification_vote<A: AdminDirectory>(
        &mut self,
        caller: Address,
        validator: Address,
        vote: VerificationVote,
        admins: &A,
    ) -> ValidatorResult<()> {
        if !admins.is_admin(&caller) {
            return Err(ValidatorError::NotAdmin { caller });
        }
        let record = self
            .validators
            .get_mut(&validator)
            .ok_or(ValidatorError::ValidatorNotFound(validator))?;

        let changed = record.record_vote(caller, vote);
        let verified = record.is_verified();
        let positive_votes = record.positive_votes;

        if changed && verified {
            info!(%validator, positive_votes, "Validator verified");
        } else if changed {
            warn!(%validator, positive_votes, "Validator fell below verification quorum");
        } else {
            debug!(%validator, admin = %caller, ?vote, positive_votes, "Verification vote recorded");
        }

        self.pending_events.push(DomainEvent::VerificationVoteCast {
            validator,
            admin: caller,
            approve: vote == VerificationVote::Approve,
            positive_votes,
            verified,
        });
        Ok(())
    }

    /// Public view of a verified validator.
    ///
    /// Unverified records are not disclosed through this path; admins use
    /// [`Self::inspect_validator`].
    pub fn validator(&self, address: &Address) -> ValidatorResult<ValidatorView> {
        let record = self
            .validators
            .get(address)
            .ok_or(ValidatorError::ValidatorNotFound(*address))?;
        if !record.is_verified() {
            return Err(ValidatorError::NotVerified(*address));
        }
        Ok(record.view())
    }

    /// Raw record for an admin deciding how to vote, verified or not.
    pub fn inspect_validator<A: AdminDirectory>(
        &self,
        caller: Address,
        address: &Address,
        admins: &A,
    ) -> ValidatorResult<&Validator> {
        if !admins.is_admin(&caller) {
            return Err(ValidatorError::NotAdmin { caller });
        }
        self.validators
            .get(address)
            .ok_or(ValidatorError::ValidatorNotFound(*address))
    }

    /// Verified validator check used by ballot casting and milestone review.
    ///
    /// Fails with `NotVerified` for unknown or unverified callers.
    pub fn require_verified(&self, address: &Address) -> ValidatorResult<&Validator> {
        match self.validators.get(address) {
            Some(record) if record.is_verified() => Ok(record),
            _ => Err(ValidatorError::NotVerified(*address)),
        }
    }

    /// Whether `address` is a verified validator of `research_area`.
    pub fn is_eligible(&self, address: &Address, research_area: ResearchAreaId) -> bool {
        self.validators
            .get(address)
            .is_some_and(|v| v.is_verified() && v.research_area == research_area)
    }

    /// Validators registered for an area, in registration order.
    pub fn validators_in_area(&self, research_area: ResearchAreaId) -> Vec<Address> {
        self.registration_order
            .iter()
            .filter(|addr| {
                self.validators
                    .get(*addr)
                    .is_some_and(|v| v.research_area == research_area)
            })
            .copied()
            .collect()
    }

    /// Number of registered validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether no validator is registered.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Drain buffered events.
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
