//! # Outbound Ports
//!
//! What the Project Registry needs from the other registries.

use crate::domain::{ProjectError, ProjectResult};
use shared_types::{Address, Amount, ResearchAreaId};
use std::collections::{HashMap, HashSet};

/// Funding terms of a research area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AreaTerms {
    /// Milestones per funded project.
    pub milestone_count: u32,
    /// Total area budget.
    pub budget: Amount,
}

/// Admin registry view - outbound port.
pub trait FundingDirectory {
    /// Whether `address` is an admin.
    fn is_admin(&self, address: &Address) -> bool;

    /// Terms of an existing area, `None` when unknown.
    fn research_area(&self, id: ResearchAreaId) -> Option<AreaTerms>;
}

/// Validator registry view - outbound port.
pub trait ValidatorDirectory {
    /// Research area of a *verified* validator; `None` if unknown or unverified.
    fn verified_area(&self, address: &Address) -> Option<ResearchAreaId>;
}

/// Milestone tracker callback - outbound port.
///
/// Invoked once per project that a selection run funds.
pub trait MilestoneTrackOpener {
    /// Whether a track already exists for `owner`.
    fn has_track(&self, owner: &Address) -> bool;

    /// Open the disbursement track for a newly funded project.
    fn open_track(&mut self, owner: Address, milestone_count: u32) -> ProjectResult<()>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock admin registry.
#[derive(Clone, Debug, Default)]
pub struct MockFundingDirectory {
    /// Admin addresses.
    pub admins: HashSet<Address>,
    /// Areas by id.
    pub areas: HashMap<ResearchAreaId, AreaTerms>,
}

impl MockFundingDirectory {
    /// Mock with the given admins.
    pub fn new(admins: &[Address]) -> Self {
        Self {
            admins: admins.iter().copied().collect(),
            areas: HashMap::new(),
        }
    }

    /// Add an area.
    pub fn with_area(mut self, id: ResearchAreaId, milestone_count: u32, budget: Amount) -> Self {
        self.areas.insert(
            id,
            AreaTerms {
                milestone_count,
                budget,
            },
        );
        self
    }
}

impl FundingDirectory for MockFundingDirectory {
    fn is_admin(&self, address: &Address) -> bool {
        self.admins.contains(address)
    }

    fn research_area(&self, id: ResearchAreaId) -> Option<AreaTerms> {
        self.areas.get(&id).copied()
    }
}

/// Mock validator registry: listed validators are verified for their area.
#[derive(Clone, Debug, Default)]
pub struct MockValidatorDirectory {
    /// Verified validators and their area.
    pub verified: HashMap<Address, ResearchAreaId>,
}

impl MockValidatorDirectory {
    /// Mock where every address in `validators` is verified for `area`.
    pub fn verified_for(area: ResearchAreaId, validators: &[Address]) -> Self {
        Self {
            verified: validators.iter().map(|v| (*v, area)).collect(),
        }
    }
}

impl ValidatorDirectory for MockValidatorDirectory {
    fn verified_area(&self, address: &Address) -> Option<ResearchAreaId> {
        self.verified.get(address).copied()
    }
}

/// Mock milestone tracker that records opened tracks.
#[derive(Clone, Debug, Default)]
pub struct MockTrackOpener {
    /// Opened tracks in order, with their milestone count.
    pub opened: Vec<(Address, u32)>,
    /// Refuse to open a track for this owner.
    pub fail_for: Option<Address>,
}

impl MilestoneTrackOpener for MockTrackOpener {
    fn has_track(&self, owner: &Address) -> bool {
        self.opened.iter().any(|(o, _)| o == owner)
    }

    fn open_track(&mut self, owner: Address, milestone_count: u32) -> ProjectResult<()> {
        if self.fail_for == Some(owner) {
            return Err(ProjectError::MilestoneTrack(format!(
                "refused track for {owner}"
            )));
        }
        self.opened.push((owner, milestone_count));
        Ok(())
    }
}
