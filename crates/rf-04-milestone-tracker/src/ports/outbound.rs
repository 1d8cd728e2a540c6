//! # Outbound Ports
//!
//! What the Milestone Tracker needs from the other registries. Fund
//! mutations always carry the tracker's own address so the project registry
//! can check it against the configured milestone authority.

use crate::domain::{TrackerError, TrackerResult};
use shared_types::{Address, Amount, ErrorKind, ResearchAreaId};
use std::collections::{HashMap, HashSet};

/// Funding state of a project, as the tracker needs it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FundedProject {
    /// Research area of the project.
    pub research_area: ResearchAreaId,
    /// Budget estimate.
    pub budget_estimate: Amount,
    /// Milestone funds credited so far.
    pub funds_received: Amount,
}

impl FundedProject {
    /// Budget not yet paid out.
    pub fn remaining_budget(&self) -> Amount {
        self.budget_estimate.saturating_sub(self.funds_received)
    }
}

/// Project registry - outbound port.
pub trait ProjectLedger {
    /// Funding state of `owner`'s project while it is still being paid out.
    /// `None` when unknown, not selected, or already completed.
    fn funded_project(&self, owner: &Address) -> Option<FundedProject>;

    /// Credit milestone funds. Returns the new total.
    fn credit_funds(
        &mut self,
        authority: Address,
        owner: Address,
        amount: Amount,
    ) -> TrackerResult<Amount>;

    /// Credit bonus funds. Returns the new bonus total.
    fn credit_additional_funds(
        &mut self,
        authority: Address,
        owner: Address,
        amount: Amount,
    ) -> TrackerResult<Amount>;

    /// Close a fully disbursed project.
    fn mark_completed(&mut self, authority: Address, owner: Address) -> TrackerResult<()>;
}

/// Validator registry - outbound port.
pub trait ApproverDirectory {
    /// Research area of a *verified* validator; `None` if unknown or unverified.
    fn verified_area(&self, address: &Address) -> Option<ResearchAreaId>;
}

/// Admin registry - outbound port.
pub trait AdminDirectory {
    /// Whether `address` is an admin.
    fn is_admin(&self, address: &Address) -> bool;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock project held by [`MockProjectLedger`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MockProject {
    /// Research area.
    pub research_area: ResearchAreaId,
    /// Budget estimate.
    pub budget_estimate: Amount,
    /// Milestone funds received.
    pub funds_received: Amount,
    /// Bonus funds received.
    pub additional_funds_received: Amount,
    /// Whether `mark_completed` ran.
    pub completed: bool,
}

/// Mock project registry enforcing the authority check and budget bound.
#[derive(Clone, Debug, Default)]
pub struct MockProjectLedger {
    /// Only address allowed to mutate funds.
    pub authority: Address,
    /// Projects by owner.
    pub projects: HashMap<Address, MockProject>,
}

impl MockProjectLedger {
    /// Empty ledger accepting credits from `authority`.
    pub fn new(authority: Address) -> Self {
        Self {
            authority,
            projects: HashMap::new(),
        }
    }

    /// Add a funded project.
    pub fn with_project(mut self, owner: Address, research_area: ResearchAreaId, budget: Amount) -> Self {
        self.projects.insert(
            owner,
            MockProject {
                research_area,
                budget_estimate: budget,
                ..Default::default()
            },
        );
        self
    }

    fn check(&self, authority: Address) -> TrackerResult<()> {
        if authority != self.authority {
            return Err(TrackerError::Funding {
                kind: ErrorKind::Unauthorized,
                reason: "Only Milestone contract can update funds".to_string(),
            });
        }
        Ok(())
    }

    fn project_mut(&mut self, owner: Address) -> TrackerResult<&mut MockProject> {
        self.projects
            .get_mut(&owner)
            .ok_or(TrackerError::TrackNotFound(owner))
    }
}

impl ProjectLedger for MockProjectLedger {
    fn funded_project(&self, owner: &Address) -> Option<FundedProject> {
        self.projects.get(owner).filter(|p| !p.completed).map(|p| FundedProject {
            research_area: p.research_area,
            budget_estimate: p.budget_estimate,
            funds_received: p.funds_received,
        })
    }

    fn credit_funds(&mut self, authority: Address, owner: Address, amount: Amount) -> TrackerResult<Amount> {
        self.check(authority)?;
        let project = self.project_mut(owner)?;
        let total = project.funds_received + amount;
        if total > project.budget_estimate {
            return Err(TrackerError::Funding {
                kind: ErrorKind::InvariantViolation,
                reason: "over budget".to_string(),
            });
        }
        project.funds_received = total;
        Ok(total)
    }

    fn credit_additional_funds(
        &mut self,
        authority: Address,
        owner: Address,
        amount: Amount,
    ) -> TrackerResult<Amount> {
        self.check(authority)?;
        let project = self.project_mut(owner)?;
        project.additional_funds_received += amount;
        Ok(project.additional_funds_received)
    }

    fn mark_completed(&mut self, authority: Address, owner: Address) -> TrackerResult<()> {
        self.check(authority)?;
        let project = self.project_mut(owner)?;
        if project.funds_received != project.budget_estimate {
            return Err(TrackerError::Funding {
                kind: ErrorKind::InvariantViolation,
                reason: "not fully disbursed".to_string(),
            });
        }
        project.completed = true;
        Ok(())
    }
}

/// Mock validator registry: listed validators are verified for their area.
#[derive(Clone, Debug, Default)]
pub struct MockApproverDirectory {
    /// Verified validators and their area.
    pub verified: HashMap<Address, ResearchAreaId>,
}

impl MockApproverDirectory {
    /// Mock where every address in `validators` is verified for `area`.
    pub fn verified_for(area: ResearchAreaId, validators: &[Address]) -> Self {
        Self {
            verified: validators.iter().map(|v| (*v, area)).collect(),
        }
    }
}

impl ApproverDirectory for MockApproverDirectory {
    fn verified_area(&self, address: &Address) -> Option<ResearchAreaId> {
        self.verified.get(address).copied()
    }
}

/// Mock admin registry.
#[derive(Clone, Debug, Default)]
pub struct MockAdminDirectory {
    /// Admin addresses.
    pub admins: HashSet<Address>,
}

impl MockAdminDirectory {
    /// Mock with the given admins.
    pub fn new(admins: &[Address]) -> Self {
        Self {
            admins: admins.iter().copied().collect(),
        }
    }
}

impl AdminDirectory for MockAdminDirectory {
    fn is_admin(&self, address: &Address) -> bool {
        self.admins.contains(address)
    }
}
