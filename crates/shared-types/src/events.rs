//! # Domain Events
//!
//! Every successful mutation emits one or more events. Registries buffer them
//! and the runtime drains the buffer only after the whole transition has
//! committed, so a rolled-back call never leaks an event.

use crate::entities::{Address, Amount, ResearchAreaId, Timestamp};
use serde::{Deserialize, Serialize};

/// Which registry produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventSource {
    /// Admin / research-area registry.
    Admin,
    /// Validator registry.
    Validator,
    /// Project registry.
    Project,
    /// Milestone tracker.
    Milestone,
}

/// A state change recorded by one of the registries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainEvent {
    // =========================================================================
    // ADMIN REGISTRY
    // =========================================================================
    /// A new admin joined the admin set.
    AdminAdded { admin: Address },

    /// A research area was configured.
    ResearchAreaAdded {
        id: ResearchAreaId,
        milestone_count: u32,
        round: u32,
        budget: Amount,
    },

    // =========================================================================
    // VALIDATOR REGISTRY
    // =========================================================================
    /// A validator self-registered.
    ValidatorRegistered {
        validator: Address,
        research_area: ResearchAreaId,
    },

    /// An admin cast or changed a verification vote.
    VerificationVoteCast {
        validator: Address,
        admin: Address,
        approve: bool,
        positive_votes: u32,
        verified: bool,
    },

    // =========================================================================
    // PROJECT REGISTRY
    // =========================================================================
    /// A proposal was registered.
    ProjectRegistered {
        owner: Address,
        research_area: ResearchAreaId,
        budget_estimate: Amount,
        milestone_count: u32,
    },

    /// A validator's ballot was accepted.
    BallotCast {
        owner: Address,
        validator: Address,
        yes_answers: u32,
        score: u64,
        ballots: u32,
    },

    /// The proposal reached ballot quorum and joined the fundable pool.
    ProjectScored { owner: Address, score: u64 },

    /// The proposal was funded by a selection run.
    ProjectSelected {
        owner: Address,
        research_area: ResearchAreaId,
        budget_estimate: Amount,
        score: u64,
    },

    /// Summary of one selection run.
    SelectionCompleted {
        research_area: ResearchAreaId,
        selected: u32,
        deferred: u32,
        committed_budget: Amount,
        remaining_budget: Amount,
    },

    /// The address allowed to credit funds changed.
    MilestoneAuthorityChanged {
        previous: Option<Address>,
        current: Address,
    },

    /// Regular milestone funds were credited.
    FundsCredited {
        owner: Address,
        amount: Amount,
        total: Amount,
    },

    /// Bonus / adjustment funds were credited.
    AdditionalFundsCredited {
        owner: Address,
        amount: Amount,
        total: Amount,
    },

    /// All milestones paid; the proposal is closed.
    ProjectCompleted { owner: Address },

    // =========================================================================
    // MILESTONE TRACKER
    // =========================================================================
    /// A disbursement track was opened for a funded proposal.
    MilestoneTrackOpened { owner: Address, milestone_count: u32 },

    /// The owner asked for the current milestone to be reviewed.
    MilestoneApprovalRequested { owner: Address, milestone_index: u32 },

    /// A validator approved the pending milestone.
    MilestoneApproved {
        owner: Address,
        approver: Address,
        milestone_index: u32,
        payment: Amount,
        completed_at: Timestamp,
    },

    /// A validator rejected the pending milestone.
    MilestoneRejected {
        owner: Address,
        approver: Address,
        milestone_index: u32,
    },
}

impl DomainEvent {
    /// Registry that produced this event.
    pub fn source(&self) -> EventSource {
        match self {
            DomainEvent::AdminAdded { .. } | DomainEvent::ResearchAreaAdded { .. } => {
                EventSource::Admin
            }
            DomainEvent::ValidatorRegistered { .. } | DomainEvent::VerificationVoteCast { .. } => {
                EventSource::Validator
            }
            DomainEvent::ProjectRegistered { .. }
            | DomainEvent::BallotCast { .. }
            | DomainEvent::ProjectScored { .. }
            | DomainEvent::ProjectSelected { .. }
            | DomainEvent::SelectionCompleted { .. }
            | DomainEvent::MilestoneAuthorityChanged { .. }
            | DomainEvent::FundsCredited { .. }
            | DomainEvent::AdditionalFundsCredited { .. }
            | DomainEvent::ProjectCompleted { .. } => EventSource::Project,
            DomainEvent::MilestoneTrackOpened { .. }
            | DomainEvent::MilestoneApprovalRequested { .. }
            | DomainEvent::MilestoneApproved { .. }
            | DomainEvent::MilestoneRejected { .. } => EventSource::Milestone,
        }
    }

    /// Whether the event moved money or changed who may move it.
    pub fn is_financial(&self) -> bool {
        matches!(
            self,
            DomainEvent::FundsCredited { .. }
                | DomainEvent::AdditionalFundsCredited { .. }
                | DomainEvent::MilestoneAuthorityChanged { .. }
                | DomainEvent::MilestoneApproved { .. }
        )
    }
}
