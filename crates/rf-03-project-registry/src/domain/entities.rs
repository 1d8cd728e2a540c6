//! # Domain Entities
//!
//! Proposals and the ballots validators cast on them.

use super::errors::{ProjectError, ProjectResult};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, ResearchAreaId};

/// Ballots needed to move a proposal into the fundable pool.
pub const BALLOT_QUORUM: u32 = 5;

/// Proposal status.
///
/// State progression: Pending → Scored → Selected → Completed. Never
/// regresses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    /// Collecting ballots.
    #[default]
    Pending,
    /// Ballot quorum reached; in the fundable pool.
    Scored,
    /// Funded by a selection run; milestones in progress.
    Selected,
    /// Fully disbursed.
    Completed,
}

impl ProjectStatus {
    /// Whether `next` is the single legal successor of `self`.
    pub fn can_transition_to(&self, next: ProjectStatus) -> bool {
        matches!(
            (self, next),
            (ProjectStatus::Pending, ProjectStatus::Scored)
                | (ProjectStatus::Scored, ProjectStatus::Selected)
                | (ProjectStatus::Selected, ProjectStatus::Completed)
        )
    }

    /// Whether validators may still ballot.
    pub fn accepts_ballots(&self) -> bool {
        matches!(self, ProjectStatus::Pending | ProjectStatus::Scored)
    }

    /// Whether the proposal holds a share of its area budget.
    pub fn is_funded(&self) -> bool {
        matches!(self, ProjectStatus::Selected | ProjectStatus::Completed)
    }

    /// Numeric code exposed to presentation clients (0 means "no project").
    pub fn code(&self) -> u8 {
        match self {
            ProjectStatus::Pending => 1,
            ProjectStatus::Scored => 2,
            ProjectStatus::Selected => 3,
            ProjectStatus::Completed => 4,
        }
    }
}

/// One validator's ballot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    /// Validator who cast it.
    pub validator: Address,
    /// Yes/no answers as a `0`/`1` string.
    pub choices: String,
}

/// A research proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Owner address; also the registry key.
    pub owner: Address,
    /// Research area, fixed at registration.
    pub research_area: ResearchAreaId,
    /// Requested budget.
    pub budget_estimate: Amount,
    /// Milestone count copied from the area at registration.
    pub milestone_count: u32,
    /// Sum of yes answers over all ballots.
    pub score: u64,
    /// Ballots received.
    pub total_ballots: u32,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// Milestone funds credited so far.
    pub funds_received: Amount,
    /// Bonus / adjustment funds credited so far.
    pub additional_funds_received: Amount,
    /// Ballots in the order they were cast.
    pub ballots: Vec<Ballot>,
    /// Registration sequence; the selection tie-break.
    pub sequence: u64,
}

impl Project {
    /// New pending proposal.
    pub fn new(
        owner: Address,
        research_area: ResearchAreaId,
        budget_estimate: Amount,
        milestone_count: u32,
        sequence: u64,
    ) -> Self {
        Self {
            owner,
            research_area,
            budget_estimate,
            milestone_count,
            score: 0,
            total_ballots: 0,
            status: ProjectStatus::Pending,
            funds_received: 0,
            additional_funds_received: 0,
            ballots: Vec::new(),
            sequence,
        }
    }

    /// Whether `validator` has already cast a ballot here.
    pub fn has_ballot_from(&self, validator: &Address) -> bool {
        self.ballots.iter().any(|b| b.validator == *validator)
    }

    /// Length every ballot on this proposal must have, once the first is in.
    pub fn ballot_length(&self) -> Option<usize> {
        self.ballots.first().map(|b| b.choices.len())
    }

    /// Move to `next`, enforcing the lifecycle.
    pub fn transition_to(&mut self, next: ProjectStatus) -> ProjectResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(ProjectError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Budget not yet paid out through milestones.
    pub fn remaining_budget(&self) -> Amount {
        self.budget_estimate.saturating_sub(self.funds_received)
    }
}
