//! # Project Registry
//!
//! Owns every proposal's score, status and fund accumulators.
//!
//! ## Invariants
//!
//! - One proposal per owner address, ever.
//! - At most one ballot per validator per proposal.
//! - `score` equals the yes-count sum of `ballots`.
//! - Status never regresses.
//! - Selected + Completed budgets in an area never exceed the area budget.
//! - `funds_received <= budget_estimate`; only the milestone authority
//!   moves it.

use crate::domain::{
    count_yes_answers, plan_selection, Ballot, Project, ProjectError, ProjectResult,
    ProjectStatus, SelectionCandidate, SelectionOutcome, BALLOT_QUORUM,
};
use crate::ports::{FundingDirectory, MilestoneTrackOpener, ValidatorDirectory};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, DomainEvent, ResearchAreaId};
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

/// Project registry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectRegistry {
    /// Registry owner (the ledger's super-admin). Controls the authority.
    owner: Address,
    /// Only address allowed to credit funds.
    milestone_authority: Option<Address>,
    /// Proposals by owner.
    projects: HashMap<Address, Project>,
    /// Owners in registration order.
    registration_order: Vec<Address>,
    /// Next registration sequence number.
    next_sequence: u64,
    /// Events not yet drained by the runtime.
    #[serde(skip)]
    pending_events: Vec<DomainEvent>,
}

impl ProjectRegistry {
    /// Create an empty registry owned by `owner`.
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            milestone_authority: None,
            projects: HashMap::new(),
            registration_order: Vec::new(),
            next_sequence: 0,
            pending_events: Vec::new(),
        }
    }

    // =========================================================================
    // REGISTRATION & SCORING
    // =========================================================================

    /// Register `caller`'s proposal in `research_area`.
    pub fn register_project<F: FundingDirectory>(
        &mut self,
        caller: Address,
        budget_estimate: Amount,
        research_area: ResearchAreaId,
        directory: &F,
    ) -> ProjectResult<()> {
        if self.projects.contains_key(&caller) {
            return Err(ProjectError::AlreadyRegistered(caller));
        }
        let terms = directory
            .research_area(research_area)
            .ok_or(ProjectError::ResearchAreaNotFound(research_area))?;
        if budget_estimate == 0 {
            return Err(ProjectError::ZeroBudget);
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        let project = Project::new(
            caller,
            research_area,
            budget_estimate,
            terms.milestone_count,
            sequence,
        );
        self.projects.insert(caller, project);
        self.registration_order.push(caller);

        info!(
            owner = %caller,
            research_area,
            budget_estimate,
            milestone_count = terms.milestone_count,
            "Project registered"
        );
        self.pending_events.push(DomainEvent::ProjectRegistered {
            owner: caller,
            research_area,
            budget_estimate,
            milestone_count: terms.milestone_count,
        });
        Ok(())
    }

    /// Cast `caller`'s ballot on `owner`'s proposal.
    ///
    /// All checks run before the first write, so a rejected ballot leaves
    /// score and count untouched.
    pub fn cast_ballot<V: ValidatorDirectory>(
        &mut self,
        caller: Address,
        owner: Address,
        choices: &str,
        validators: &V,
    ) -> ProjectResult<()> {
        let project = self
            .projects
            .get_mut(&owner)
            .ok_or(ProjectError::ProjectNotFound(owner))?;

        let validator_area = validators
            .verified_area(&caller)
            .ok_or(ProjectError::ValidatorNotVerified(caller))?;
        if validator_area != project.research_area {
            return Err(ProjectError::ResearchAreaMismatch {
                validator_area,
                project_area: project.research_area,
            });
        }
        if caller == owner {
            return Err(ProjectError::SelfScoring);
        }
        if !project.status.accepts_ballots() {
            return Err(ProjectError::BallotClosed(project.status));
        }
        if project.has_ballot_from(&caller) {
            return Err(ProjectError::AlreadyScored);
        }
        let yes = count_yes_answers(choices)?;
        if let Some(expected) = project.ballot_length() {
            if choices.len() != expected {
                return Err(ProjectError::InvalidBallot(format!(
                    "expected {} answers, got {}",
                    expected,
                    choices.len()
                )));
            }
        }

        project.score += u64::from(yes);
        project.total_ballots += 1;
        project.ballots.push(Ballot {
            validator: caller,
            choices: choices.to_string(),
        });
        debug!(
            %owner,
            validator = %caller,
            yes,
            score = project.score,
            ballots = project.total_ballots,
            "Ballot accepted"
        );
        self.pending_events.push(DomainEvent::BallotCast {
            owner,
            validator: caller,
            yes_answers: yes,
            score: project.score,
            ballots: project.total_ballots,
        });

        if project.status == ProjectStatus::Pending && project.total_ballots >= BALLOT_QUORUM {
            project.transition_to(ProjectStatus::Scored)?;
            info!(%owner, score = project.score, "Project reached ballot quorum");
            self.pending_events.push(DomainEvent::ProjectScored {
                owner,
                score: project.score,
            });
        }
        Ok(())
    }

    // =========================================================================
    // SELECTION
    // =========================================================================

    /// Fund the best Scored proposals of `research_area` that fit its budget.
    ///
    /// Budget already held by Selected/Completed proposals is deducted first,
    /// so re-running never double-spends and is a no-op when the pool has no
    /// new Scored proposals.
    pub fn select_for_funding<F, M>(
        &mut self,
        caller: Address,
        research_area: ResearchAreaId,
        directory: &F,
        tracks: &mut M,
    ) -> ProjectResult<SelectionOutcome>
    where
        F: FundingDirectory,
        M: MilestoneTrackOpener,
    {
        if caller != self.owner && !directory.is_admin(&caller) {
            return Err(ProjectError::NotAuthorized(caller));
        }
        let terms = directory
            .research_area(research_area)
            .ok_or(ProjectError::ResearchAreaNotFound(research_area))?;

        let mut already_committed: Amount = 0;
        let mut candidates = Vec::new();
        for project in self.projects_in_area(research_area) {
            if project.status.is_funded() {
                already_committed = already_committed
                    .checked_add(project.budget_estimate)
                    .ok_or(ProjectError::Overflow("committed area budget"))?;
            } else if project.status == ProjectStatus::Scored {
                candidates.push(SelectionCandidate {
                    owner: project.owner,
                    score: project.score,
                    budget_estimate: project.budget_estimate,
                    sequence: project.sequence,
                });
            }
        }

        let available = terms.budget.saturating_sub(already_committed);
        let plan = plan_selection(&candidates, available);
        if already_committed + plan.committed > terms.budget {
            error!(research_area, "Selection plan exceeds area budget");
            return Err(ProjectError::SelectionOverBudget { research_area });
        }

        if let Some(dup) = plan.selected.iter().find(|c| tracks.has_track(&c.owner)) {
            error!(owner = %dup.owner, "Scored project already has a milestone track");
            return Err(ProjectError::MilestoneTrack(format!(
                "track already open for {}",
                dup.owner
            )));
        }

        // Tracks first: a refusal part way through is rolled back by the
        // runtime checkpoint before any status has changed here.
        for candidate in &plan.selected {
            let milestone_count = self
                .projects
                .get(&candidate.owner)
                .map(|p| p.milestone_count)
                .ok_or(ProjectError::ProjectNotFound(candidate.owner))?;
            tracks.open_track(candidate.owner, milestone_count)?;
        }

        for candidate in &plan.selected {
            let project = self
                .projects
                .get_mut(&candidate.owner)
                .ok_or(ProjectError::ProjectNotFound(candidate.owner))?;
            project.transition_to(ProjectStatus::Selected)?;
            info!(
                owner = %candidate.owner,
                research_area,
                score = candidate.score,
                budget_estimate = candidate.budget_estimate,
                "Project selected for funding"
            );
            self.pending_events.push(DomainEvent::ProjectSelected {
                owner: candidate.owner,
                research_area,
                budget_estimate: candidate.budget_estimate,
                score: candidate.score,
            });
        }

        let outcome = SelectionOutcome {
            research_area,
            selected: plan.selected.iter().map(|c| c.owner).collect(),
            deferred: plan.deferred.iter().map(|c| c.owner).collect(),
            committed_budget: plan.committed,
            remaining_budget: available - plan.committed,
        };
        info!(
            research_area,
            selected = outcome.selected.len(),
            deferred = outcome.deferred.len(),
            committed = outcome.committed_budget,
            remaining = outcome.remaining_budget,
            "Selection run finished"
        );
        self.pending_events.push(DomainEvent::SelectionCompleted {
            research_area,
            selected: outcome.selected.len() as u32,
            deferred: outcome.deferred.len() as u32,
            committed_budget: outcome.committed_budget,
            remaining_budget: outcome.remaining_budget,
        });
        Ok(outcome)
    }

    // =========================================================================
    // MILESTONE AUTHORITY
    // =========================================================================

    /// Point the fund-credit gate at `authority`. Owner only.
    pub fn set_milestone_authority(
        &mut self,
        caller: Address,
        authority: Address,
    ) -> ProjectResult<()> {
        if caller != self.owner {
            return Err(ProjectError::NotOwner(caller));
        }
        if authority.is_zero() {
            return Err(ProjectError::ZeroAddress);
        }

        let previous = self.milestone_authority.replace(authority);
        warn!(
            previous = ?previous,
            current = %authority,
            changed_by = %caller,
            "Milestone authority changed"
        );
        self.pending_events.push(DomainEvent::MilestoneAuthorityChanged {
            previous,
            current: authority,
        });
        Ok(())
    }

    /// Current milestone authority.
    pub fn milestone_authority(&self) -> Option<Address> {
        self.milestone_authority
    }

    /// Registry owner.
    pub fn owner(&self) -> Address {
        self.owner
    }

    fn require_authority(&self, caller: Address) -> ProjectResult<()> {
        if self.milestone_authority != Some(caller) {
            warn!(%caller, "Rejected fund mutation from non-authority");
            return Err(ProjectError::NotMilestoneAuthority(caller));
        }
        Ok(())
    }

    // =========================================================================
    // FUND ACCOUNTING (milestone authority only)
    // =========================================================================

    /// Credit milestone funds. Never lets `funds_received` pass the estimate.
    pub fn credit_funds(
        &mut self,
        caller: Address,
        owner: Address,
        amount: Amount,
    ) -> ProjectResult<Amount> {
        self.require_authority(caller)?;
        let project = self
            .projects
            .get_mut(&owner)
            .ok_or(ProjectError::ProjectNotFound(owner))?;
        if project.status != ProjectStatus::Selected {
            return Err(ProjectError::NotFunded {
                owner,
                status: project.status,
            });
        }
        if amount == 0 {
            return Err(ProjectError::ZeroAmount);
        }
        let total = project
            .funds_received
            .checked_add(amount)
            .ok_or(ProjectError::Overflow("funds received"))?;
        if total > project.budget_estimate {
            error!(%owner, attempted = total, budget = project.budget_estimate, "Credit would exceed budget estimate");
            return Err(ProjectError::BudgetExceeded {
                owner,
                attempted: total,
                budget: project.budget_estimate,
            });
        }

        project.funds_received = total;
        info!(%owner, amount, total, "Funds credited");
        self.pending_events
            .push(DomainEvent::FundsCredited { owner, amount, total });
        Ok(total)
    }

    /// Credit bonus / adjustment funds.
    pub fn credit_additional_funds(
        &mut self,
        caller: Address,
        owner: Address,
        amount: Amount,
    ) -> ProjectResult<Amount> {
        self.require_authority(caller)?;
        let project = self
            .projects
            .get_mut(&owner)
            .ok_or(ProjectError::ProjectNotFound(owner))?;
        if !project.status.is_funded() {
            return Err(ProjectError::NotFunded {
                owner,
                status: project.status,
            });
        }
        if amount == 0 {
            return Err(ProjectError::ZeroAmount);
        }
        let total = project
            .additional_funds_received
            .checked_add(amount)
            .ok_or(ProjectError::Overflow("additional funds received"))?;

        project.additional_funds_received = total;
        info!(%owner, amount, total, "Additional funds credited");
        self.pending_events
            .push(DomainEvent::AdditionalFundsCredited { owner, amount, total });
        Ok(total)
    }

    /// Close a fully disbursed proposal.
    pub fn mark_completed(&mut self, caller: Address, owner: Address) -> ProjectResult<()> {
        self.require_authority(caller)?;
        let project = self
            .projects
            .get_mut(&owner)
            .ok_or(ProjectError::ProjectNotFound(owner))?;
        if project.funds_received != project.budget_estimate {
            error!(%owner, received = project.funds_received, budget = project.budget_estimate, "Completion before full disbursement");
            return Err(ProjectError::IncompleteDisbursement {
                owner,
                received: project.funds_received,
                budget: project.budget_estimate,
            });
        }
        project.transition_to(ProjectStatus::Completed)?;

        info!(%owner, "Project completed");
        self.pending_events
            .push(DomainEvent::ProjectCompleted { owner });
        Ok(())
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Proposal by owner.
    pub fn project(&self, owner: &Address) -> Option<&Project> {
        self.projects.get(owner)
    }

    /// Proposal by owner, or `ProjectNotFound`.
    pub fn require_project(&self, owner: &Address) -> ProjectResult<&Project> {
        self.projects
            .get(owner)
            .ok_or(ProjectError::ProjectNotFound(*owner))
    }

    /// Ballots on a proposal in casting order.
    pub fn view_ballots(&self, owner: &Address) -> ProjectResult<&[Ballot]> {
        self.require_project(owner).map(|p| p.ballots.as_slice())
    }

    /// Proposals of an area in registration order.
    pub fn projects_in_area(&self, research_area: ResearchAreaId) -> Vec<&Project> {
        self.registration_order
            .iter()
            .filter_map(|owner| self.projects.get(owner))
            .filter(|p| p.research_area == research_area)
            .collect()
    }

    /// Number of proposals.
    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    /// Drain buffered events.
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
