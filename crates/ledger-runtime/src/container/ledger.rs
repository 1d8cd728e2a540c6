//! # Ledger
//!
//! The four registries behind one atomic `apply`.
//!
//! ## Atomicity
//!
//! `apply` clones the whole ledger before dispatching and restores the clone
//! if the call fails anywhere, including inside a cross-registry callback.
//! A rejected call therefore leaves no trace: no partial score, no opened
//! track without a status change, no credit without a recorded milestone.
//!
//! The checkpoint is a deep copy of all four registries, ballot strings
//! included, so every call costs O(ledger size) regardless of what it
//! touches. Fine for one in-memory ledger of a few rounds; a larger ledger
//! should checkpoint only the registries a command writes.

use crate::adapters::{AdminPort, ProjectPort, TrackPort, ValidatorPort};
use crate::api::{LedgerCommand, LedgerQuery, LedgerResponse};
use crate::container::config::PrincipalConfig;
use crate::errors::LedgerResult;
use rf_01_admin_registry::AdminRegistry;
use rf_02_validator_registry::{ValidatorRegistry, VerificationVote};
use rf_03_project_registry::ProjectRegistry;
use rf_04_milestone_tracker::MilestoneTracker;
use shared_types::{Address, DomainEvent, Timestamp};
use tracing::{debug, warn};

/// The funding ledger state.
#[derive(Clone, Debug)]
pub struct Ledger {
    pub(crate) admin: AdminRegistry,
    pub(crate) validators: ValidatorRegistry,
    pub(crate) projects: ProjectRegistry,
    pub(crate) milestones: MilestoneTracker,
}

impl Ledger {
    /// Empty ledger with no milestone authority configured yet.
    pub fn new(principals: &PrincipalConfig) -> Self {
        Self {
            admin: AdminRegistry::new(principals.super_admin),
            validators: ValidatorRegistry::new(),
            projects: ProjectRegistry::new(principals.super_admin),
            milestones: MilestoneTracker::new(principals.milestone_tracker),
        }
    }

    /// Empty ledger whose super-admin has pointed fund crediting at the
    /// milestone tracker. Returns the bootstrap events.
    pub fn bootstrap(principals: &PrincipalConfig) -> LedgerResult<(Self, Vec<DomainEvent>)> {
        let mut ledger = Self::new(principals);
        let (_, events) = ledger.apply(
            principals.super_admin,
            LedgerCommand::SetMilestoneAuthority {
                authority: principals.milestone_tracker,
            },
            0,
        )?;
        Ok((ledger, events))
    }

    /// Rebuild from persisted registries.
    pub(crate) fn from_parts(
        admin: AdminRegistry,
        validators: ValidatorRegistry,
        projects: ProjectRegistry,
        milestones: MilestoneTracker,
    ) -> Self {
        Self {
            admin,
            validators,
            projects,
            milestones,
        }
    }

    /// Apply one call atomically. Returns the output and the events it
    /// committed.
    pub fn apply(
        &mut self,
        caller: Address,
        command: LedgerCommand,
        now: Timestamp,
    ) -> LedgerResult<(LedgerResponse, Vec<DomainEvent>)> {
        let name = command.name();
        let checkpoint = self.clone();
        match self.dispatch(caller, command, now) {
            Ok(response) => {
                let events = self.drain_events();
                debug!(command = name, %caller, events = events.len(), "Call committed");
                Ok((response, events))
            }
            Err(err) => {
                *self = checkpoint;
                warn!(command = name, %caller, error = %err, "Call rejected, state restored");
                Err(err)
            }
        }
    }

    fn dispatch(
        &mut self,
        caller: Address,
        command: LedgerCommand,
        now: Timestamp,
    ) -> LedgerResult<LedgerResponse> {
        let response = match command {
            LedgerCommand::AddAdmin { admin } => {
                self.admin.add_admin(caller, admin)?;
                LedgerResponse::Done
            }
            LedgerCommand::AddResearchArea {
                id,
                milestone_count,
                round,
                budget,
            } => {
                self.admin
                    .add_research_area(caller, id, milestone_count, round, budget)?;
                LedgerResponse::Done
            }
            LedgerCommand::RegisterValidator { research_area } => {
                self.validators
                    .register_validator(caller, research_area, &AdminPort(&self.admin))?;
                LedgerResponse::Done
            }
            LedgerCommand::CastVerificationVote { validator, vote } => {
                let vote = VerificationVote::try_from(vote)?;
                self.validators.cast_verification_vote(
                    caller,
                    validator,
                    vote,
                    &AdminPort(&self.admin),
                )?;
                LedgerResponse::Done
            }
            LedgerCommand::RegisterProject {
                budget_estimate,
                research_area,
            } => {
                self.projects.register_project(
                    caller,
                    budget_estimate,
                    research_area,
                    &AdminPort(&self.admin),
                )?;
                LedgerResponse::Done
            }
            LedgerCommand::CastBallot { owner, choices } => {
                self.projects.cast_ballot(
                    caller,
                    owner,
                    &choices,
                    &ValidatorPort(&self.validators),
                )?;
                LedgerResponse::Done
            }
            LedgerCommand::SelectForFunding { research_area } => {
                let outcome = self.projects.select_for_funding(
                    caller,
                    research_area,
                    &AdminPort(&self.admin),
                    &mut TrackPort(&mut self.milestones),
                )?;
                LedgerResponse::Selection(outcome)
            }
            LedgerCommand::SetMilestoneAuthority { authority } => {
                self.projects.set_milestone_authority(caller, authority)?;
                LedgerResponse::Done
            }
            LedgerCommand::CreditFunds { owner, amount } => {
                LedgerResponse::FundsTotal(self.projects.credit_funds(caller, owner, amount)?)
            }
            LedgerCommand::CreditAdditionalFunds { owner, amount } => LedgerResponse::FundsTotal(
                self.projects
                    .credit_additional_funds(caller, owner, amount)?,
            ),
            LedgerCommand::RequestMilestoneApproval => {
                let milestone_index = self
                    .milestones
                    .request_approval(caller, &ProjectPort(&mut self.projects))?;
                LedgerResponse::MilestoneRequested { milestone_index }
            }
            LedgerCommand::DecideMilestone { owner, approve } => {
                let outcome = self.milestones.approve(
                    caller,
                    owner,
                    approve,
                    now,
                    &mut ProjectPort(&mut self.projects),
                    &ValidatorPort(&self.validators),
                )?;
                LedgerResponse::Approval(outcome)
            }
            LedgerCommand::AwardAdditionalFunds { owner, amount } => {
                let total = self.milestones.award_additional_funds(
                    caller,
                    owner,
                    amount,
                    &mut ProjectPort(&mut self.projects),
                    &AdminPort(&self.admin),
                )?;
                LedgerResponse::FundsTotal(total)
            }
        };
        Ok(response)
    }

    /// Answer a read-only query.
    pub fn query(&self, query: &LedgerQuery) -> LedgerResult<LedgerResponse> {
        let response = match query {
            LedgerQuery::IsAdmin { address } => LedgerResponse::Flag(self.admin.is_admin(address)),
            LedgerQuery::Admins => LedgerResponse::Addresses(self.admin.admins()),
            LedgerQuery::ResearchArea { id } => {
                LedgerResponse::ResearchArea(self.admin.research_area(*id))
            }
            LedgerQuery::ResearchMilestones { id } => {
                LedgerResponse::Count(self.admin.research_milestones(*id)?)
            }
            LedgerQuery::ResearchIds => {
                LedgerResponse::ResearchIds(self.admin.research_ids().to_vec())
            }
            LedgerQuery::Validator { address } => {
                LedgerResponse::Validator(self.validators.validator(address)?)
            }
            LedgerQuery::ValidatorRecord { admin, address } => LedgerResponse::ValidatorRecord(
                self.validators
                    .inspect_validator(*admin, address, &AdminPort(&self.admin))?
                    .clone(),
            ),
            LedgerQuery::ValidatorsInArea { research_area } => {
                LedgerResponse::Addresses(self.validators.validators_in_area(*research_area))
            }
            LedgerQuery::IsEligible {
                address,
                research_area,
            } => LedgerResponse::Flag(self.validators.is_eligible(address, *research_area)),
            LedgerQuery::Project { owner } => {
                LedgerResponse::Project(self.projects.project(owner).cloned())
            }
            LedgerQuery::ProjectsInArea { research_area } => LedgerResponse::Projects(
                self.projects
                    .projects_in_area(*research_area)
                    .into_iter()
                    .cloned()
                    .collect(),
            ),
            LedgerQuery::Ballots { owner } => {
                LedgerResponse::Ballots(self.projects.view_ballots(owner)?.to_vec())
            }
            LedgerQuery::MilestoneAuthority => {
                LedgerResponse::Authority(self.projects.milestone_authority())
            }
            LedgerQuery::MilestoneDetails { owner } => {
                LedgerResponse::MilestoneDetails(self.milestones.details(owner)?)
            }
            LedgerQuery::LastDisbursed { owner } => {
                LedgerResponse::Count(self.milestones.last_disbursed(owner)?)
            }
            LedgerQuery::MilestoneRecord { owner } => {
                LedgerResponse::MilestoneRecord(self.milestones.record(owner)?.clone())
            }
        };
        Ok(response)
    }

    /// Drain every registry's event buffer, grouped by registry.
    fn drain_events(&mut self) -> Vec<DomainEvent> {
        let mut events = self.admin.take_events();
        events.extend(self.validators.take_events());
        events.extend(self.projects.take_events());
        events.extend(self.milestones.take_events());
        events
    }

    /// Admin registry.
    pub fn admin(&self) -> &AdminRegistry {
        &self.admin
    }

    /// Validator registry.
    pub fn validators(&self) -> &ValidatorRegistry {
        &self.validators
    }

    /// Project registry.
    pub fn projects(&self) -> &ProjectRegistry {
        &self.projects
    }

    /// Milestone tracker.
    pub fn milestones(&self) -> &MilestoneTracker {
        &self.milestones
    }
}
