//! # Milestone Tracker
//!
//! Releases a funded project's budget one approved milestone at a time.
//!
//! ## Invariants
//!
//! - One track per funded project, opened at selection.
//! - `current_index` only moves forward and never passes `milestone_count`.
//! - Cumulative payments never exceed the budget estimate and equal it
//!   exactly when the track reaches `AllDisbursed`.
//! - A `PendingApproval` milestone has no expiry.

use crate::domain::{
    milestone_payment, ApprovalOutcome, MilestoneDetails, MilestoneRecord, SubmissionState,
    TrackerError, TrackerResult,
};
use crate::ports::{AdminDirectory, ApproverDirectory, ProjectLedger};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, DomainEvent, Timestamp};
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

/// Milestone tracker.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MilestoneTracker {
    /// Identity presented to the project registry on fund mutations.
    address: Address,
    /// Tracks by project owner.
    records: HashMap<Address, MilestoneRecord>,
    /// Owners in the order their tracks were opened.
    open_order: Vec<Address>,
    /// Events not yet drained by the runtime.
    #[serde(skip)]
    pending_events: Vec<DomainEvent>,
}

impl MilestoneTracker {
    /// Create a tracker acting as `address`.
    pub fn new(address: Address) -> Self {
        Self {
            address,
            records: HashMap::new(),
            open_order: Vec::new(),
            pending_events: Vec::new(),
        }
    }

    /// Address this tracker credits funds as.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Open the track of a newly selected project.
    pub fn open_track(&mut self, owner: Address, milestone_count: u32) -> TrackerResult<()> {
        if self.records.contains_key(&owner) {
            return Err(TrackerError::TrackExists(owner));
        }
        if milestone_count == 0 {
            return Err(TrackerError::InvalidMilestoneCount);
        }

        self.records
            .insert(owner, MilestoneRecord::new(owner, milestone_count));
        self.open_order.push(owner);
        info!(%owner, milestone_count, "Milestone track opened");
        self.pending_events.push(DomainEvent::MilestoneTrackOpened {
            owner,
            milestone_count,
        });
        Ok(())
    }

    /// Owner asks for review of the current milestone.
    ///
    /// Only a project still in disbursement (selected, not completed) may
    /// ask.
    pub fn request_approval<P: ProjectLedger>(
        &mut self,
        caller: Address,
        projects: &P,
    ) -> TrackerResult<u32> {
        let record = self
            .records
            .get_mut(&caller)
            .ok_or(TrackerError::TrackNotFound(caller))?;
        match record.state {
            SubmissionState::NoneRequested => {}
            SubmissionState::PendingApproval => return Err(TrackerError::AlreadyPending),
            SubmissionState::AllDisbursed => return Err(TrackerError::AllDisbursed),
        }
        if projects.funded_project(&caller).is_none() {
            warn!(owner = %caller, "Approval requested for a closed project");
            return Err(TrackerError::ProjectNotActive(caller));
        }

        record.state = SubmissionState::PendingApproval;
        let milestone_index = record.current_index;
        debug!(owner = %caller, milestone_index, "Milestone approval requested");
        self.pending_events
            .push(DomainEvent::MilestoneApprovalRequested {
                owner: caller,
                milestone_index,
            });
        Ok(milestone_index)
    }

    /// Decide the pending milestone of `owner`.
    ///
    /// Approval credits the next payment through the project registry and,
    /// on the last milestone, completes the project. Rejection only resets
    /// the request.
    pub fn approve<P, V>(
        &mut self,
        caller: Address,
        owner: Address,
        decision: bool,
        now: Timestamp,
        projects: &mut P,
        validators: &V,
    ) -> TrackerResult<ApprovalOutcome>
    where
        P: ProjectLedger,
        V: ApproverDirectory,
    {
        let record = self
            .records
            .get(&owner)
            .ok_or(TrackerError::TrackNotFound(owner))?;
        let project = projects
            .funded_project(&owner)
            .ok_or(TrackerError::ProjectNotActive(owner))?;

        if caller == owner {
            return Err(TrackerError::SelfApproval);
        }
        if validators.verified_area(&caller) != Some(project.research_area) {
            warn!(%caller, %owner, "Milestone decision from ineligible approver");
            return Err(TrackerError::NotEligibleApprover(caller));
        }
        match record.state {
            SubmissionState::PendingApproval => {}
            SubmissionState::NoneRequested => return Err(TrackerError::NoPendingApproval),
            SubmissionState::AllDisbursed => return Err(TrackerError::AllDisbursed),
        }
        let milestone_index = record.current_index;
        let remaining_milestones = record.remaining_milestones();
        let is_final = record.is_final_milestone();

        if !decision {
            return Ok(self.reject(caller, owner, milestone_index));
        }

        let payment = milestone_payment(project.remaining_budget(), remaining_milestones)
            .ok_or(TrackerError::InvalidState(SubmissionState::PendingApproval))?;

        // The tail of a tiny budget can round to nothing; the milestone
        // still counts.
        if payment > 0 {
            projects.credit_funds(self.address, owner, payment)?;
        }
        if is_final {
            projects.mark_completed(self.address, owner)?;
        }

        let record = self
            .records
            .get_mut(&owner)
            .ok_or(TrackerError::TrackNotFound(owner))?;
        record.record_approval(payment, now);
        if is_final && record.state != SubmissionState::AllDisbursed {
            error!(%owner, index = record.current_index, "Final milestone did not close the track");
            return Err(TrackerError::InvalidState(record.state));
        }

        info!(
            %owner,
            approver = %caller,
            milestone_index,
            payment,
            is_final,
            "Milestone approved"
        );
        self.pending_events.push(DomainEvent::MilestoneApproved {
            owner,
            approver: caller,
            milestone_index,
            payment,
            completed_at: now,
        });

        Ok(if is_final {
            ApprovalOutcome::Completed {
                milestone_index,
                payment,
            }
        } else {
            ApprovalOutcome::Paid {
                milestone_index,
                payment,
            }
        })
    }

    fn reject(&mut self, caller: Address, owner: Address, milestone_index: u32) -> ApprovalOutcome {
        if let Some(record) = self.records.get_mut(&owner) {
            record.state = SubmissionState::NoneRequested;
            record.rejections += 1;
        }
        info!(%owner, approver = %caller, milestone_index, "Milestone rejected");
        self.pending_events.push(DomainEvent::MilestoneRejected {
            owner,
            approver: caller,
            milestone_index,
        });
        ApprovalOutcome::Rejected { milestone_index }
    }

    /// Admin grants bonus funds to a project with a track.
    pub fn award_additional_funds<P, A>(
        &mut self,
        caller: Address,
        owner: Address,
        amount: Amount,
        projects: &mut P,
        admins: &A,
    ) -> TrackerResult<Amount>
    where
        P: ProjectLedger,
        A: AdminDirectory,
    {
        if !admins.is_admin(&caller) {
            return Err(TrackerError::NotAdmin(caller));
        }
        if !self.records.contains_key(&owner) {
            return Err(TrackerError::TrackNotFound(owner));
        }
        let total = projects.credit_additional_funds(self.address, owner, amount)?;
        info!(%owner, admin = %caller, amount, total, "Additional funds awarded");
        Ok(total)
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Completion dates and statuses of the approved milestones.
    pub fn details(&self, owner: &Address) -> TrackerResult<MilestoneDetails> {
        self.record(owner).map(MilestoneDetails::from)
    }

    /// Number of milestones approved so far.
    pub fn last_disbursed(&self, owner: &Address) -> TrackerResult<u32> {
        self.record(owner).map(|r| r.current_index)
    }

    /// Full record of a track.
    pub fn record(&self, owner: &Address) -> TrackerResult<&MilestoneRecord> {
        self.records
            .get(owner)
            .ok_or(TrackerError::TrackNotFound(*owner))
    }

    /// Whether a track exists for `owner`.
    pub fn has_track(&self, owner: &Address) -> bool {
        self.records.contains_key(owner)
    }

    /// Owners with a track, in opening order.
    pub fn tracked_owners(&self) -> &[Address] {
        &self.open_order
    }

    /// Drain buffered events.
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
