//! # Funding Adapters
//!
//! The two mutable cross-registry paths: selection opening milestone tracks,
//! and the milestone tracker crediting funds.

use rf_03_project_registry::{
    MilestoneTrackOpener, ProjectError, ProjectRegistry, ProjectResult, ProjectStatus,
};
use rf_04_milestone_tracker::{
    FundedProject, MilestoneTracker, ProjectLedger, TrackerError, TrackerResult,
};
use shared_types::{Address, Amount};

/// Project registry as seen by the milestone tracker.
pub struct ProjectPort<'a>(pub &'a mut ProjectRegistry);

impl ProjectLedger for ProjectPort<'_> {
    /// Only `Selected` projects are in disbursement; a completed project has
    /// nothing left to pay.
    fn funded_project(&self, owner: &Address) -> Option<FundedProject> {
        self.0
            .project(owner)
            .filter(|project| project.status == ProjectStatus::Selected)
            .map(|project| FundedProject {
                research_area: project.research_area,
                budget_estimate: project.budget_estimate,
                funds_received: project.funds_received,
            })
    }

    fn credit_funds(
        &mut self,
        authority: Address,
        owner: Address,
        amount: Amount,
    ) -> TrackerResult<Amount> {
        self.0
            .credit_funds(authority, owner, amount)
            .map_err(TrackerError::funding)
    }

    fn credit_additional_funds(
        &mut self,
        authority: Address,
        owner: Address,
        amount: Amount,
    ) -> TrackerResult<Amount> {
        self.0
            .credit_additional_funds(authority, owner, amount)
            .map_err(TrackerError::funding)
    }

    fn mark_completed(&mut self, authority: Address, owner: Address) -> TrackerResult<()> {
        self.0
            .mark_completed(authority, owner)
            .map_err(TrackerError::funding)
    }
}

/// Milestone tracker as seen by selection.
pub struct TrackPort<'a>(pub &'a mut MilestoneTracker);

impl MilestoneTrackOpener for TrackPort<'_> {
    fn has_track(&self, owner: &Address) -> bool {
        self.0.has_track(owner)
    }

    fn open_track(&mut self, owner: Address, milestone_count: u32) -> ProjectResult<()> {
        self.0
            .open_track(owner, milestone_count)
            .map_err(|e| ProjectError::MilestoneTrack(e.to_string()))
    }
}
