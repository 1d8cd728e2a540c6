//! # Domain Entities
//!
//! Per-project disbursement progress.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, Timestamp};

/// Where the current milestone stands.
///
/// ```text
/// [NONE_REQUESTED] ──request──→ [PENDING_APPROVAL] ──approve (last)──→ [ALL_DISBURSED]
///        ↑                             │
///        └──── approve (not last) ─────┤
///        └──────────── reject ─────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmissionState {
    /// Waiting for the owner to ask for review.
    #[default]
    NoneRequested,
    /// A validator decision is outstanding.
    PendingApproval,
    /// Every milestone has been paid. Terminal.
    AllDisbursed,
}

impl SubmissionState {
    /// Numeric code exposed to presentation clients.
    pub fn code(&self) -> u8 {
        match self {
            SubmissionState::NoneRequested => 0,
            SubmissionState::PendingApproval => 1,
            SubmissionState::AllDisbursed => 2,
        }
    }
}

/// Outcome recorded for a paid milestone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MilestoneStatus {
    /// Approved and paid.
    Approved,
    /// Approved, paid the remainder and closed the project.
    Final,
}

/// Disbursement record of one funded project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneRecord {
    /// Project owner.
    pub owner: Address,
    /// Milestones in the track, copied from the project at selection.
    pub milestone_count: u32,
    /// Milestones approved so far; index of the next one.
    pub current_index: u32,
    /// State of the current milestone.
    pub state: SubmissionState,
    /// Completion time of each approved milestone.
    pub completion_dates: Vec<Timestamp>,
    /// Outcome of each approved milestone.
    pub statuses: Vec<MilestoneStatus>,
    /// Amount paid for each approved milestone.
    pub payments: Vec<Amount>,
    /// Rejections received over the life of the track.
    pub rejections: u32,
}

impl MilestoneRecord {
    /// Fresh track.
    pub fn new(owner: Address, milestone_count: u32) -> Self {
        Self {
            owner,
            milestone_count,
            current_index: 0,
            state: SubmissionState::NoneRequested,
            completion_dates: Vec::new(),
            statuses: Vec::new(),
            payments: Vec::new(),
            rejections: 0,
        }
    }

    /// Milestones not yet approved.
    pub fn remaining_milestones(&self) -> u32 {
        self.milestone_count.saturating_sub(self.current_index)
    }

    /// Whether the next approval is the last one.
    pub fn is_final_milestone(&self) -> bool {
        self.remaining_milestones() == 1
    }

    /// Sum of all milestone payments.
    pub fn total_paid(&self) -> Amount {
        self.payments.iter().sum()
    }

    /// Append an approved milestone and move the index forward.
    pub(crate) fn record_approval(&mut self, payment: Amount, completed_at: Timestamp) {
        let status = if self.is_final_milestone() {
            MilestoneStatus::Final
        } else {
            MilestoneStatus::Approved
        };
        self.completion_dates.push(completed_at);
        self.statuses.push(status);
        self.payments.push(payment);
        self.current_index += 1;
        self.state = if self.remaining_milestones() == 0 {
            SubmissionState::AllDisbursed
        } else {
            SubmissionState::NoneRequested
        };
    }
}

/// Read view for `details`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneDetails {
    /// Completion time of each approved milestone.
    pub completion_dates: Vec<Timestamp>,
    /// Outcome of each approved milestone.
    pub statuses: Vec<MilestoneStatus>,
}

impl From<&MilestoneRecord> for MilestoneDetails {
    fn from(record: &MilestoneRecord) -> Self {
        Self {
            completion_dates: record.completion_dates.clone(),
            statuses: record.statuses.clone(),
        }
    }
}

/// What an approval call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalOutcome {
    /// Milestone paid; more remain.
    Paid {
        /// Index of the paid milestone.
        milestone_index: u32,
        /// Amount credited.
        payment: Amount,
    },
    /// Last milestone paid; project completed.
    Completed {
        /// Index of the paid milestone.
        milestone_index: u32,
        /// Amount credited.
        payment: Amount,
    },
    /// Milestone rejected; the owner may request again.
    Rejected {
        /// Index of the rejected milestone.
        milestone_index: u32,
    },
}
