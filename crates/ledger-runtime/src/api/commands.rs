//! # Commands, Queries, Responses
//!
//! Plain serde values exchanged with presentation clients. A command always
//! runs as the `caller` of its [`LedgerRequest`]; nothing inside a command
//! can name a different caller.

use chrono::Utc;
use rf_01_admin_registry::ResearchAreaView;
use rf_02_validator_registry::{Validator, ValidatorView};
use rf_03_project_registry::{Ballot, Project, SelectionOutcome};
use rf_04_milestone_tracker::{ApprovalOutcome, MilestoneDetails, MilestoneRecord};
use serde::{Deserialize, Serialize};
use shared_bus::LedgerEvent;
use shared_types::{Address, Amount, ResearchAreaId, Timestamp};
use uuid::Uuid;

/// State-changing calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerCommand {
    /// Super-admin adds an admin.
    AddAdmin { admin: Address },
    /// Admin creates a research area.
    AddResearchArea {
        id: ResearchAreaId,
        milestone_count: u32,
        round: u32,
        budget: Amount,
    },
    /// Caller registers as a validator.
    RegisterValidator { research_area: ResearchAreaId },
    /// Admin votes on a validator (0 = reject, 1 = approve).
    CastVerificationVote { validator: Address, vote: u8 },
    /// Caller registers a proposal.
    RegisterProject {
        budget_estimate: Amount,
        research_area: ResearchAreaId,
    },
    /// Verified validator scores a proposal.
    CastBallot { owner: Address, choices: String },
    /// Admin runs selection for an area.
    SelectForFunding { research_area: ResearchAreaId },
    /// Super-admin points fund crediting at a new authority.
    SetMilestoneAuthority { authority: Address },
    /// Milestone authority credits milestone funds directly.
    CreditFunds { owner: Address, amount: Amount },
    /// Milestone authority credits bonus funds directly.
    CreditAdditionalFunds { owner: Address, amount: Amount },
    /// Project owner asks for review of the current milestone.
    RequestMilestoneApproval,
    /// Verified validator decides the pending milestone.
    DecideMilestone { owner: Address, approve: bool },
    /// Admin grants bonus funds through the milestone tracker.
    AwardAdditionalFunds { owner: Address, amount: Amount },
}

impl LedgerCommand {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            LedgerCommand::AddAdmin { .. } => "add_admin",
            LedgerCommand::AddResearchArea { .. } => "add_research_area",
            LedgerCommand::RegisterValidator { .. } => "register_validator",
            LedgerCommand::CastVerificationVote { .. } => "cast_verification_vote",
            LedgerCommand::RegisterProject { .. } => "register_project",
            LedgerCommand::CastBallot { .. } => "cast_ballot",
            LedgerCommand::SelectForFunding { .. } => "select_for_funding",
            LedgerCommand::SetMilestoneAuthority { .. } => "set_milestone_authority",
            LedgerCommand::CreditFunds { .. } => "credit_funds",
            LedgerCommand::CreditAdditionalFunds { .. } => "credit_additional_funds",
            LedgerCommand::RequestMilestoneApproval => "request_milestone_approval",
            LedgerCommand::DecideMilestone { .. } => "decide_milestone",
            LedgerCommand::AwardAdditionalFunds { .. } => "award_additional_funds",
        }
    }
}

/// Read-only calls. Unknown keys answer with a sentinel, not an error,
/// except where noted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerQuery {
    IsAdmin { address: Address },
    Admins,
    /// Missing areas read as `exists = false`.
    ResearchArea { id: ResearchAreaId },
    /// Fails with "Research ID does not exist" for unknown ids.
    ResearchMilestones { id: ResearchAreaId },
    ResearchIds,
    /// Fails for unknown or unverified validators.
    Validator { address: Address },
    /// Raw record including vote tally, for admins only.
    ValidatorRecord { admin: Address, address: Address },
    ValidatorsInArea { research_area: ResearchAreaId },
    IsEligible {
        address: Address,
        research_area: ResearchAreaId,
    },
    Project { owner: Address },
    ProjectsInArea { research_area: ResearchAreaId },
    /// Fails with "Project does not exist" for unknown owners.
    Ballots { owner: Address },
    MilestoneAuthority,
    MilestoneDetails { owner: Address },
    LastDisbursed { owner: Address },
    MilestoneRecord { owner: Address },
}

/// Answer to a command or query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum LedgerResponse {
    /// Command applied; nothing to report.
    Done,
    Selection(SelectionOutcome),
    MilestoneRequested { milestone_index: u32 },
    Approval(ApprovalOutcome),
    /// Accumulator total after a credit.
    FundsTotal(Amount),
    Flag(bool),
    Addresses(Vec<Address>),
    ResearchArea(ResearchAreaView),
    Count(u32),
    ResearchIds(Vec<ResearchAreaId>),
    Validator(ValidatorView),
    ValidatorRecord(Validator),
    /// `None` when no proposal is registered for the owner.
    Project(Option<Project>),
    Projects(Vec<Project>),
    Ballots(Vec<Ballot>),
    Authority(Option<Address>),
    MilestoneDetails(MilestoneDetails),
    MilestoneRecord(MilestoneRecord),
}

/// A command bound to its caller and a replay-protection id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRequest {
    /// Unique per submission; a replay with the same id is rejected.
    pub request_id: Uuid,
    /// Client-side issue time, unix seconds.
    pub issued_at: Timestamp,
    /// Address making the call.
    pub caller: Address,
    /// What to do.
    pub command: LedgerCommand,
}

impl LedgerRequest {
    /// Fresh request issued now.
    pub fn new(caller: Address, command: LedgerCommand) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            issued_at: unix_now(),
            caller,
            command,
        }
    }
}

/// Result of an applied command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandReceipt {
    /// Correlation id shared by the emitted events.
    pub correlation_id: Uuid,
    /// Command output.
    pub response: LedgerResponse,
    /// Events the command committed, as published.
    pub events: Vec<LedgerEvent>,
}

/// Wall-clock unix seconds.
pub fn unix_now() -> Timestamp {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}
