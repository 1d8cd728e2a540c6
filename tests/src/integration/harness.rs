//! # Scenario Harness
//!
//! A running ledger plus the fixtures most scenarios share: three admins,
//! one research area, five verified validators, and the reference pool of
//! three proposals whose ballots score 19, 16 and 17.

use std::sync::Arc;

use ledger_runtime::{
    CommandReceipt, FundingApi, LedgerCommand, LedgerConfig, LedgerHandle, LedgerQuery,
    LedgerResponse, LedgerResult, LedgerService,
};
use shared_bus::{EventFilter, InMemoryEventBus, Subscription};
use shared_types::{Address, Amount, ResearchAreaId};
use tokio::task::JoinHandle;

/// Deployer of the ledger.
pub const SUPER_ADMIN: Address = Address::repeat_byte(0x01);
/// Admins added by [`Harness::staff`], besides the super-admin.
pub const ADMINS: [Address; 2] = [Address::repeat_byte(0x02), Address::repeat_byte(0x03)];
/// Identity the milestone tracker credits funds as.
pub const TRACKER: Address = Address::repeat_byte(0xfe);

/// Reference proposal owners.
pub const P1: Address = Address::repeat_byte(0xa1);
pub const P2: Address = Address::repeat_byte(0xa2);
pub const P3: Address = Address::repeat_byte(0xa3);

/// Research area used by the reference pool.
pub const AREA: ResearchAreaId = 2;
/// Budget of [`AREA`].
pub const AREA_BUDGET: Amount = 5000;
/// Milestones per project in [`AREA`].
pub const AREA_MILESTONES: u32 = 3;

/// Reference pool: owner, budget estimate, and one ballot per validator.
pub const REFERENCE_POOL: [(Address, Amount, [&str; 5]); 3] = [
    (P1, 2000, ["10110", "11110", "10110", "10111", "11111"]),
    (P2, 2400, ["10110", "11100", "10100", "10111", "11101"]),
    (P3, 1900, ["10110", "11110", "10110", "10101", "11101"]),
];

/// The five validators of [`AREA`].
pub fn validators() -> Vec<Address> {
    (0x11..=0x15).map(Address::repeat_byte).collect()
}

/// Validators of another area, `base..base + 5`.
pub fn validators_from(base: u8) -> Vec<Address> {
    (base..base + 5).map(Address::repeat_byte).collect()
}

/// Running ledger service with its bus.
pub struct Harness {
    pub handle: LedgerHandle,
    pub bus: Arc<InMemoryEventBus>,
    task: JoinHandle<()>,
}

impl Harness {
    /// Bootstrap a ledger with the default principals.
    pub async fn start() -> LedgerResult<Self> {
        let bus = Arc::new(InMemoryEventBus::new());
        let (handle, task) = LedgerService::spawn(&LedgerConfig::default(), bus.clone()).await?;
        Ok(Self { handle, bus, task })
    }

    /// Subscribe to everything committed from now on.
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        self.bus.subscribe(filter)
    }

    /// Apply `command` as `caller` under a fresh request id.
    pub async fn exec(&self, caller: Address, command: LedgerCommand) -> LedgerResult<CommandReceipt> {
        self.handle.execute(caller, command).await
    }

    /// Read ledger state.
    pub async fn query(&self, query: LedgerQuery) -> LedgerResult<LedgerResponse> {
        self.handle.query(query).await
    }

    /// Admin quorum plus [`AREA`] with five verified validators.
    pub async fn staff(&self) -> LedgerResult<()> {
        for admin in ADMINS {
            self.exec(SUPER_ADMIN, LedgerCommand::AddAdmin { admin }).await?;
        }
        self.open_area(AREA, AREA_MILESTONES, AREA_BUDGET, &validators())
            .await
    }

    /// Create a research area and verify `validators` for it.
    pub async fn open_area(
        &self,
        id: ResearchAreaId,
        milestone_count: u32,
        budget: Amount,
        validators: &[Address],
    ) -> LedgerResult<()> {
        self.exec(
            SUPER_ADMIN,
            LedgerCommand::AddResearchArea {
                id,
                milestone_count,
                round: 1,
                budget,
            },
        )
        .await?;
        for &validator in validators {
            self.exec(validator, LedgerCommand::RegisterValidator { research_area: id })
                .await?;
            self.verify(validator).await?;
        }
        Ok(())
    }

    /// All three admins approve `validator`.
    pub async fn verify(&self, validator: Address) -> LedgerResult<()> {
        for admin in [SUPER_ADMIN, ADMINS[0], ADMINS[1]] {
            self.exec(
                admin,
                LedgerCommand::CastVerificationVote { validator, vote: 1 },
            )
            .await?;
        }
        Ok(())
    }

    /// Register a proposal in `area` and collect one ballot per validator.
    pub async fn register_and_score(
        &self,
        owner: Address,
        budget_estimate: Amount,
        area: ResearchAreaId,
        ballots: &[(Address, &str)],
    ) -> LedgerResult<()> {
        self.exec(
            owner,
            LedgerCommand::RegisterProject {
                budget_estimate,
                research_area: area,
            },
        )
        .await?;
        for &(validator, choices) in ballots {
            self.exec(
                validator,
                LedgerCommand::CastBallot {
                    owner,
                    choices: choices.to_string(),
                },
            )
            .await?;
        }
        Ok(())
    }

    /// [`staff`](Self::staff) and score the reference pool.
    pub async fn reference_pool(&self) -> LedgerResult<()> {
        self.staff().await?;
        for (owner, budget, ballots) in REFERENCE_POOL {
            let ballots: Vec<_> = validators().into_iter().zip(ballots).collect();
            self.register_and_score(owner, budget, AREA, &ballots).await?;
        }
        Ok(())
    }

    /// Owner requests, `approver` decides.
    pub async fn milestone(
        &self,
        owner: Address,
        approver: Address,
        approve: bool,
    ) -> LedgerResult<CommandReceipt> {
        self.exec(owner, LedgerCommand::RequestMilestoneApproval).await?;
        self.exec(approver, LedgerCommand::DecideMilestone { owner, approve })
            .await
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.task.abort();
    }
}
