//! # Inbound API
//!
//! The port presentation clients drive the ledger through.

pub mod commands;

pub use commands::{
    unix_now, CommandReceipt, LedgerCommand, LedgerQuery, LedgerRequest, LedgerResponse,
};

use crate::errors::LedgerResult;
use crate::snapshot::LedgerSnapshot;
use async_trait::async_trait;
use shared_types::Address;

/// Funding ledger - inbound port.
///
/// Every call is applied atomically and in one total order with every other
/// call, whichever handle submitted it.
#[async_trait]
pub trait FundingApi: Send + Sync {
    /// Apply a prepared request (explicit id for idempotent resubmission).
    async fn submit(&self, request: LedgerRequest) -> LedgerResult<CommandReceipt>;

    /// Read ledger state.
    async fn query(&self, query: LedgerQuery) -> LedgerResult<LedgerResponse>;

    /// Consistent copy of the whole ledger.
    async fn snapshot(&self) -> LedgerResult<LedgerSnapshot>;

    /// Apply `command` as `caller` under a fresh request id.
    async fn execute(&self, caller: Address, command: LedgerCommand) -> LedgerResult<CommandReceipt> {
        self.submit(LedgerRequest::new(caller, command)).await
    }
}
