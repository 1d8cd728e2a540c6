//! # Ledger Runtime Library
//!
//! Hosts the research-funding ledger: the four registries behind one
//! single-writer service, with committed events published on the shared bus.
//! The main entry point is the `main.rs` binary.
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  api/        FundingApi port, commands, queries, receipts    │
//! │  service     LedgerService actor + cloneable LedgerHandle    │
//! │  container/  LedgerConfig, Ledger (atomic apply)             │
//! │  adapters/   cross-registry port implementations             │
//! │  snapshot    JSON snapshot / restore                         │
//! └──────────────────────────────────────────────────────────────┘
//!          │ AdminPort  │ ValidatorPort │ ProjectPort │ TrackPort
//!          ▼            ▼               ▼             ▼
//!      rf-01-admin   rf-02-validator  rf-03-project  rf-04-milestone
//! ```
//!
//! ## Architectural Patterns
//!
//! - **Hexagonal Architecture**: registries depend only on port traits;
//!   this crate supplies the adapters
//! - **Single Writer**: one task applies every call, in one total order
//! - **Event-Driven**: clients observe committed changes via the event bus

#![warn(clippy::all)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod adapters;
pub mod api;
pub mod container;
pub mod errors;
pub mod service;
pub mod snapshot;

pub use api::{
    unix_now, CommandReceipt, FundingApi, LedgerCommand, LedgerQuery, LedgerRequest,
    LedgerResponse,
};
pub use container::{ConfigError, Ledger, LedgerConfig, PrincipalConfig, ServiceConfig};
pub use errors::{LedgerError, LedgerResult};
pub use service::{Clock, LedgerHandle, LedgerService};
pub use snapshot::{LedgerSnapshot, SNAPSHOT_VERSION};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
