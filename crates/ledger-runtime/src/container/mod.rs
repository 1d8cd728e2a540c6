//! # Container
//!
//! Configuration and the ledger state the service owns.

pub mod config;
pub mod ledger;

pub use config::{ConfigError, LedgerConfig, PrincipalConfig, ServiceConfig};
pub use ledger::Ledger;
