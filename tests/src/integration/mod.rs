//! # Integration Scenarios
//!
//! Every scenario drives a real [`ledger_runtime::LedgerService`] through
//! its handle and observes the shared bus, the way a presentation client
//! would.

pub mod harness;

mod adversarial;
mod event_flow;
mod funding_round;
