//! # Ports
//!
//! Outbound dependencies of the Milestone Tracker.

pub mod outbound;

pub use outbound::*;
