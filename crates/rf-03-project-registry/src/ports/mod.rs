//! # Ports
//!
//! Outbound dependencies of the Project Registry.

pub mod outbound;

pub use outbound::*;
