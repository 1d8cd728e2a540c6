//! # Ports
//!
//! Outbound dependencies of the Validator Registry.

pub mod outbound;

pub use outbound::{AdminDirectory, MockAdminDirectory};
