//! # Domain Module
//!
//! Core domain types for the Milestone Tracker.

pub mod entities;
pub mod errors;
pub mod payout;

pub use entities::*;
pub use errors::*;
pub use payout::*;
