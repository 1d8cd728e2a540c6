//! # Shared Types Crate
//!
//! This crate contains the value types every registry of the funding ledger
//! agrees on: caller addresses, amounts, identifiers, the error taxonomy and
//! the domain event payloads that end up on the audit bus.
//!
//! ## Design Principles
//!
//! - **Address-only identity**: a caller is whatever 20-byte address the host
//!   (or a relaying smart account) presents. Nothing else is trusted.
//! - **No cross-registry types**: registry-specific entities stay in their
//!   own crate; only the narrow shared vocabulary is defined here.

pub mod entities;
pub mod errors;
pub mod events;

pub use entities::*;
pub use errors::*;
pub use events::*;
