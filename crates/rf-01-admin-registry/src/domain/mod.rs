//! # Domain Module
//!
//! Core domain types for the Admin Registry.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
