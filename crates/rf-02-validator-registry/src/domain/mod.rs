//! # Domain Module
//!
//! Core domain types for the Validator Registry.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
