//! # Domain Module
//!
//! Core domain types for the Project Registry.

pub mod ballot;
pub mod entities;
pub mod errors;
pub mod selection;

pub use ballot::*;
pub use entities::*;
pub use errors::*;
pub use selection::*;
