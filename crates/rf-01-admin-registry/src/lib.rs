//! # RF-01 Admin Registry
//!
//! Leaf component of the funding ledger. Owns the super-admin, the admin set
//! and the research-area funding envelopes every other registry consults.
//!
//! **Subsystem ID:** 1  
//! **Depends on:** nothing
//!
//! ## Authorization
//!
//! | Operation | Allowed caller |
//! |-----------|----------------|
//! | `add_admin` | super-admin |
//! | `add_research_area` | any admin (super-admin included) |
//! | reads | anyone |
//!
//! ## Module Structure
//!
//! ```text
//! rf-01-admin-registry/
//! ├── domain/          # ResearchArea, ResearchAreaView, AdminError
//! └── registry.rs      # AdminRegistry (state + guarded mutators)
//! ```

#![warn(clippy::all)]

pub mod domain;
pub mod registry;

pub use domain::{AdminError, AdminResult, ResearchArea, ResearchAreaView};
pub use registry::AdminRegistry;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
