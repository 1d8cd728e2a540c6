//! # Outbound Ports
//!
//! What the Validator Registry needs from the Admin Registry.

use shared_types::{Address, ResearchAreaId};
use std::collections::HashSet;

/// Admin directory - outbound port.
///
/// Implemented by the runtime over the Admin Registry.
pub trait AdminDirectory {
    /// Whether `address` is an admin.
    fn is_admin(&self, address: &Address) -> bool;

    /// Whether the research area exists.
    fn research_area_exists(&self, id: ResearchAreaId) -> bool;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock admin directory for testing.
#[derive(Clone, Debug, Default)]
pub struct MockAdminDirectory {
    /// Admin addresses.
    pub admins: HashSet<Address>,
    /// Existing research areas.
    pub research_areas: HashSet<ResearchAreaId>,
}

impl MockAdminDirectory {
    /// Create a mock with the given admins and areas.
    pub fn new(admins: &[Address], research_areas: &[ResearchAreaId]) -> Self {
        Self {
            admins: admins.iter().copied().collect(),
            research_areas: research_areas.iter().copied().collect(),
        }
    }
}

impl AdminDirectory for MockAdminDirectory {
    fn is_admin(&self, address: &Address) -> bool {
        self.admins.contains(address)
    }

    fn research_area_exists(&self, id: ResearchAreaId) -> bool {
        self.research_areas.contains(&id)
    }
}
