//! # Domain Entities
//!
//! Research areas are the funding buckets proposals compete in.

use serde::{Deserialize, Serialize};
use shared_types::{Amount, ResearchAreaId};

/// A configured research area.
///
/// Immutable once created: there is no update path, so every project that
/// copies `milestone_count` at registration sees a stable value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchArea {
    /// Area identifier.
    pub id: ResearchAreaId,
    /// Number of milestones each funded project is paid over.
    pub milestone_count: u32,
    /// Funding round tag. Informational only.
    pub round: u32,
    /// Total budget available to the area.
    pub budget: Amount,
}

impl ResearchArea {
    /// Create a research area.
    pub fn new(id: ResearchAreaId, milestone_count: u32, round: u32, budget: Amount) -> Self {
        Self {
            id,
            milestone_count,
            round,
            budget,
        }
    }

    /// Read view of an existing area.
    pub fn view(&self) -> ResearchAreaView {
        ResearchAreaView {
            id: self.id,
            milestone_count: self.milestone_count,
            round: self.round,
            budget: self.budget,
            exists: true,
        }
    }
}

/// Read view of a research area.
///
/// Lookups never fail: unknown ids produce [`ResearchAreaView::missing`] so
/// callers can branch on `exists`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchAreaView {
    /// Area identifier (0 when missing).
    pub id: ResearchAreaId,
    /// Milestone count (0 when missing).
    pub milestone_count: u32,
    /// Funding round tag (0 when missing).
    pub round: u32,
    /// Budget (0 when missing).
    pub budget: Amount,
    /// Whether the area exists.
    pub exists: bool,
}

impl ResearchAreaView {
    /// The zero-valued "not found" sentinel.
    pub fn missing() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_of_existing_area() {
        let area = ResearchArea::new(101, 5, 1, 100);
        let view = area.view();
        assert!(view.exists);
        assert_eq!(view.id, 101);
        assert_eq!(view.milestone_count, 5);
        assert_eq!(view.budget, 100);
    }

    #[test]
    fn test_missing_sentinel_is_zeroed() {
        let view = ResearchAreaView::missing();
        assert!(!view.exists);
        assert_eq!(view.id, 0);
        assert_eq!(view.milestone_count, 0);
        assert_eq!(view.budget, 0);
    }
}
