//! # Funding Selection
//!
//! Greedy, budget-constrained choice of proposals within one research area.
//!
//! ## Algorithm
//!
//! 1. Order candidates by score (highest first), ties by registration
//!    sequence (earliest first).
//! 2. Walk the ordered list once. A candidate whose budget fits in what is
//!    left of the area budget is selected and its budget deducted; a
//!    candidate that does not fit is deferred and the walk continues.
//!
//! The plan is pure: no registry state is touched until the caller commits.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, ResearchAreaId};
use std::cmp::Ordering;

/// A proposal eligible for selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionCandidate {
    /// Proposal owner.
    pub owner: Address,
    /// Ballot score.
    pub score: u64,
    /// Budget estimate.
    pub budget_estimate: Amount,
    /// Registration sequence.
    pub sequence: u64,
}

/// Result of planning a selection run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionPlan {
    /// Candidates to fund, in acceptance order.
    pub selected: Vec<SelectionCandidate>,
    /// Candidates that did not fit.
    pub deferred: Vec<SelectionCandidate>,
    /// Sum of selected budgets.
    pub committed: Amount,
}

/// Selection order: score desc, then sequence asc.
fn selection_order(a: &SelectionCandidate, b: &SelectionCandidate) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.sequence.cmp(&b.sequence))
}

/// Plan which candidates fit in `available`.
pub fn plan_selection(candidates: &[SelectionCandidate], available: Amount) -> SelectionPlan {
    let mut ordered = candidates.to_vec();
    ordered.sort_by(selection_order);

    let mut plan = SelectionPlan::default();
    let mut remaining = available;
    for candidate in ordered {
        if candidate.budget_estimate <= remaining {
            remaining -= candidate.budget_estimate;
            plan.committed += candidate.budget_estimate;
            plan.selected.push(candidate);
        } else {
            plan.deferred.push(candidate);
        }
    }
    plan
}

/// What a committed selection run did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOutcome {
    /// Research area the run covered.
    pub research_area: ResearchAreaId,
    /// Owners funded by this run, in acceptance order.
    pub selected: Vec<Address>,
    /// Owners left in the pool.
    pub deferred: Vec<Address>,
    /// Budget committed by this run.
    pub committed_budget: Amount,
    /// Area budget still unallocated after this run.
    pub remaining_budget: Amount,
}

impl SelectionOutcome {
    /// Whether the run changed nothing.
    pub fn is_noop(&self) -> bool {
        self.selected.is_empty()
    }
}
