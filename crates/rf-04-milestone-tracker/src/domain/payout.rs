//! # Milestone Payout
//!
//! Each approved milestone pays `ceil(remaining budget / remaining milestones)`;
//! the final milestone pays exactly what is left. Cumulative payments
//! therefore never pass the budget estimate and sum to it exactly once the
//! last milestone is approved.

use shared_types::Amount;

/// Payment for the next milestone, `None` when no milestone is left.
pub fn milestone_payment(remaining_budget: Amount, remaining_milestones: u32) -> Option<Amount> {
    match remaining_milestones {
        0 => None,
        1 => Some(remaining_budget),
        n => Some(remaining_budget.div_ceil(Amount::from(n))),
    }
}

/// The whole payout schedule for a fresh track.
pub fn payout_schedule(budget: Amount, milestone_count: u32) -> Vec<Amount> {
    let mut remaining = budget;
    let mut schedule = Vec::with_capacity(milestone_count as usize);
    for left in (1..=milestone_count).rev() {
        let payment = milestone_payment(remaining, left).unwrap_or(0);
        remaining -= payment;
        schedule.push(payment);
    }
    schedule
}
