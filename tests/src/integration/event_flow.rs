//! # Event Flow
//!
//! What subscribers of the shared bus observe while a round runs.
//!
//! ## Guarantees Tested
//!
//! 1. Events arrive in commit order with strictly increasing sequences
//! 2. Events of one call share its correlation id
//! 3. Rejected calls publish nothing
//! 4. The `Funds` topic carries every credit, whichever registry emitted it

#[cfg(test)]
mod tests {
    use super::super::harness::*;
    use ledger_runtime::LedgerCommand;
    use shared_bus::{EventFilter, EventTopic, LedgerEvent, Subscription};
    use shared_types::DomainEvent;
    use std::time::Duration;
    use tokio::time::timeout;

    async fn drain(sub: &mut Subscription) -> Vec<LedgerEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = timeout(Duration::from_millis(50), sub.recv()).await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_sequences_strictly_increase() {
        let harness = Harness::start().await.unwrap();
        let mut sub = harness.subscribe(EventFilter::all());
        harness.reference_pool().await.unwrap();

        let events = drain(&mut sub).await;
        assert!(!events.is_empty());
        assert!(events.windows(2).all(|w| w[0].sequence < w[1].sequence));
        // Bootstrap published sequence 1 before we subscribed.
        assert_eq!(events[0].sequence, 2);
    }

    #[tokio::test]
    async fn test_call_events_share_correlation_id() {
        let harness = Harness::start().await.unwrap();
        harness.reference_pool().await.unwrap();
        let mut sub = harness.subscribe(EventFilter::all());

        let receipt = harness
            .exec(SUPER_ADMIN, LedgerCommand::SelectForFunding { research_area: AREA })
            .await
            .unwrap();
        let events = drain(&mut sub).await;

        assert_eq!(events, receipt.events);
        assert!(events
            .iter()
            .all(|e| e.correlation_id == receipt.correlation_id && e.caller == SUPER_ADMIN));

        // Tracks open in the same call as the selection, after the project events.
        let kinds: Vec<_> = events.iter().map(|e| e.topic()).collect();
        let first_milestone = kinds
            .iter()
            .position(|t| *t == EventTopic::Milestone)
            .unwrap();
        assert!(kinds[..first_milestone].iter().all(|t| *t == EventTopic::Project));
        assert_eq!(
            kinds.iter().filter(|t| **t == EventTopic::Milestone).count(),
            2
        );
    }

    #[tokio::test]
    async fn test_rejected_call_publishes_nothing() {
        let harness = Harness::start().await.unwrap();
        harness.staff().await.unwrap();
        let mut sub = harness.subscribe(EventFilter::all());

        let outsider = validators_from(0x70)[0];
        assert!(harness
            .exec(outsider, LedgerCommand::AddAdmin { admin: outsider })
            .await
            .is_err());
        assert!(drain(&mut sub).await.is_empty());
    }

    #[tokio::test]
    async fn test_funds_topic_follows_money() {
        let harness = Harness::start().await.unwrap();
        harness.reference_pool().await.unwrap();
        harness
            .exec(SUPER_ADMIN, LedgerCommand::SelectForFunding { research_area: AREA })
            .await
            .unwrap();
        let mut funds = harness.subscribe(EventFilter::topics(vec![EventTopic::Funds]));

        for _ in 0..AREA_MILESTONES {
            harness.milestone(P1, validators()[4], true).await.unwrap();
        }
        let events = drain(&mut funds).await;

        let credited: Vec<_> = events
            .iter()
            .filter_map(|e| match e.payload {
                DomainEvent::FundsCredited { amount, total, .. } => Some((amount, total)),
                _ => None,
            })
            .collect();
        assert_eq!(credited, vec![(667, 667), (667, 1334), (666, 2000)]);
        assert!(events.iter().all(|e| e.is_financial()));
        // Credits are made by the approving validator's call.
        assert!(events.iter().all(|e| e.caller == validators()[4]));
    }

    #[tokio::test]
    async fn test_caller_filter() {
        let harness = Harness::start().await.unwrap();
        let mut super_admin_only = harness.subscribe(EventFilter::from_callers(vec![SUPER_ADMIN]));
        harness.staff().await.unwrap();

        let events = drain(&mut super_admin_only).await;
        assert!(events.iter().all(|e| e.caller == SUPER_ADMIN));
        // Two admins, one area, five votes.
        assert_eq!(events.len(), 8);
    }
}
