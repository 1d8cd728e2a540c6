//! # Ledger Events
//!
//! Defines the envelope that carries committed registry events over the bus.
//! Payloads are the `DomainEvent`s from `shared-types`; an envelope is only
//! published after the transition that produced it has committed.

use serde::{Deserialize, Serialize};
use shared_types::{Address, DomainEvent, EventSource, Timestamp};
use uuid::Uuid;

/// A committed domain event with its audit metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// Position in the ledger's total order. Strictly increasing.
    pub sequence: u64,
    /// Shared by all events produced by one call.
    pub correlation_id: Uuid,
    /// Address that made the call.
    pub caller: Address,
    /// Commit time, unix seconds.
    pub committed_at: Timestamp,
    /// What happened.
    pub payload: DomainEvent,
}

impl LedgerEvent {
    /// Topic of the payload (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        EventTopic::from(self.payload.source())
    }

    /// Whether the payload moved money or changed who may move it.
    #[must_use]
    pub fn is_financial(&self) -> bool {
        self.payload.is_financial()
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Admin registry events.
    Admin,
    /// Validator registry events.
    Validator,
    /// Project registry events.
    Project,
    /// Milestone tracker events.
    Milestone,
    /// Fund movements and authority changes, whichever registry emitted them.
    Funds,
    /// All events (no filtering).
    All,
}

impl From<EventSource> for EventTopic {
    fn from(source: EventSource) -> Self {
        match source {
            EventSource::Admin => EventTopic::Admin,
            EventSource::Validator => EventTopic::Validator,
            EventSource::Project => EventTopic::Project,
            EventSource::Milestone => EventTopic::Milestone,
        }
    }
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Callers to include. Empty means all callers.
    pub callers: Vec<Address>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            callers: Vec::new(),
        }
    }

    /// Create a filter for events caused by specific callers.
    #[must_use]
    pub fn from_callers(callers: Vec<Address>) -> Self {
        Self {
            topics: Vec::new(),
            callers,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &LedgerEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic())
            || (event.is_financial() && self.topics.contains(&EventTopic::Funds));

        let caller_match = self.callers.is_empty() || self.callers.contains(&event.caller);

        topic_match && caller_match
    }
}
