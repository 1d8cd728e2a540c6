//! # Audit Bus
//!
//! The ledger's single writer pushes committed envelopes here; observers
//! read them through [`Subscription`]s.

use crate::events::{EventFilter, LedgerEvent};
use crate::replay_guard::ReplayGuard;
use crate::subscriber::Subscription;
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, trace, warn};

/// Sink for committed ledger events.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Hand one committed envelope to the observers. Returns how many
    /// subscriptions it reached.
    async fn publish(&self, event: LedgerEvent) -> usize;
}

/// Broadcast bus kept in process next to the ledger service.
///
/// Also owns the request-id cache, so every writer sharing the bus shares
/// one replay window.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<LedgerEvent>,
    replay_guard: Arc<Mutex<ReplayGuard>>,
    /// Highest sequence seen by `publish`.
    high_water: AtomicU64,
}

impl InMemoryEventBus {
    /// Bus buffering [`DEFAULT_CHANNEL_CAPACITY`] envelopes per observer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Bus buffering `capacity` envelopes per observer before it lags.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            replay_guard: Arc::new(Mutex::new(ReplayGuard::new())),
            high_water: AtomicU64::new(0),
        }
    }

    /// Observe envelopes committed from now on that pass `filter`.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(topics = ?filter.topics, callers = filter.callers.len(), "Audit subscription opened");
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Request-id cache shared by every writer on this bus.
    pub fn replay_guard(&self) -> Arc<Mutex<ReplayGuard>> {
        Arc::clone(&self.replay_guard)
    }

    /// Highest sequence published so far; 0 before the first envelope.
    #[must_use]
    pub fn last_sequence(&self) -> u64 {
        self.high_water.load(Ordering::Acquire)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: LedgerEvent) -> usize {
        let sequence = event.sequence;
        let previous = self.high_water.fetch_max(sequence, Ordering::AcqRel);
        if sequence <= previous {
            warn!(sequence, previous, "Envelope published behind the high-water mark");
        }

        let topic = event.topic();
        // No observers is normal: the ledger does not depend on auditors.
        let reached = self.sender.send(event).unwrap_or(0);
        trace!(sequence, ?topic, reached, "Envelope published");
        reached
    }
}
