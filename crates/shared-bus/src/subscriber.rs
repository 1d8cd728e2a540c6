//! # Subscriptions
//!
//! A filtered reader over the audit bus. An observer that falls behind the
//! channel capacity loses the oldest envelopes; the loss is counted and
//! shows up as a gap in `sequence`.

use crate::events::{EventFilter, LedgerEvent};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::warn;

/// Reader of committed envelopes passing one [`EventFilter`].
pub struct Subscription {
    receiver: broadcast::Receiver<LedgerEvent>,
    filter: EventFilter,
    /// Envelopes lost to lag, matching or not.
    missed: u64,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<LedgerEvent>, filter: EventFilter) -> Self {
        Self {
            receiver,
            filter,
            missed: 0,
        }
    }

    /// Next matching envelope, or `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<LedgerEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => {}
                Err(RecvError::Lagged(lost)) => {
                    self.missed += lost;
                    warn!(lost, missed = self.missed, "Audit subscription lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Envelopes dropped because this reader fell behind.
    #[must_use]
    pub fn missed(&self) -> u64 {
        self.missed
    }
}
