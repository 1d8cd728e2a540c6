//! # Ledger Service
//!
//! Single-writer actor owning the [`Ledger`].
//!
//! ```text
//! ┌──────────────┐  Envelope   ┌──────────────────┐  LedgerEvent  ┌──────────────────┐
//! │ LedgerHandle │ ──────────► │  LedgerService   │ ────────────► │ InMemoryEventBus │
//! │  (cloneable) │ ◄────────── │  replay check    │               │  (subscribers)   │
//! └──────────────┘  oneshot    │  Ledger::apply   │               └──────────────────┘
//!                              └──────────────────┘
//! ```
//!
//! Every command and query goes through one mpsc queue, so all callers see
//! a single total order. Events of a call are published only after the
//! call committed, each with the next sequence number.

use crate::api::{
    unix_now, CommandReceipt, FundingApi, LedgerQuery, LedgerRequest, LedgerResponse,
};
use crate::container::{Ledger, LedgerConfig};
use crate::errors::{LedgerError, LedgerResult};
use crate::snapshot::LedgerSnapshot;
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_bus::{EventPublisher, InMemoryEventBus, LedgerEvent, ReplayGuard};
use shared_types::{Address, DomainEvent, Timestamp};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Source of the current unix time.
pub type Clock = Arc<dyn Fn() -> Timestamp + Send + Sync>;

/// Message handled by the service loop.
enum Envelope {
    Submit {
        request: LedgerRequest,
        reply: oneshot::Sender<LedgerResult<CommandReceipt>>,
    },
    Query {
        query: LedgerQuery,
        reply: oneshot::Sender<LedgerResult<LedgerResponse>>,
    },
    Snapshot {
        reply: oneshot::Sender<LedgerSnapshot>,
    },
}

/// The actor. Built by [`LedgerService::spawn`].
pub struct LedgerService {
    ledger: Ledger,
    bus: Arc<InMemoryEventBus>,
    replay_guard: Arc<Mutex<ReplayGuard>>,
    sequence: u64,
    clock: Clock,
    inbox: mpsc::Receiver<Envelope>,
}

impl LedgerService {
    /// Bootstrap a fresh ledger and start serving it.
    pub async fn spawn(
        config: &LedgerConfig,
        bus: Arc<InMemoryEventBus>,
    ) -> LedgerResult<(LedgerHandle, JoinHandle<()>)> {
        Self::spawn_with_clock(config, bus, Arc::new(unix_now)).await
    }

    /// [`spawn`](Self::spawn) with an injected clock.
    pub async fn spawn_with_clock(
        config: &LedgerConfig,
        bus: Arc<InMemoryEventBus>,
        clock: Clock,
    ) -> LedgerResult<(LedgerHandle, JoinHandle<()>)> {
        let (ledger, events) = Ledger::bootstrap(&config.principals)?;
        let (tx, inbox) = mpsc::channel(config.service.command_queue);
        let mut service = Self {
            ledger,
            replay_guard: bus.replay_guard(),
            sequence: bus.last_sequence(),
            bus,
            clock,
            inbox,
        };
        let now = (service.clock)();
        service
            .publish(config.principals.super_admin, Uuid::new_v4(), now, events)
            .await;
        info!(
            super_admin = %config.principals.super_admin,
            milestone_tracker = %config.principals.milestone_tracker,
            "Ledger bootstrapped"
        );
        Ok((LedgerHandle { sender: tx }, tokio::spawn(service.run())))
    }

    /// Resume from a snapshot. No bootstrap events are published.
    pub fn spawn_from_snapshot(
        snapshot: LedgerSnapshot,
        config: &LedgerConfig,
        bus: Arc<InMemoryEventBus>,
    ) -> LedgerResult<(LedgerHandle, JoinHandle<()>)> {
        let sequence = snapshot.sequence.max(bus.last_sequence());
        let ledger = snapshot.restore()?;
        let (tx, inbox) = mpsc::channel(config.service.command_queue);
        let service = Self {
            ledger,
            replay_guard: bus.replay_guard(),
            sequence,
            bus,
            clock: Arc::new(unix_now),
            inbox,
        };
        info!(sequence, "Ledger restored from snapshot");
        Ok((LedgerHandle { sender: tx }, tokio::spawn(service.run())))
    }

    /// Serve until every handle is dropped.
    async fn run(mut self) {
        info!("[LedgerService] Started");
        while let Some(envelope) = self.inbox.recv().await {
            match envelope {
                Envelope::Submit { request, reply } => {
                    let result = self.submit(request).await;
                    if reply.send(result).is_err() {
                        debug!("Caller dropped before receiving receipt");
                    }
                }
                Envelope::Query { query, reply } => {
                    let _ = reply.send(self.ledger.query(&query));
                }
                Envelope::Snapshot { reply } => {
                    let now = (self.clock)();
                    let _ = reply.send(LedgerSnapshot::capture(&self.ledger, self.sequence, now));
                }
            }
        }
        info!(sequence = self.sequence, "[LedgerService] All handles dropped, shutting down");
    }

    async fn submit(&mut self, request: LedgerRequest) -> LedgerResult<CommandReceipt> {
        let now = (self.clock)();
        let LedgerRequest {
            request_id,
            issued_at,
            caller,
            command,
        } = request;

        self.replay_guard
            .lock()
            .check_and_record(request_id, issued_at, now)
            .map_err(|e| {
                warn!(%request_id, %caller, error = %e, "Request refused");
                LedgerError::from(e)
            })?;

        match self.ledger.apply(caller, command, now) {
            Ok((response, events)) => {
                let events = self.publish(caller, request_id, now, events).await;
                Ok(CommandReceipt {
                    correlation_id: request_id,
                    response,
                    events,
                })
            }
            Err(err) => {
                // A rolled-back call may be resubmitted under the same id.
                self.replay_guard.lock().forget(&request_id);
                Err(err)
            }
        }
    }

    async fn publish(
        &mut self,
        caller: Address,
        correlation_id: Uuid,
        committed_at: Timestamp,
        events: Vec<DomainEvent>,
    ) -> Vec<LedgerEvent> {
        let mut published = Vec::with_capacity(events.len());
        for payload in events {
            self.sequence += 1;
            let event = LedgerEvent {
                sequence: self.sequence,
                correlation_id,
                caller,
                committed_at,
                payload,
            };
            self.bus.publish(event.clone()).await;
            published.push(event);
        }
        published
    }
}

/// Cloneable client of a running [`LedgerService`].
#[derive(Clone)]
pub struct LedgerHandle {
    sender: mpsc::Sender<Envelope>,
}

impl LedgerHandle {
    async fn call<T>(
        &self,
        envelope: impl FnOnce(oneshot::Sender<T>) -> Envelope,
    ) -> LedgerResult<T> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(envelope(reply))
            .await
            .map_err(|_| LedgerError::ServiceUnavailable)?;
        response.await.map_err(|_| LedgerError::ServiceUnavailable)
    }
}

#[async_trait]
impl FundingApi for LedgerHandle {
    async fn submit(&self, request: LedgerRequest) -> LedgerResult<CommandReceipt> {
        self.call(|reply| Envelope::Submit { request, reply }).await?
    }

    async fn query(&self, query: LedgerQuery) -> LedgerResult<LedgerResponse> {
        self.call(|reply| Envelope::Query { query, reply }).await?
    }

    async fn snapshot(&self) -> LedgerResult<LedgerSnapshot> {
        self.call(|reply| Envelope::Snapshot { reply }).await
    }
}
