//! # Research-Funding Ledger
//!
//! Entry point of the ledger service.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG`, default `info`)
//! 2. Load configuration from the environment (`RF_*` variables)
//! 3. Validate principals and capacities
//! 4. Create the event bus and bootstrap the ledger
//! 5. Start the audit log subscriber
//! 6. Serve until Ctrl+C, then shut down gracefully

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ledger_runtime::{LedgerConfig, LedgerHandle, LedgerService};
use shared_bus::{EventFilter, InMemoryEventBus, Subscription};

/// Running ledger and its background tasks.
struct LedgerRuntime {
    handle: LedgerHandle,
    service_task: JoinHandle<()>,
    audit_task: JoinHandle<()>,
    shutdown_tx: watch::Sender<bool>,
}

impl LedgerRuntime {
    async fn start(config: LedgerConfig) -> Result<Self> {
        let bus = Arc::new(InMemoryEventBus::with_capacity(
            config.service.event_bus_capacity,
        ));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        // Subscribe before bootstrap so the audit log sees every event.
        let audit = bus.subscribe(EventFilter::all());
        let audit_task = tokio::spawn(audit_log(audit, shutdown_rx));

        let (handle, service_task) = LedgerService::spawn(&config, bus)
            .await
            .context("failed to bootstrap ledger")?;

        Ok(Self {
            handle,
            service_task,
            audit_task,
            shutdown_tx,
        })
    }

    async fn shutdown(self) {
        info!("Shutting down ledger runtime");
        // Dropping the last handle ends the service loop.
        drop(self.handle);
        if let Err(e) = self.service_task.await {
            warn!(error = %e, "Ledger service ended abnormally");
        }
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.audit_task.await {
            warn!(error = %e, "Audit log ended abnormally");
        }
        info!("Ledger runtime stopped");
    }
}

/// Log every committed event until shutdown.
async fn audit_log(mut subscription: Subscription, mut shutdown: watch::Receiver<bool>) {
    loop {
        tokio::select! {
            event = subscription.recv() => {
                let Some(event) = event else { break };
                info!(
                    sequence = event.sequence,
                    correlation_id = %event.correlation_id,
                    caller = %event.caller,
                    topic = ?event.topic(),
                    payload = ?event.payload,
                    "[audit] Event committed"
                );
            }
            _ = shutdown.changed() => {
                info!("[audit] Shutdown signal received");
                break;
            }
        }
    }
    if subscription.missed() > 0 {
        warn!(missed = subscription.missed(), "[audit] Log has gaps; events were dropped while lagging");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = LedgerConfig::from_env().context("invalid ledger configuration")?;
    config.validate().context("invalid ledger configuration")?;

    let runtime = LedgerRuntime::start(config).await?;

    info!("Ledger is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await;
    Ok(())
}
