//! # Shared Bus - Audit Event Bus
//!
//! Carries committed ledger events from the runtime to any number of
//! observers (auditors, presentation clients, tests).
//!
//! ## Rules
//!
//! - Only committed transitions publish; a rolled-back call emits nothing.
//! - Every envelope carries a strictly increasing `sequence`, so a consumer
//!   can detect gaps after lagging.
//! - Publishing never blocks the single writer: slow subscribers lag and
//!   drop, they do not stall the ledger.
//!
//! ```text
//! ┌──────────────┐    publish()     ┌──────────────┐   subscribe()   ┌──────────┐
//! │ Ledger       │ ───────────────→ │  Event Bus   │ ──────────────→ │ Observer │
//! │ (one writer) │                  │ (broadcast)  │                 │          │
//! └──────────────┘                  └──────────────┘                 └──────────┘
//! ```
//!
//! ## Replay Protection
//!
//! [`ReplayGuard`] remembers applied request ids for a bounded window so a
//! resubmitted request is rejected instead of applied twice.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod replay_guard;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, LedgerEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use replay_guard::{ReplayError, ReplayGuard};
pub use subscriber::Subscription;

/// Current envelope format version.
pub const PROTOCOL_VERSION: u16 = 1;

/// Envelopes buffered per subscription before it lags.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
