//! # Replay Guard
//!
//! Rejects ledger requests whose id was already applied.
//!
//! ## Rules
//!
//! - A request is accepted only if it was issued within the window
//!   (`MAX_AGE` seconds in the past, `MAX_FUTURE_SKEW` in the future).
//! - Request ids are remembered for `validity_window_secs`, which is longer
//!   than the acceptance window, so an expired id can never be replayed.
//! - Expired ids are garbage-collected; memory stays bounded.

use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Errors from replay checks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// The request id has already been applied.
    #[error("Request {request_id} has already been applied")]
    Replayed { request_id: Uuid },

    /// The request was issued too long ago.
    #[error("Request issued at {issued_at} is too old (threshold: {threshold})")]
    TooOld { issued_at: u64, threshold: u64 },

    /// The request claims to be issued in the future.
    #[error("Request issued at {issued_at} is in the future (threshold: {threshold})")]
    FromFuture { issued_at: u64, threshold: u64 },
}

/// Time-bounded cache of applied request ids.
#[derive(Debug)]
pub struct ReplayGuard {
    /// Request id -> issue time.
    seen: HashMap<Uuid, u64>,

    /// How long an id is remembered.
    validity_window_secs: u64,

    /// Time of the last garbage collection.
    last_gc: u64,

    /// Garbage collection interval in seconds.
    gc_interval_secs: u64,
}

impl ReplayGuard {
    /// Default validity window: 2x the acceptance window.
    pub const DEFAULT_VALIDITY_WINDOW: u64 = 600;

    /// Default garbage collection interval.
    pub const DEFAULT_GC_INTERVAL: u64 = 30;

    /// Oldest accepted request age.
    pub const MAX_AGE: u64 = 300;

    /// Tolerated clock skew for requests from the future.
    pub const MAX_FUTURE_SKEW: u64 = 10;

    /// Create a guard with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Self::DEFAULT_VALIDITY_WINDOW, Self::DEFAULT_GC_INTERVAL)
    }

    /// Create a guard with custom settings.
    #[must_use]
    pub fn with_config(validity_window_secs: u64, gc_interval_secs: u64) -> Self {
        Self {
            seen: HashMap::new(),
            validity_window_secs,
            last_gc: 0,
            gc_interval_secs,
        }
    }

    /// Check the issue time, then check and record the request id.
    ///
    /// The time check runs first so an out-of-window request never touches
    /// the cache.
    pub fn check_and_record(
        &mut self,
        request_id: Uuid,
        issued_at: u64,
        now: u64,
    ) -> Result<(), ReplayError> {
        let oldest = now.saturating_sub(Self::MAX_AGE);
        let newest = now.saturating_add(Self::MAX_FUTURE_SKEW);
        if issued_at < oldest {
            return Err(ReplayError::TooOld {
                issued_at,
                threshold: oldest,
            });
        }
        if issued_at > newest {
            return Err(ReplayError::FromFuture {
                issued_at,
                threshold: newest,
            });
        }

        if now.saturating_sub(self.last_gc) > self.gc_interval_secs {
            self.garbage_collect(now);
            self.last_gc = now;
        }

        if self.seen.contains_key(&request_id) {
            return Err(ReplayError::Replayed { request_id });
        }
        self.seen.insert(request_id, issued_at);
        Ok(())
    }

    /// Forget a request id (its call was rolled back and may be retried).
    pub fn forget(&mut self, request_id: &Uuid) {
        self.seen.remove(request_id);
    }

    /// Whether a request id is remembered.
    #[must_use]
    pub fn contains(&self, request_id: &Uuid) -> bool {
        self.seen.contains_key(request_id)
    }

    /// Number of remembered ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether no id is remembered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    fn garbage_collect(&mut self, now: u64) {
        let expiry = now.saturating_sub(self.validity_window_secs);
        self.seen.retain(|_, &mut issued_at| issued_at > expiry);
    }
}

impl Default for ReplayGuard {
    fn default() -> Self {
        Self::new()
    }
}
