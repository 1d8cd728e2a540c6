//! # Ledger Snapshot
//!
//! Point-in-time copy of every registry, encoded as JSON.
//!
//! Pending event buffers are not part of a snapshot; a snapshot is only
//! taken between calls, when every buffer is empty.

use crate::container::Ledger;
use crate::errors::{LedgerError, LedgerResult};
use rf_01_admin_registry::AdminRegistry;
use rf_02_validator_registry::ValidatorRegistry;
use rf_03_project_registry::ProjectRegistry;
use rf_04_milestone_tracker::MilestoneTracker;
use serde::{Deserialize, Serialize};
use shared_types::Timestamp;

/// Snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable copy of the whole ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Format version.
    pub version: u32,
    /// When the snapshot was taken, unix seconds.
    pub taken_at: Timestamp,
    /// Sequence of the last event published before the snapshot.
    pub sequence: u64,
    pub admin: AdminRegistry,
    pub validators: ValidatorRegistry,
    pub projects: ProjectRegistry,
    pub milestones: MilestoneTracker,
}

impl LedgerSnapshot {
    /// Capture `ledger` as of `sequence`.
    pub fn capture(ledger: &Ledger, sequence: u64, taken_at: Timestamp) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            taken_at,
            sequence,
            admin: ledger.admin().clone(),
            validators: ledger.validators().clone(),
            projects: ledger.projects().clone(),
            milestones: ledger.milestones().clone(),
        }
    }

    /// Rebuild the ledger this snapshot describes.
    pub fn restore(self) -> LedgerResult<Ledger> {
        if self.version != SNAPSHOT_VERSION {
            return Err(LedgerError::Snapshot(format!(
                "unsupported snapshot version {}",
                self.version
            )));
        }
        Ok(Ledger::from_parts(
            self.admin,
            self.validators,
            self.projects,
            self.milestones,
        ))
    }

    /// Encode as pretty JSON.
    pub fn to_json(&self) -> LedgerResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| LedgerError::Snapshot(e.to_string()))
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> LedgerResult<Self> {
        serde_json::from_str(json).map_err(|e| LedgerError::Snapshot(e.to_string()))
    }
}
