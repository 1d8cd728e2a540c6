//! # Adapters
//!
//! Port implementations connecting the registries.
//!
//! Each adapter borrows exactly one registry, so the ledger can hand a
//! registry mutable access to itself while lending the others read-only.
//!
//! | Adapter        | Wraps               | Implements                                           |
//! |----------------|---------------------|------------------------------------------------------|
//! | `AdminPort`    | `AdminRegistry`     | validator `AdminDirectory`, `FundingDirectory`, tracker `AdminDirectory` |
//! | `ValidatorPort`| `ValidatorRegistry` | `ValidatorDirectory`, `ApproverDirectory`            |
//! | `ProjectPort`  | `ProjectRegistry`   | `ProjectLedger`                                      |
//! | `TrackPort`    | `MilestoneTracker`  | `MilestoneTrackOpener`                               |

mod directories;
mod funding;

pub use directories::{AdminPort, ValidatorPort};
pub use funding::{ProjectPort, TrackPort};
