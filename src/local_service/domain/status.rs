//! Point-in-time runtime status of a port.

use super::ProcessId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of probing a port.
///
/// Status is recomputed on every query and never cached, so it describes
/// the socket table only at `checked_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeStatus {
    running: bool,
    pid: Option<ProcessId>,
    checked_at: DateTime<Utc>,
}

impl RuntimeStatus {
    /// Builds a status from the processes that own the port.
    ///
    /// The first reported owner becomes `pid`. Ordering among several owners
    /// is whatever the prober reported.
    #[must_use]
    pub fn from_owners(owners: &[ProcessId], checked_at: DateTime<Utc>) -> Self {
        Self {
            running: !owners.is_empty(),
            pid: owners.first().copied(),
            checked_at,
        }
    }

    /// Creates a status for a port nothing is bound to.
    #[must_use]
    pub const fn stopped(checked_at: DateTime<Utc>) -> Self {
        Self {
            running: false,
            pid: None,
            checked_at,
        }
    }

    /// Returns whether a process owns the port.
    #[must_use]
    pub const fn running(&self) -> bool {
        self.running
    }

    /// Returns the first owning process, if any.
    #[must_use]
    pub const fn pid(&self) -> Option<ProcessId> {
        self.pid
    }

    /// Returns when the probe ran.
    #[must_use]
    pub const fn checked_at(&self) -> DateTime<Utc> {
        self.checked_at
    }
}
