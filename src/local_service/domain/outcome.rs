//! Results of lifecycle commands.

use super::{ProcessId, RuntimeStatus, ServiceName, ServicePort};
use serde::Serialize;

/// Result of a start attempt.
///
/// A start is considered attempted, not necessarily completed: when the
/// port is still free after the settling delay the process may still be
/// initializing and callers must probe again later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartOutcome {
    name: ServiceName,
    port: ServicePort,
    spawned_pid: Option<ProcessId>,
    status: RuntimeStatus,
}

impl StartOutcome {
    /// Creates a start outcome from the post-delay probe.
    #[must_use]
    pub const fn new(
        name: ServiceName,
        port: ServicePort,
        spawned_pid: Option<ProcessId>,
        status: RuntimeStatus,
    ) -> Self {
        Self {
            name,
            port,
            spawned_pid,
            status,
        }
    }

    /// Returns the service name.
    #[must_use]
    pub const fn name(&self) -> &ServiceName {
        &self.name
    }

    /// Returns the service port.
    #[must_use]
    pub const fn port(&self) -> ServicePort {
        self.port
    }

    /// Returns the pid of the launched process, when the launcher knew it.
    #[must_use]
    pub const fn spawned_pid(&self) -> Option<ProcessId> {
        self.spawned_pid
    }

    /// Returns the status observed after the settling delay.
    #[must_use]
    pub const fn status(&self) -> &RuntimeStatus {
        &self.status
    }

    /// Returns whether the port was still free after the settling delay.
    #[must_use]
    pub const fn initializing(&self) -> bool {
        !self.status.running()
    }

    /// Returns a human-readable summary.
    #[must_use]
    pub fn message(&self) -> String {
        if self.initializing() {
            format!(
                "Started {} on port {}; it may still be initializing",
                self.name, self.port
            )
        } else {
            format!("Started {} on port {}", self.name, self.port)
        }
    }
}

/// Result of a stop command.
///
/// Success only means termination was issued. `released` reports whether a
/// single follow-up probe saw the port free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopOutcome {
    port: ServicePort,
    name: Option<ServiceName>,
    terminated: Vec<ProcessId>,
    released: bool,
}

impl StopOutcome {
    /// Creates a stop outcome.
    #[must_use]
    pub const fn new(
        port: ServicePort,
        name: Option<ServiceName>,
        terminated: Vec<ProcessId>,
        released: bool,
    ) -> Self {
        Self {
            port,
            name,
            terminated,
            released,
        }
    }

    /// Returns the port that was stopped.
    #[must_use]
    pub const fn port(&self) -> ServicePort {
        self.port
    }

    /// Returns the registered service name, if the port is configured.
    #[must_use]
    pub const fn name(&self) -> Option<&ServiceName> {
        self.name.as_ref()
    }

    /// Returns the processes that were sent a kill signal.
    #[must_use]
    pub fn terminated(&self) -> &[ProcessId] {
        &self.terminated
    }

    /// Returns whether the port was free on the follow-up probe.
    #[must_use]
    pub const fn released(&self) -> bool {
        self.released
    }

    /// Returns a human-readable summary.
    #[must_use]
    pub fn message(&self) -> String {
        let pids = self
            .terminated
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let subject = self.name.as_ref().map_or_else(
            || format!("port {}", self.port),
            |name| format!("{name} on port {}", self.port),
        );
        if self.released {
            format!("Stopped {subject} (pid {pids})")
        } else {
            format!("Sent kill to {subject} (pid {pids}); the port is not free yet")
        }
    }
}
