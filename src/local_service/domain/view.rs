//! Response-only projections joining descriptors with runtime status.

use super::{RuntimeStatus, ServiceDescriptor};
use serde::Serialize;

/// Descriptor joined with a fresh runtime status.
///
/// Serializes flat: descriptor fields, then `running`, `pid`, `checkedAt`,
/// and `url` when the service is running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceView {
    #[serde(flatten)]
    descriptor: ServiceDescriptor,
    #[serde(flatten)]
    status: RuntimeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl ServiceView {
    /// Joins a descriptor with its status, deriving the URL when running.
    #[must_use]
    pub fn new(descriptor: ServiceDescriptor, status: RuntimeStatus) -> Self {
        let url = status.running().then(|| descriptor.port().local_url());
        Self {
            descriptor,
            status,
            url,
        }
    }

    /// Returns the static descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }

    /// Returns the runtime status.
    #[must_use]
    pub const fn status(&self) -> &RuntimeStatus {
        &self.status
    }

    /// Returns the local URL when the service is running.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

/// Counts and running services for a quick fleet overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    /// Number of configured services.
    pub total: usize,
    /// Number of services whose port is bound.
    pub running: usize,
    /// Number of services whose port is free.
    pub stopped: usize,
    /// Views of the running services, in registry order.
    pub running_services: Vec<ServiceView>,
}

impl FleetSummary {
    /// Summarizes a full fleet snapshot.
    #[must_use]
    pub fn from_views(views: Vec<ServiceView>) -> Self {
        let total = views.len();
        let running_services: Vec<ServiceView> = views
            .into_iter()
            .filter(|view| view.status().running())
            .collect();
        let running = running_services.len();
        Self {
            total,
            running,
            stopped: total.saturating_sub(running),
            running_services,
        }
    }
}
