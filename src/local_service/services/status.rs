//! Fleet status aggregation.

use super::{ServiceControlError, ServiceControlResult, support::probe_owners};
use crate::local_service::{
    domain::{FleetSummary, RuntimeStatus, ServicePort, ServiceView, StatusFilter},
    ports::{PortProber, ServiceRegistry},
};
use futures::future::join_all;
use mockable::Clock;
use std::sync::Arc;

/// Joins descriptors with fresh probes.
pub struct ServiceStatusService<R, P, C>
where
    R: ServiceRegistry + ?Sized,
    P: PortProber + ?Sized,
    C: Clock + Send + Sync,
{
    registry: Arc<R>,
    prober: Arc<P>,
    clock: Arc<C>,
}

impl<R, P, C> ServiceStatusService<R, P, C>
where
    R: ServiceRegistry + ?Sized,
    P: PortProber + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new status service.
    #[must_use]
    pub const fn new(registry: Arc<R>, prober: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            registry,
            prober,
            clock,
        }
    }

    /// Returns every configured service with its current status.
    ///
    /// All ports are probed concurrently and the call returns once every
    /// probe has finished. A failed probe reads as "not running". Results
    /// keep registry order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceControlError::ConfigIoFailure`] when configuration
    /// cannot be read.
    pub async fn get_all(&self, filter: &StatusFilter) -> ServiceControlResult<Vec<ServiceView>> {
        let descriptors = self.registry.load_all().await?;

        let probes = descriptors
            .iter()
            .map(|descriptor| probe_owners(&*self.prober, descriptor.port()));
        let probed = join_all(probes).await;
        let checked_at = self.clock.utc();

        Ok(descriptors
            .into_iter()
            .zip(probed)
            .map(|(descriptor, owners)| {
                ServiceView::new(descriptor, RuntimeStatus::from_owners(&owners, checked_at))
            })
            .filter(|view| filter.matches(view))
            .collect())
    }

    /// Probes any port, configured or not.
    pub async fn status_of(&self, port: ServicePort) -> RuntimeStatus {
        let owners = probe_owners(&*self.prober, port).await;
        RuntimeStatus::from_owners(&owners, self.clock.utc())
    }

    /// Returns one configured service with its current status.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceControlError::ServiceNotFound`] for an unknown port
    /// and configuration errors from the registry.
    pub async fn service_info(&self, port: ServicePort) -> ServiceControlResult<ServiceView> {
        let descriptor = self
            .registry
            .find_by_port(port)
            .await?
            .ok_or(ServiceControlError::ServiceNotFound(port))?;
        let status = self.status_of(port).await;
        Ok(ServiceView::new(descriptor, status))
    }

    /// Summarizes the fleet.
    ///
    /// # Errors
    ///
    /// Returns configuration errors from the registry.
    pub async fn summary(&self) -> ServiceControlResult<FleetSummary> {
        Ok(FleetSummary::from_views(
            self.get_all(&StatusFilter::All).await?,
        ))
    }
}
