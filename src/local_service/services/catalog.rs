//! Adding and removing service descriptors.

use super::ServiceControlResult;
use crate::local_service::{
    domain::{ServiceDescriptor, ServicePort},
    ports::ServiceRegistry,
};
use std::sync::Arc;
use tracing::info;

/// Maintains the persisted descriptor list.
pub struct ServiceCatalogService<R>
where
    R: ServiceRegistry + ?Sized,
{
    registry: Arc<R>,
}

impl<R> ServiceCatalogService<R>
where
    R: ServiceRegistry + ?Sized,
{
    /// Creates a new catalog service.
    #[must_use]
    pub const fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }

    /// Returns every descriptor in configuration order.
    ///
    /// # Errors
    ///
    /// Returns configuration errors from the registry.
    pub async fn list(&self) -> ServiceControlResult<Vec<ServiceDescriptor>> {
        Ok(self.registry.load_all().await?)
    }

    /// Appends a descriptor and persists it.
    ///
    /// # Errors
    ///
    /// Returns [`super::ServiceControlError::DuplicatePort`] when the port is
    /// taken and configuration errors from the registry.
    pub async fn add(
        &self,
        descriptor: ServiceDescriptor,
    ) -> ServiceControlResult<ServiceDescriptor> {
        self.registry.append(descriptor.clone()).await?;
        info!(port = %descriptor.port(), service = %descriptor.name(), "added service");
        Ok(descriptor)
    }

    /// Removes every descriptor on `port`.
    ///
    /// # Errors
    ///
    /// Returns [`super::ServiceControlError::ServiceNotFound`] when nothing is
    /// configured on the port and configuration errors from the registry.
    pub async fn remove(&self, port: ServicePort) -> ServiceControlResult<Vec<ServiceDescriptor>> {
        let removed = self.registry.remove_by_port(port).await?;
        info!(%port, removed = removed.len(), "removed service");
        Ok(removed)
    }
}
