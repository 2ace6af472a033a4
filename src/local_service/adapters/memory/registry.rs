//! In-memory service registry.

use crate::local_service::{
    domain::{ServiceDescriptor, ServicePort},
    ports::{ServiceRegistry, ServiceRegistryError, ServiceRegistryResult},
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory descriptor list.
#[derive(Debug, Clone, Default)]
pub struct InMemoryServiceRegistry {
    descriptors: Arc<RwLock<Vec<ServiceDescriptor>>>,
}

impl InMemoryServiceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding `descriptors` in order.
    ///
    /// Duplicate ports are kept, mirroring a hand-edited configuration file.
    #[must_use]
    pub fn with_descriptors(descriptors: Vec<ServiceDescriptor>) -> Self {
        Self {
            descriptors: Arc::new(RwLock::new(descriptors)),
        }
    }
}

fn poisoned(err: impl ToString) -> ServiceRegistryError {
    ServiceRegistryError::io(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ServiceRegistry for InMemoryServiceRegistry {
    async fn load_all(&self) -> ServiceRegistryResult<Vec<ServiceDescriptor>> {
        let descriptors = self.descriptors.read().map_err(poisoned)?;
        Ok(descriptors.clone())
    }

    async fn append(&self, descriptor: ServiceDescriptor) -> ServiceRegistryResult<()> {
        let mut descriptors = self.descriptors.write().map_err(poisoned)?;
        if descriptors.iter().any(|d| d.port() == descriptor.port()) {
            return Err(ServiceRegistryError::DuplicatePort(descriptor.port()));
        }
        descriptors.push(descriptor);
        Ok(())
    }

    async fn remove_by_port(
        &self,
        port: ServicePort,
    ) -> ServiceRegistryResult<Vec<ServiceDescriptor>> {
        let mut descriptors = self.descriptors.write().map_err(poisoned)?;
        let (removed, kept): (Vec<_>, Vec<_>) = descriptors
            .drain(..)
            .partition(|descriptor| descriptor.port() == port);
        *descriptors = kept;
        if removed.is_empty() {
            return Err(ServiceRegistryError::NotFound(port));
        }
        Ok(removed)
    }
}
