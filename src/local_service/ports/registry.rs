//! Registry port for persisted service descriptors.

use crate::local_service::domain::{ServiceDescriptor, ServicePort};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for service registry operations.
pub type ServiceRegistryResult<T> = Result<T, ServiceRegistryError>;

/// Persistence contract for service descriptors.
///
/// Implementations read the full descriptor list on every call; nothing is
/// cached between calls.
#[async_trait]
pub trait ServiceRegistry: Send + Sync {
    /// Returns every descriptor in configuration order.
    async fn load_all(&self) -> ServiceRegistryResult<Vec<ServiceDescriptor>>;

    /// Returns the first descriptor in load order whose port matches.
    ///
    /// Duplicate ports are a configuration mistake; the earliest entry wins.
    async fn find_by_port(
        &self,
        port: ServicePort,
    ) -> ServiceRegistryResult<Option<ServiceDescriptor>> {
        Ok(self
            .load_all()
            .await?
            .into_iter()
            .find(|descriptor| descriptor.port() == port))
    }

    /// Appends a descriptor at the end of the list.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRegistryError::DuplicatePort`] when a descriptor
    /// already uses the port.
    async fn append(&self, descriptor: ServiceDescriptor) -> ServiceRegistryResult<()>;

    /// Removes every descriptor with the port and returns them.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRegistryError::NotFound`] when no descriptor uses the
    /// port.
    async fn remove_by_port(
        &self,
        port: ServicePort,
    ) -> ServiceRegistryResult<Vec<ServiceDescriptor>>;
}

/// Errors returned by service registry implementations.
#[derive(Debug, Clone, Error)]
pub enum ServiceRegistryError {
    /// A descriptor with the same port already exists.
    #[error("a service is already registered on port {0}")]
    DuplicatePort(ServicePort),

    /// No descriptor uses the port.
    #[error("no service is registered on port {0}")]
    NotFound(ServicePort),

    /// The configuration document could not be decoded.
    #[error("invalid service configuration: {0}")]
    InvalidDocument(Arc<dyn std::error::Error + Send + Sync>),

    /// Reading or writing configuration failed.
    #[error("service configuration IO error: {0}")]
    Io(Arc<dyn std::error::Error + Send + Sync>),
}

impl ServiceRegistryError {
    /// Wraps a decoding failure.
    pub fn invalid_document(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidDocument(Arc::new(err))
    }

    /// Wraps an IO failure.
    pub fn io(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Io(Arc::new(err))
    }
}
