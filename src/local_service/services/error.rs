//! Errors shared by the local service application services.

use crate::local_service::{
    domain::{LocalServiceDomainError, ProcessId, ServicePort},
    ports::{ProcessLauncherError, ServiceRegistryError, WorkspaceOpenerError},
};
use camino::Utf8PathBuf;
use thiserror::Error;

/// Service-level errors for status, lifecycle, and catalog operations.
#[derive(Debug, Error)]
pub enum ServiceControlError {
    /// No descriptor is registered on the port.
    #[error("no service is configured on port {0}")]
    ServiceNotFound(ServicePort),

    /// The configured working directory does not exist.
    #[error("directory {path} for port {port} does not exist")]
    DirectoryMissing {
        /// Service port.
        port: ServicePort,
        /// Expanded directory that was checked.
        path: Utf8PathBuf,
    },

    /// A process already owns the port.
    #[error("port {port} is already in use by process {pid}")]
    AlreadyRunning {
        /// Service port.
        port: ServicePort,
        /// First owning process.
        pid: ProcessId,
    },

    /// Nothing is listening on the port.
    #[error("nothing is running on port {0}")]
    NothingRunning(ServicePort),

    /// A descriptor already uses the port.
    #[error("a service is already configured on port {0}")]
    DuplicatePort(ServicePort),

    /// Spawning the service process failed.
    #[error(transparent)]
    LaunchFailed(ProcessLauncherError),

    /// Delivering a kill signal failed.
    #[error(transparent)]
    TerminateFailed(ProcessLauncherError),

    /// Opening a workspace directory failed.
    #[error(transparent)]
    OpenFailed(#[from] WorkspaceOpenerError),

    /// A descriptor or start command failed validation.
    #[error(transparent)]
    InvalidDescriptor(#[from] LocalServiceDomainError),

    /// Configuration could not be read or written.
    #[error(transparent)]
    ConfigIoFailure(ServiceRegistryError),
}

impl From<ServiceRegistryError> for ServiceControlError {
    fn from(err: ServiceRegistryError) -> Self {
        match err {
            ServiceRegistryError::DuplicatePort(port) => Self::DuplicatePort(port),
            ServiceRegistryError::NotFound(port) => Self::ServiceNotFound(port),
            other => Self::ConfigIoFailure(other),
        }
    }
}

impl From<ProcessLauncherError> for ServiceControlError {
    fn from(err: ProcessLauncherError) -> Self {
        match err {
            ProcessLauncherError::Spawn { .. } => Self::LaunchFailed(err),
            ProcessLauncherError::Terminate { .. } => Self::TerminateFailed(err),
        }
    }
}

/// Result type for application service operations.
pub type ServiceControlResult<T> = Result<T, ServiceControlError>;
