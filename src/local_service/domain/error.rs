//! Error types for local service domain validation.

use thiserror::Error;

/// Errors returned while constructing local service domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocalServiceDomainError {
    /// The service name is empty after trimming.
    #[error("service name must not be empty")]
    EmptyServiceName,

    /// Port zero cannot identify a listening service.
    #[error("service port must be between 1 and 65535, got {0}")]
    InvalidPort(u16),

    /// The start command is empty after trimming.
    #[error("start command must not be empty")]
    EmptyStartCommand,

    /// The service path is empty after trimming.
    #[error("service path must not be empty")]
    EmptyServicePath,
}
