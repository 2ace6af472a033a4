//! Port prober contract.

use crate::local_service::domain::{ProcessId, ServicePort};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for port probes.
pub type PortProberResult<T> = Result<T, PortProberError>;

/// Inspects the socket table for listeners on a port.
#[async_trait]
pub trait PortProber: Send + Sync {
    /// Returns the processes listening on `port`, empty when none.
    ///
    /// Order follows the underlying inspection tool and carries no meaning.
    async fn owners(&self, port: ServicePort) -> PortProberResult<Vec<ProcessId>>;
}

/// Errors returned by port probers.
#[derive(Debug, Clone, Error)]
pub enum PortProberError {
    /// The inspection did not finish in time.
    #[error("probe of port {port} timed out after {timeout:?}")]
    TimedOut {
        /// Probed port.
        port: ServicePort,
        /// Configured limit.
        timeout: Duration,
    },

    /// The inspection tool could not run or failed.
    #[error("port inspection failed: {0}")]
    Inspection(Arc<dyn std::error::Error + Send + Sync>),
}

impl PortProberError {
    /// Wraps an inspection failure.
    pub fn inspection(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Inspection(Arc::new(err))
    }
}
