//! Process launch and termination contract.

use crate::local_service::domain::{LaunchSpec, ProcessId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for launcher operations.
pub type ProcessLauncherResult<T> = Result<T, ProcessLauncherError>;

/// Spawns and kills service processes.
#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    /// Spawns a detached process and releases its handle.
    ///
    /// Returns the pid when the platform reports one. The launcher does not
    /// track the process afterwards.
    async fn launch(&self, spec: &LaunchSpec) -> ProcessLauncherResult<Option<ProcessId>>;

    /// Forcefully terminates the processes. Processes that already exited
    /// are skipped.
    async fn terminate(&self, pids: &[ProcessId]) -> ProcessLauncherResult<()>;
}

/// Errors returned by process launchers.
#[derive(Debug, Clone, Error)]
pub enum ProcessLauncherError {
    /// The process could not be spawned.
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        /// Executable that failed to start.
        program: String,
        /// Underlying error.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// A kill signal could not be delivered.
    #[error("failed to terminate process {pid}: {source}")]
    Terminate {
        /// Target process.
        pid: ProcessId,
        /// Underlying error.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
}

impl ProcessLauncherError {
    /// Wraps a spawn failure.
    pub fn spawn(
        program: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Spawn {
            program: program.into(),
            source: Arc::new(err),
        }
    }

    /// Wraps a signal delivery failure.
    pub fn terminate(pid: ProcessId, err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Terminate {
            pid,
            source: Arc::new(err),
        }
    }
}
