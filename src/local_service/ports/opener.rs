//! Workspace opener contract.

use crate::local_service::domain::OpenTarget;
use async_trait::async_trait;
use camino::Utf8Path;
use std::sync::Arc;
use thiserror::Error;

/// Result type for workspace opener operations.
pub type WorkspaceOpenerResult<T> = Result<T, WorkspaceOpenerError>;

/// Opens a directory in an external application.
#[async_trait]
pub trait WorkspaceOpener: Send + Sync {
    /// Issues the open command; success means it started without error.
    async fn open(&self, target: OpenTarget, directory: &Utf8Path) -> WorkspaceOpenerResult<()>;
}

/// Errors returned by workspace openers.
#[derive(Debug, Clone, Error)]
#[error("failed to open {directory} in {target}: {source}")]
pub struct WorkspaceOpenerError {
    /// Requested application.
    pub target: OpenTarget,
    /// Directory that was being opened.
    pub directory: String,
    /// Underlying error.
    pub source: Arc<dyn std::error::Error + Send + Sync>,
}

impl WorkspaceOpenerError {
    /// Wraps a failure to run the open command.
    pub fn new(
        target: OpenTarget,
        directory: &Utf8Path,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            target,
            directory: directory.to_string(),
            source: Arc::new(err),
        }
    }
}
