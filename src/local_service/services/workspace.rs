//! Opening service directories in external applications.

use super::{ServiceControlError, ServiceControlResult, support::existing_directory};
use crate::local_service::{
    domain::{OpenTarget, ServicePort},
    ports::{ServiceRegistry, WorkspaceOpener},
};
use camino::Utf8PathBuf;
use std::sync::Arc;
use tracing::info;

/// Opens a configured service's directory in an editor or file browser.
pub struct ServiceWorkspaceService<R, O>
where
    R: ServiceRegistry + ?Sized,
    O: WorkspaceOpener + ?Sized,
{
    registry: Arc<R>,
    opener: Arc<O>,
    home_dir: Option<Utf8PathBuf>,
}

impl<R, O> ServiceWorkspaceService<R, O>
where
    R: ServiceRegistry + ?Sized,
    O: WorkspaceOpener + ?Sized,
{
    /// Creates a new workspace service.
    #[must_use]
    pub const fn new(registry: Arc<R>, opener: Arc<O>, home_dir: Option<Utf8PathBuf>) -> Self {
        Self {
            registry,
            opener,
            home_dir,
        }
    }

    /// Opens the directory of the service on `port` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceControlError::ServiceNotFound`],
    /// [`ServiceControlError::DirectoryMissing`], or
    /// [`ServiceControlError::OpenFailed`].
    pub async fn open(
        &self,
        port: ServicePort,
        target: OpenTarget,
    ) -> ServiceControlResult<Utf8PathBuf> {
        let descriptor = self
            .registry
            .find_by_port(port)
            .await?
            .ok_or(ServiceControlError::ServiceNotFound(port))?;
        let directory = existing_directory(&descriptor, self.home_dir.as_deref()).await?;

        self.opener.open(target, &directory).await?;
        info!(%port, %target, %directory, "opened service directory");
        Ok(directory)
    }
}
