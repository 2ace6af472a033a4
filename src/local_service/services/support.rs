//! Helpers shared by the application services.

use super::{ServiceControlError, ServiceControlResult};
use crate::local_service::{
    domain::{ProcessId, ServiceDescriptor, ServicePort},
    ports::PortProber,
};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, warn};

/// Probes a port, treating any probe failure as "nothing listening".
///
/// Failures are logged and never surfaced; this trades accuracy for a
/// status answer on every call.
pub(crate) async fn probe_owners<P>(prober: &P, port: ServicePort) -> Vec<ProcessId>
where
    P: PortProber + ?Sized,
{
    match prober.owners(port).await {
        Ok(owners) => {
            debug!(%port, owners = owners.len(), "probed port");
            owners
        }
        Err(err) => {
            warn!(%port, error = %err, "port probe failed; reporting not running");
            Vec::new()
        }
    }
}

/// Expands the descriptor's path and checks that it is a directory.
pub(crate) async fn existing_directory(
    descriptor: &ServiceDescriptor,
    home: Option<&Utf8Path>,
) -> ServiceControlResult<Utf8PathBuf> {
    let directory = descriptor.path().expand(home);
    let is_directory = tokio::fs::metadata(&directory)
        .await
        .is_ok_and(|metadata| metadata.is_dir());
    if !is_directory {
        return Err(ServiceControlError::DirectoryMissing {
            port: descriptor.port(),
            path: directory,
        });
    }
    Ok(directory)
}
