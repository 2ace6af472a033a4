//! Port contracts for local service supervision.

mod launcher;
mod opener;
mod prober;
mod registry;

pub use launcher::{ProcessLauncher, ProcessLauncherError, ProcessLauncherResult};
pub use opener::{WorkspaceOpener, WorkspaceOpenerError, WorkspaceOpenerResult};
pub use prober::{PortProber, PortProberError, PortProberResult};
pub use registry::{ServiceRegistry, ServiceRegistryError, ServiceRegistryResult};
