//! Wiring of the local service ports into the application services.
//!
//! Front ends hold one [`Supervisor`] behind an `Arc` and call into the
//! services it owns. Ports are type-erased so production adapters and
//! in-memory adapters can be swapped without changing the front ends.

use crate::local_service::{
    ports::{PortProber, ProcessLauncher, ServiceRegistry, WorkspaceOpener},
    services::{
        LifecycleSettings, ServiceCatalogService, ServiceLifecycleService, ServiceStatusService,
        ServiceWorkspaceService,
    },
};
use mockable::DefaultClock;
use std::sync::Arc;

/// Status service over type-erased ports.
pub type StatusService = ServiceStatusService<dyn ServiceRegistry, dyn PortProber, DefaultClock>;

/// Lifecycle service over type-erased ports.
pub type LifecycleService =
    ServiceLifecycleService<dyn ServiceRegistry, dyn PortProber, dyn ProcessLauncher, DefaultClock>;

/// Catalog service over a type-erased registry.
pub type CatalogService = ServiceCatalogService<dyn ServiceRegistry>;

/// Workspace service over type-erased ports.
pub type WorkspaceService = ServiceWorkspaceService<dyn ServiceRegistry, dyn WorkspaceOpener>;

/// Adapters backing a [`Supervisor`].
#[derive(Clone)]
pub struct SupervisorPorts {
    /// Descriptor persistence.
    pub registry: Arc<dyn ServiceRegistry>,
    /// Socket table inspection.
    pub prober: Arc<dyn PortProber>,
    /// Process spawning and killing.
    pub launcher: Arc<dyn ProcessLauncher>,
    /// Editor and file browser integration.
    pub opener: Arc<dyn WorkspaceOpener>,
}

/// Application services shared by the HTTP and MCP front ends.
pub struct Supervisor {
    status: StatusService,
    lifecycle: LifecycleService,
    catalog: CatalogService,
    workspace: WorkspaceService,
}

impl Supervisor {
    /// Builds every service over the same set of adapters.
    #[must_use]
    pub fn new(ports: SupervisorPorts, settings: LifecycleSettings) -> Self {
        let clock = Arc::new(DefaultClock);
        let workspace = ServiceWorkspaceService::new(
            Arc::clone(&ports.registry),
            ports.opener,
            settings.home_dir.clone(),
        );
        Self {
            status: ServiceStatusService::new(
                Arc::clone(&ports.registry),
                Arc::clone(&ports.prober),
                Arc::clone(&clock),
            ),
            lifecycle: ServiceLifecycleService::new(
                Arc::clone(&ports.registry),
                ports.prober,
                ports.launcher,
                clock,
                settings,
            ),
            catalog: ServiceCatalogService::new(ports.registry),
            workspace,
        }
    }

    /// Returns the status aggregator.
    #[must_use]
    pub const fn status(&self) -> &StatusService {
        &self.status
    }

    /// Returns the lifecycle controller.
    #[must_use]
    pub const fn lifecycle(&self) -> &LifecycleService {
        &self.lifecycle
    }

    /// Returns the descriptor catalog.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    /// Returns the workspace opener service.
    #[must_use]
    pub const fn workspace(&self) -> &WorkspaceService {
        &self.workspace
    }
}

#[cfg(unix)]
mod system {
    use super::{Supervisor, SupervisorPorts};
    use crate::config::SupervisorConfig;
    use crate::local_service::adapters::{
        json::JsonFileServiceRegistry,
        system::{LsofPortProber, ShellWorkspaceOpener, SystemProcessLauncher},
    };
    use std::sync::Arc;

    impl Supervisor {
        /// Builds a supervisor over the JSON file registry and host adapters.
        #[must_use]
        pub fn system(config: &SupervisorConfig) -> Self {
            let ports = SupervisorPorts {
                registry: Arc::new(JsonFileServiceRegistry::new(config.config_path.clone())),
                prober: Arc::new(LsofPortProber::new(config.probe_timeout)),
                launcher: Arc::new(SystemProcessLauncher::new()),
                opener: Arc::new(ShellWorkspaceOpener::new()),
            };
            Self::new(ports, config.lifecycle_settings())
        }
    }
}
