//! Shared test helpers for in-memory supervisor integration tests.

use camino::Utf8PathBuf;
use portwarden::local_service::{
    adapters::memory::{InMemoryProcessHost, InMemoryServiceRegistry},
    domain::{ServiceDescriptor, ServiceName, ServicePath, ServicePort, StartCommand},
    services::LifecycleSettings,
};
use portwarden::supervisor::{Supervisor, SupervisorPorts};
use rstest::fixture;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides a fresh simulated host for each test.
#[fixture]
pub fn host() -> Arc<InMemoryProcessHost> {
    Arc::new(InMemoryProcessHost::new())
}

/// Returns the directory used as `~` in tests.
///
/// # Panics
///
/// Panics if the temporary directory is not valid UTF-8.
#[must_use]
pub fn home() -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(std::env::temp_dir()).expect("temp dir should be UTF-8")
}

/// Builds a validated port.
///
/// # Panics
///
/// Panics if `value` is zero.
#[must_use]
pub fn port(value: u16) -> ServicePort {
    ServicePort::new(value).expect("valid port")
}

/// Builds a descriptor rooted in the home directory.
///
/// # Panics
///
/// Panics if any field fails validation.
#[must_use]
pub fn descriptor(name: &str, value: u16, kind: &str) -> ServiceDescriptor {
    ServiceDescriptor::new(
        ServiceName::new(name).expect("valid name"),
        port(value),
        ServicePath::new("~").expect("valid path"),
        StartCommand::new("npm run dev").expect("valid command"),
    )
    .with_kind(kind)
}

/// Builds a supervisor over in-memory adapters with no lifecycle delays.
#[must_use]
pub fn supervisor(
    host: &Arc<InMemoryProcessHost>,
    descriptors: Vec<ServiceDescriptor>,
) -> Supervisor {
    Supervisor::new(
        SupervisorPorts {
            registry: Arc::new(InMemoryServiceRegistry::with_descriptors(descriptors)),
            prober: host.clone(),
            launcher: host.clone(),
            opener: host.clone(),
        },
        LifecycleSettings {
            home_dir: Some(home()),
            settle_delay: Duration::ZERO,
            stop_grace: Duration::ZERO,
        },
    )
}
