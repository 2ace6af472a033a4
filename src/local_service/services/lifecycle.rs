//! Service layer for starting and stopping local services.

use super::{
    ServiceControlError, ServiceControlResult,
    support::{existing_directory, probe_owners},
};
use crate::local_service::{
    domain::{LaunchSpec, PORT_ENV_VAR, RuntimeStatus, ServicePort, StartOutcome, StopOutcome},
    ports::{PortProber, ProcessLauncher, ServiceRegistry},
};
use camino::Utf8PathBuf;
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Tunables for the lifecycle controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleSettings {
    /// Home directory used to expand `~` in service paths.
    pub home_dir: Option<Utf8PathBuf>,
    /// Wait between launching a process and re-probing its port.
    pub settle_delay: Duration,
    /// Wait between sending kill signals and the confirming probe.
    pub stop_grace: Duration,
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self {
            home_dir: None,
            settle_delay: Duration::from_millis(1500),
            stop_grace: Duration::from_millis(500),
        }
    }
}

/// Start/stop orchestration for configured services.
///
/// No process handle is kept between calls: stop always finds its targets
/// by probing the port, so it kills whatever owns the port at that moment.
pub struct ServiceLifecycleService<R, P, L, C>
where
    R: ServiceRegistry + ?Sized,
    P: PortProber + ?Sized,
    L: ProcessLauncher + ?Sized,
    C: Clock + Send + Sync,
{
    registry: Arc<R>,
    prober: Arc<P>,
    launcher: Arc<L>,
    clock: Arc<C>,
    settings: LifecycleSettings,
}

impl<R, P, L, C> ServiceLifecycleService<R, P, L, C>
where
    R: ServiceRegistry + ?Sized,
    P: PortProber + ?Sized,
    L: ProcessLauncher + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new lifecycle service.
    #[must_use]
    pub const fn new(
        registry: Arc<R>,
        prober: Arc<P>,
        launcher: Arc<L>,
        clock: Arc<C>,
        settings: LifecycleSettings,
    ) -> Self {
        Self {
            registry,
            prober,
            launcher,
            clock,
            settings,
        }
    }

    /// Launches the service configured on `port`.
    ///
    /// The process is spawned detached with `PORT` set, then the port is
    /// probed again after the settling delay. A port that is still free is
    /// reported as a successful start that may still be initializing.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceControlError::ServiceNotFound`],
    /// [`ServiceControlError::DirectoryMissing`],
    /// [`ServiceControlError::AlreadyRunning`] (nothing is launched),
    /// [`ServiceControlError::InvalidDescriptor`] for an unparsable command,
    /// [`ServiceControlError::LaunchFailed`], or configuration errors.
    pub async fn start(&self, port: ServicePort) -> ServiceControlResult<StartOutcome> {
        let descriptor = self
            .registry
            .find_by_port(port)
            .await?
            .ok_or(ServiceControlError::ServiceNotFound(port))?;

        let directory = existing_directory(&descriptor, self.settings.home_dir.as_deref()).await?;

        let existing_owners = probe_owners(&*self.prober, port).await;
        if let Some(&pid) = existing_owners.first() {
            return Err(ServiceControlError::AlreadyRunning { port, pid });
        }

        let command = descriptor.start_command().parse()?;
        let spec = LaunchSpec::new(command, directory).with_env(PORT_ENV_VAR, port.to_string());
        let spawned_pid = self.launcher.launch(&spec).await?;
        info!(
            %port,
            service = %descriptor.name(),
            program = spec.program(),
            directory = %spec.working_directory(),
            pid = ?spawned_pid.map(|pid| pid.get()),
            "launched service"
        );

        tokio::time::sleep(self.settings.settle_delay).await;

        let settled_owners = probe_owners(&*self.prober, port).await;
        let status = RuntimeStatus::from_owners(&settled_owners, self.clock.utc());
        if !status.running() {
            info!(%port, service = %descriptor.name(), "port not bound yet after settling delay");
        }

        Ok(StartOutcome::new(
            descriptor.name().clone(),
            port,
            spawned_pid,
            status,
        ))
    }

    /// Kills every process listening on `port`.
    ///
    /// Success means kill signals were sent. One confirming probe runs after
    /// the stop grace period and its result is reported as `released`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceControlError::NothingRunning`] when the port is free
    /// (no signal is sent) and [`ServiceControlError::TerminateFailed`] when
    /// a signal cannot be delivered.
    pub async fn stop(&self, port: ServicePort) -> ServiceControlResult<StopOutcome> {
        let owners = probe_owners(&*self.prober, port).await;
        if owners.is_empty() {
            return Err(ServiceControlError::NothingRunning(port));
        }

        self.launcher.terminate(&owners).await?;
        let name = match self.registry.find_by_port(port).await {
            Ok(descriptor) => descriptor.map(|descriptor| descriptor.name().clone()),
            Err(err) => {
                warn!(%port, error = %err, "could not look up service name");
                None
            }
        };
        info!(
            %port,
            service = ?name.as_ref().map(ToString::to_string),
            killed = owners.len(),
            "sent kill to port owners"
        );

        tokio::time::sleep(self.settings.stop_grace).await;
        let released = probe_owners(&*self.prober, port).await.is_empty();
        if !released {
            warn!(%port, "port still bound after stop grace period");
        }

        Ok(StopOutcome::new(port, name, owners, released))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_service::{
        adapters::memory::{InMemoryProcessHost, InMemoryServiceRegistry},
        domain::{ProcessId, ServiceDescriptor, ServiceName, ServicePath, StartCommand},
        ports::{PortProberResult, ProcessLauncherError, ProcessLauncherResult},
    };
    use async_trait::async_trait;
    use mockable::DefaultClock;
    use rstest::rstest;

    mockall::mock! {
        Launcher {}

        #[async_trait]
        impl ProcessLauncher for Launcher {
            async fn launch(&self, spec: &LaunchSpec) -> ProcessLauncherResult<Option<ProcessId>>;
            async fn terminate(&self, pids: &[ProcessId]) -> ProcessLauncherResult<()>;
        }
    }

    mockall::mock! {
        Prober {}

        #[async_trait]
        impl PortProber for Prober {
            async fn owners(&self, port: ServicePort) -> PortProberResult<Vec<ProcessId>>;
        }
    }

    fn port(value: u16) -> ServicePort {
        ServicePort::new(value).expect("valid port")
    }

    fn descriptor(value: u16, path: &str) -> ServiceDescriptor {
        ServiceDescriptor::new(
            ServiceName::new("api").expect("valid name"),
            port(value),
            ServicePath::new(path).expect("valid path"),
            StartCommand::new("node server.js").expect("valid command"),
        )
        .with_kind("backend")
    }

    fn temp_dir() -> String {
        std::env::temp_dir().to_string_lossy().into_owned()
    }

    fn instant_settings() -> LifecycleSettings {
        LifecycleSettings {
            home_dir: None,
            settle_delay: Duration::ZERO,
            stop_grace: Duration::ZERO,
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn start_on_bound_port_never_launches() {
        let registry = Arc::new(InMemoryServiceRegistry::with_descriptors(vec![descriptor(
            4000,
            &temp_dir(),
        )]));
        let mut prober = MockProber::new();
        prober
            .expect_owners()
            .returning(|_| Ok(vec![ProcessId::from_raw(321)]));
        let mut launcher = MockLauncher::new();
        launcher.expect_launch().times(0);

        let service = ServiceLifecycleService::new(
            registry,
            Arc::new(prober),
            Arc::new(launcher),
            Arc::new(DefaultClock),
            instant_settings(),
        );

        let result = service.start(port(4000)).await;

        assert!(matches!(
            result,
            Err(ServiceControlError::AlreadyRunning { pid, .. }) if pid == ProcessId::from_raw(321)
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_launch_skips_settling_probe() {
        let registry = Arc::new(InMemoryServiceRegistry::with_descriptors(vec![descriptor(
            4000,
            &temp_dir(),
        )]));
        let mut prober = MockProber::new();
        prober.expect_owners().times(1).returning(|_| Ok(Vec::new()));
        let mut launcher = MockLauncher::new();
        launcher.expect_launch().times(1).returning(|spec| {
            Err(ProcessLauncherError::spawn(
                spec.program(),
                std::io::Error::from(std::io::ErrorKind::NotFound),
            ))
        });

        let service = ServiceLifecycleService::new(
            registry,
            Arc::new(prober),
            Arc::new(launcher),
            Arc::new(DefaultClock),
            instant_settings(),
        );

        let result = service.start(port(4000)).await;

        assert!(
            matches!(result, Err(ServiceControlError::LaunchFailed(_))),
            "spawn failure should surface as a launch failure, got {result:?}"
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn stop_on_free_port_never_terminates() {
        let mut prober = MockProber::new();
        prober.expect_owners().returning(|_| Ok(Vec::new()));
        let mut launcher = MockLauncher::new();
        launcher.expect_terminate().times(0);

        let service = ServiceLifecycleService::new(
            Arc::new(InMemoryServiceRegistry::new()),
            Arc::new(prober),
            Arc::new(launcher),
            Arc::new(DefaultClock),
            instant_settings(),
        );

        let result = service.stop(port(4000)).await;

        assert!(matches!(result, Err(ServiceControlError::NothingRunning(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn start_expands_home_and_injects_port() {
        let home = camino::Utf8PathBuf::from(temp_dir());
        let registry = Arc::new(InMemoryServiceRegistry::with_descriptors(vec![descriptor(
            4000, "~",
        )]));
        let host = Arc::new(InMemoryProcessHost::new());
        let service = ServiceLifecycleService::new(
            registry,
            host.clone(),
            host.clone(),
            Arc::new(DefaultClock),
            LifecycleSettings {
                home_dir: Some(home.clone()),
                ..instant_settings()
            },
        );

        let outcome = service
            .start(port(4000))
            .await
            .expect("start should succeed");

        assert!(outcome.initializing());
        let launches = host.launches().expect("launch log should be readable");
        let spec = launches.first().expect("one launch recorded");
        assert_eq!(spec.program(), "node");
        assert_eq!(spec.args(), ["server.js".to_owned()]);
        assert_eq!(spec.working_directory(), home.as_path());
        assert_eq!(spec.env().get(PORT_ENV_VAR).map(String::as_str), Some("4000"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn start_reports_bound_port_when_process_listens() {
        let registry = Arc::new(InMemoryServiceRegistry::with_descriptors(vec![descriptor(
            4000,
            &temp_dir(),
        )]));
        let host = Arc::new(InMemoryProcessHost::new());
        host.set_bind_on_launch(true)
            .expect("host state should be writable");
        let service = ServiceLifecycleService::new(
            registry,
            host.clone(),
            host,
            Arc::new(DefaultClock),
            instant_settings(),
        );

        let outcome = service
            .start(port(4000))
            .await
            .expect("start should succeed");

        assert!(!outcome.initializing());
        assert_eq!(outcome.status().pid(), outcome.spawned_pid());
    }

    #[rstest]
    #[case("/definitely/not/a/real/dir")]
    #[case("~/definitely-not-a-real-dir")]
    #[tokio::test(flavor = "multi_thread")]
    async fn start_with_missing_directory_fails(#[case] path: &str) {
        let registry = Arc::new(InMemoryServiceRegistry::with_descriptors(vec![descriptor(
            4000, path,
        )]));
        let host = Arc::new(InMemoryProcessHost::new());
        let service = ServiceLifecycleService::new(
            registry,
            host.clone(),
            host.clone(),
            Arc::new(DefaultClock),
            LifecycleSettings {
                home_dir: Some(camino::Utf8PathBuf::from(temp_dir())),
                ..instant_settings()
            },
        );

        let result = service.start(port(4000)).await;

        assert!(matches!(
            result,
            Err(ServiceControlError::DirectoryMissing { .. })
        ));
        assert!(host.launches().expect("launch log").is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn start_unknown_port_is_not_found() {
        let host = Arc::new(InMemoryProcessHost::new());
        let service = ServiceLifecycleService::new(
            Arc::new(InMemoryServiceRegistry::new()),
            host.clone(),
            host,
            Arc::new(DefaultClock),
            instant_settings(),
        );

        let result = service.start(port(4000)).await;

        assert!(matches!(result, Err(ServiceControlError::ServiceNotFound(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn stop_kills_every_owner_and_confirms_release() {
        let host = Arc::new(InMemoryProcessHost::new());
        host.bind(port(4000), ProcessId::from_raw(10))
            .expect("host state should be writable");
        host.bind(port(4000), ProcessId::from_raw(11))
            .expect("host state should be writable");
        let service = ServiceLifecycleService::new(
            Arc::new(InMemoryServiceRegistry::with_descriptors(vec![descriptor(
                4000,
                &temp_dir(),
            )])),
            host.clone(),
            host.clone(),
            Arc::new(DefaultClock),
            instant_settings(),
        );

        let outcome = service.stop(port(4000)).await.expect("stop should succeed");

        assert!(outcome.released());
        assert_eq!(
            outcome.terminated(),
            [ProcessId::from_raw(10), ProcessId::from_raw(11)]
        );
        assert_eq!(outcome.name().map(ServiceName::as_str), Some("api"));
        assert_eq!(
            host.terminated().expect("kill log"),
            vec![ProcessId::from_raw(10), ProcessId::from_raw(11)]
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn stop_succeeds_even_when_port_stays_bound() {
        let host = Arc::new(InMemoryProcessHost::new());
        host.bind(port(4000), ProcessId::from_raw(10))
            .expect("host state should be writable");
        host.set_kill_ignored(true)
            .expect("host state should be writable");
        let service = ServiceLifecycleService::new(
            Arc::new(InMemoryServiceRegistry::new()),
            host.clone(),
            host,
            Arc::new(DefaultClock),
            instant_settings(),
        );

        let outcome = service.stop(port(4000)).await.expect("stop should succeed");

        assert!(!outcome.released());
        assert_eq!(outcome.name(), None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_probe_counts_as_not_running() {
        let registry = Arc::new(InMemoryServiceRegistry::with_descriptors(vec![descriptor(
            4000,
            &temp_dir(),
        )]));
        let host = Arc::new(InMemoryProcessHost::new());
        host.bind(port(4000), ProcessId::from_raw(10))
            .expect("host state should be writable");
        host.fail_probes_for(port(4000))
            .expect("host state should be writable");
        let service = ServiceLifecycleService::new(
            registry,
            host.clone(),
            host.clone(),
            Arc::new(DefaultClock),
            instant_settings(),
        );

        let outcome = service
            .start(port(4000))
            .await
            .expect("start should proceed past a failed probe");

        assert!(outcome.initializing());
        assert_eq!(host.launches().expect("launch log").len(), 1);
    }
}
