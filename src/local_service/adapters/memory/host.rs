//! In-memory process host implementing the prober, launcher, and opener
//! ports.

use crate::local_service::{
    domain::{LaunchSpec, OpenTarget, PORT_ENV_VAR, ProcessId, ServicePort},
    ports::{
        PortProber, PortProberError, PortProberResult, ProcessLauncher, ProcessLauncherError,
        ProcessLauncherResult, WorkspaceOpener, WorkspaceOpenerError, WorkspaceOpenerResult,
    },
};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

const FIRST_PID: u32 = 1000;

/// Error raised when the shared host state lock is poisoned.
#[derive(Debug, Clone, Error)]
#[error("in-memory host state is unavailable: {0}")]
pub struct InMemoryHostError(String);

/// Simulated socket table and process host.
///
/// Nothing is spawned. Launches are recorded and, when bind-on-launch is
/// enabled, the new pid starts listening on the port named by the `PORT`
/// variable. Kills remove pids from the socket table unless kills are set to
/// be ignored.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProcessHost {
    state: Arc<RwLock<HostState>>,
}

#[derive(Debug, Default)]
struct HostState {
    listeners: BTreeMap<ServicePort, Vec<ProcessId>>,
    failing_probes: HashSet<ServicePort>,
    bind_on_launch: bool,
    kill_ignored: bool,
    launch_failure: bool,
    open_failure: bool,
    issued_pids: u32,
    launches: Vec<LaunchSpec>,
    terminated: Vec<ProcessId>,
    opened: Vec<(OpenTarget, Utf8PathBuf)>,
}

impl InMemoryProcessHost {
    /// Creates a host with an empty socket table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HostState>, InMemoryHostError> {
        self.state
            .read()
            .map_err(|err| InMemoryHostError(err.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HostState>, InMemoryHostError> {
        self.state
            .write()
            .map_err(|err| InMemoryHostError(err.to_string()))
    }

    /// Makes `pid` listen on `port`.
    ///
    /// # Errors
    ///
    /// Returns [`InMemoryHostError`] when the state lock is poisoned.
    pub fn bind(&self, port: ServicePort, pid: ProcessId) -> Result<(), InMemoryHostError> {
        self.write()?.listeners.entry(port).or_default().push(pid);
        Ok(())
    }

    /// Controls whether launched processes bind their `PORT` immediately.
    ///
    /// # Errors
    ///
    /// Returns [`InMemoryHostError`] when the state lock is poisoned.
    pub fn set_bind_on_launch(&self, enabled: bool) -> Result<(), InMemoryHostError> {
        self.write()?.bind_on_launch = enabled;
        Ok(())
    }

    /// Controls whether kill signals leave processes running.
    ///
    /// # Errors
    ///
    /// Returns [`InMemoryHostError`] when the state lock is poisoned.
    pub fn set_kill_ignored(&self, ignored: bool) -> Result<(), InMemoryHostError> {
        self.write()?.kill_ignored = ignored;
        Ok(())
    }

    /// Controls whether launches fail to spawn.
    ///
    /// # Errors
    ///
    /// Returns [`InMemoryHostError`] when the state lock is poisoned.
    pub fn set_launch_failure(&self, failing: bool) -> Result<(), InMemoryHostError> {
        self.write()?.launch_failure = failing;
        Ok(())
    }

    /// Controls whether open commands fail.
    ///
    /// # Errors
    ///
    /// Returns [`InMemoryHostError`] when the state lock is poisoned.
    pub fn set_open_failure(&self, failing: bool) -> Result<(), InMemoryHostError> {
        self.write()?.open_failure = failing;
        Ok(())
    }

    /// Makes every probe of `port` fail.
    ///
    /// # Errors
    ///
    /// Returns [`InMemoryHostError`] when the state lock is poisoned.
    pub fn fail_probes_for(&self, port: ServicePort) -> Result<(), InMemoryHostError> {
        self.write()?.failing_probes.insert(port);
        Ok(())
    }

    /// Returns every launch request in order.
    ///
    /// # Errors
    ///
    /// Returns [`InMemoryHostError`] when the state lock is poisoned.
    pub fn launches(&self) -> Result<Vec<LaunchSpec>, InMemoryHostError> {
        Ok(self.read()?.launches.clone())
    }

    /// Returns every pid sent a kill signal, in order.
    ///
    /// # Errors
    ///
    /// Returns [`InMemoryHostError`] when the state lock is poisoned.
    pub fn terminated(&self) -> Result<Vec<ProcessId>, InMemoryHostError> {
        Ok(self.read()?.terminated.clone())
    }

    /// Returns every open request in order.
    ///
    /// # Errors
    ///
    /// Returns [`InMemoryHostError`] when the state lock is poisoned.
    pub fn opened(&self) -> Result<Vec<(OpenTarget, Utf8PathBuf)>, InMemoryHostError> {
        Ok(self.read()?.opened.clone())
    }
}

#[async_trait]
impl PortProber for InMemoryProcessHost {
    async fn owners(&self, port: ServicePort) -> PortProberResult<Vec<ProcessId>> {
        let state = self.read().map_err(PortProberError::inspection)?;
        if state.failing_probes.contains(&port) {
            return Err(PortProberError::inspection(std::io::Error::other(
                "socket table unavailable",
            )));
        }
        Ok(state.listeners.get(&port).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl ProcessLauncher for InMemoryProcessHost {
    async fn launch(&self, spec: &LaunchSpec) -> ProcessLauncherResult<Option<ProcessId>> {
        let mut state = self
            .write()
            .map_err(|err| ProcessLauncherError::spawn(spec.program(), err))?;
        if state.launch_failure {
            return Err(ProcessLauncherError::spawn(
                spec.program(),
                std::io::Error::from(std::io::ErrorKind::NotFound),
            ));
        }

        state.issued_pids += 1;
        let pid = ProcessId::from_raw(FIRST_PID + state.issued_pids);
        state.launches.push(spec.clone());

        let bound_port = spec
            .env()
            .get(PORT_ENV_VAR)
            .and_then(|value| value.parse::<u16>().ok())
            .and_then(|value| ServicePort::new(value).ok());
        if state.bind_on_launch
            && let Some(port) = bound_port
        {
            state.listeners.entry(port).or_default().push(pid);
        }
        Ok(Some(pid))
    }

    async fn terminate(&self, pids: &[ProcessId]) -> ProcessLauncherResult<()> {
        let mut state = self.write().map_err(|err| {
            let pid = pids.first().copied().unwrap_or(ProcessId::from_raw(0));
            ProcessLauncherError::terminate(pid, err)
        })?;
        state.terminated.extend_from_slice(pids);
        if !state.kill_ignored {
            for owners in state.listeners.values_mut() {
                owners.retain(|pid| !pids.contains(pid));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl WorkspaceOpener for InMemoryProcessHost {
    async fn open(&self, target: OpenTarget, directory: &Utf8Path) -> WorkspaceOpenerResult<()> {
        let mut state = self
            .write()
            .map_err(|err| WorkspaceOpenerError::new(target, directory, err))?;
        if state.open_failure {
            return Err(WorkspaceOpenerError::new(
                target,
                directory,
                std::io::Error::from(std::io::ErrorKind::NotFound),
            ));
        }
        state.opened.push((target, directory.to_owned()));
        Ok(())
    }
}
