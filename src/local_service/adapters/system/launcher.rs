//! Detached process launcher using tokio and POSIX signals.

use crate::local_service::{
    domain::{LaunchSpec, ProcessId},
    ports::{ProcessLauncher, ProcessLauncherError, ProcessLauncherResult},
};
use async_trait::async_trait;
use nix::errno::Errno;
use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;
use std::process::Stdio;
use tokio::process::Command;

/// Spawns services in their own process group and kills them with `SIGKILL`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessLauncher;

impl SystemProcessLauncher {
    /// Creates a launcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessLauncher for SystemProcessLauncher {
    async fn launch(&self, spec: &LaunchSpec) -> ProcessLauncherResult<Option<ProcessId>> {
        let mut command = Command::new(spec.program());
        command
            .args(spec.args())
            .envs(spec.env())
            .current_dir(spec.working_directory())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .process_group(0);

        let child = command
            .spawn()
            .map_err(|err| ProcessLauncherError::spawn(spec.program(), err))?;
        // The child is left running; tokio reaps it once it exits.
        Ok(child.id().map(ProcessId::from_raw))
    }

    async fn terminate(&self, pids: &[ProcessId]) -> ProcessLauncherResult<()> {
        for &pid in pids {
            let raw =
                i32::try_from(pid.get()).map_err(|err| ProcessLauncherError::terminate(pid, err))?;
            match kill(Pid::from_raw(raw), Signal::SIGKILL) {
                Ok(()) | Err(Errno::ESRCH) => {}
                Err(err) => return Err(ProcessLauncherError::terminate(pid, err)),
            }
        }
        Ok(())
    }
}
