//! Port prober backed by `lsof`.

use crate::local_service::{
    domain::{ProcessId, ServicePort},
    ports::{PortProber, PortProberError, PortProberResult},
};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Default upper bound for a single probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Lists TCP listeners with `lsof -nP -t -iTCP:<port> -sTCP:LISTEN`.
#[derive(Debug, Clone)]
pub struct LsofPortProber {
    program: String,
    timeout: Duration,
}

impl Default for LsofPortProber {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

impl LsofPortProber {
    /// Creates a prober that gives up after `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            program: "lsof".to_owned(),
            timeout,
        }
    }

    /// Replaces the `lsof` executable.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

/// Parses terse `lsof -t` output into pids.
///
/// Order is kept, repeats are dropped, and lines that are not pids are
/// skipped.
#[must_use]
pub fn parse_lsof_pids(stdout: &str) -> Vec<ProcessId> {
    let mut pids: Vec<ProcessId> = Vec::new();
    for pid in stdout
        .lines()
        .filter_map(|line| line.trim().parse::<u32>().ok())
        .map(ProcessId::from_raw)
    {
        if !pids.contains(&pid) {
            pids.push(pid);
        }
    }
    pids
}

#[async_trait]
impl PortProber for LsofPortProber {
    async fn owners(&self, port: ServicePort) -> PortProberResult<Vec<ProcessId>> {
        let mut command = Command::new(&self.program);
        command
            .arg("-nP")
            .arg("-t")
            .arg(format!("-iTCP:{port}"))
            .arg("-sTCP:LISTEN")
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| PortProberError::TimedOut {
                port,
                timeout: self.timeout,
            })?
            .map_err(PortProberError::inspection)?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if output.status.success() {
            return Ok(parse_lsof_pids(&stdout));
        }
        // lsof exits 1 when nothing matches.
        if output.status.code() == Some(1) && stdout.trim().is_empty() {
            return Ok(Vec::new());
        }
        Err(PortProberError::inspection(std::io::Error::other(format!(
            "{} exited with {}: {}",
            self.program,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        ))))
    }
}
