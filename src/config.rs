//! Command-line and environment configuration.

use crate::local_service::{domain::ServicePath, services::LifecycleSettings};
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

/// Configuration file location relative to the home directory.
pub const DEFAULT_CONFIG_RELATIVE_PATH: &str = ".portwarden/services.json";

/// Errors raised while resolving configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No `--config` was given and no home directory could be found.
    #[error("cannot locate the configuration file: pass --config or set HOME")]
    NoConfigPath,
}

/// Local development service supervisor.
#[derive(Debug, Parser)]
#[command(name = "portwarden", version, about, long_about = None)]
pub struct Cli {
    /// Path to the services JSON file
    #[arg(long, global = true, env = "PORTWARDEN_CONFIG")]
    pub config: Option<String>,

    /// Milliseconds to wait after launching before re-probing the port
    #[arg(long, global = true, default_value_t = 1500)]
    pub settle_delay_ms: u64,

    /// Milliseconds to wait after killing before the confirming probe
    #[arg(long, global = true, default_value_t = 500)]
    pub stop_grace_ms: u64,

    /// Upper bound in milliseconds for a single port probe
    #[arg(long, global = true, default_value_t = 5000)]
    pub probe_timeout_ms: u64,

    /// Front end to run
    #[command(subcommand)]
    pub command: Command,
}

/// Front ends.
#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Serve the HTTP API and dashboard
    Serve(ServeArgs),
    /// Serve MCP tools over stdio
    Mcp,
}

/// HTTP listener options.
#[derive(Debug, Args, PartialEq, Eq)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "PORTWARDEN_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to bind
    #[arg(long, env = "PORTWARDEN_PORT", default_value_t = 4444)]
    pub port: u16,
}

impl ServeArgs {
    /// Returns the socket address to bind.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupervisorConfig {
    /// Services JSON file.
    pub config_path: Utf8PathBuf,
    /// Home directory for `~` expansion, when known.
    pub home_dir: Option<Utf8PathBuf>,
    /// Wait after launch before re-probing.
    pub settle_delay: Duration,
    /// Wait after kill before the confirming probe.
    pub stop_grace: Duration,
    /// Upper bound for a single probe.
    pub probe_timeout: Duration,
}

impl SupervisorConfig {
    /// Returns the lifecycle controller settings.
    #[must_use]
    pub fn lifecycle_settings(&self) -> LifecycleSettings {
        LifecycleSettings {
            home_dir: self.home_dir.clone(),
            settle_delay: self.settle_delay,
            stop_grace: self.stop_grace,
        }
    }
}

impl Cli {
    /// Resolves paths and durations against `home_dir`.
    ///
    /// A `~` at the start of `--config` is expanded like service paths.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigPath`] when neither `--config` nor a
    /// home directory is available.
    pub fn resolve(&self, home_dir: Option<Utf8PathBuf>) -> Result<SupervisorConfig, ConfigError> {
        let config_path = match (self.config.as_deref(), home_dir.as_deref()) {
            (Some(raw), home) => ServicePath::new(raw)
                .map(|path| path.expand(home))
                .map_err(|_| ConfigError::NoConfigPath)?,
            (None, Some(home)) => home.join(DEFAULT_CONFIG_RELATIVE_PATH),
            (None, None) => return Err(ConfigError::NoConfigPath),
        };
        Ok(SupervisorConfig {
            config_path,
            home_dir,
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            stop_grace: Duration::from_millis(self.stop_grace_ms),
            probe_timeout: Duration::from_millis(self.probe_timeout_ms),
        })
    }
}

/// Finds the current user's home directory.
///
/// `HOME` wins when set and non-empty; otherwise the password database is
/// consulted on unix.
#[must_use]
pub fn home_dir() -> Option<Utf8PathBuf> {
    std::env::var("HOME")
        .ok()
        .filter(|home| !home.trim().is_empty())
        .map(Utf8PathBuf::from)
        .or_else(passwd_home_dir)
}

#[cfg(unix)]
fn passwd_home_dir() -> Option<Utf8PathBuf> {
    use nix::unistd::{Uid, User};

    let user = User::from_uid(Uid::current()).ok().flatten()?;
    Utf8PathBuf::from_path_buf(user.dir).ok()
}

#[cfg(not(unix))]
fn passwd_home_dir() -> Option<Utf8PathBuf> {
    None
}
