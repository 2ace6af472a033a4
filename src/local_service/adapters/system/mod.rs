//! Adapters backed by the host operating system.

mod launcher;
mod opener;
mod prober;

pub use launcher::SystemProcessLauncher;
pub use opener::{EDITOR_COMMAND, FILE_BROWSER_COMMAND, ShellWorkspaceOpener};
pub use prober::{DEFAULT_PROBE_TIMEOUT, LsofPortProber, parse_lsof_pids};
