//! Process launch and workspace-open value objects.

use super::CommandLine;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;
use std::fmt;

/// Environment variable carrying the target port to launched services.
pub const PORT_ENV_VAR: &str = "PORT";

/// Everything a launcher needs to spawn a detached service process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    program: String,
    args: Vec<String>,
    env: BTreeMap<String, String>,
    working_directory: Utf8PathBuf,
}

impl LaunchSpec {
    /// Creates a launch specification from a parsed command line.
    #[must_use]
    pub fn new(command: CommandLine, working_directory: impl Into<Utf8PathBuf>) -> Self {
        Self {
            program: command.program,
            args: command.args,
            env: BTreeMap::new(),
            working_directory: working_directory.into(),
        }
    }

    /// Adds one environment variable on top of the inherited environment.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Returns the executable.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns command-line arguments.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns extra environment variables.
    #[must_use]
    pub const fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// Returns the working directory.
    #[must_use]
    pub fn working_directory(&self) -> &Utf8Path {
        &self.working_directory
    }
}

/// External application used to open a service directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenTarget {
    /// Code editor.
    Editor,
    /// Platform file browser.
    FileBrowser,
}

impl OpenTarget {
    /// Returns a short label for logs and messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Editor => "editor",
            Self::FileBrowser => "file browser",
        }
    }
}

impl fmt::Display for OpenTarget {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
