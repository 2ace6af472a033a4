//! Service descriptor aggregate.

use super::{ServiceName, ServicePath, ServicePort, StartCommand};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Static, persisted definition of a local service.
///
/// Field names follow the configuration document: `startCmd` for the
/// command line and `type` for the category tag. Unknown keys are carried
/// through untouched so hand-written entries survive a rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    name: ServiceName,
    port: ServicePort,
    path: ServicePath,
    #[serde(rename = "startCmd")]
    start_command: StartCommand,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    github: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ServiceDescriptor {
    /// Creates a descriptor without a category tag or repository link.
    #[must_use]
    pub fn new(
        name: ServiceName,
        port: ServicePort,
        path: ServicePath,
        start_command: StartCommand,
    ) -> Self {
        Self {
            name,
            port,
            path,
            start_command,
            kind: String::new(),
            github: None,
            extra: Map::new(),
        }
    }

    /// Sets the category tag used for filtering.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Sets the informational repository link.
    #[must_use]
    pub fn with_github(mut self, github: impl Into<String>) -> Self {
        self.github = Some(github.into());
        self
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &ServiceName {
        &self.name
    }

    /// Returns the port that identifies the service.
    #[must_use]
    pub const fn port(&self) -> ServicePort {
        self.port
    }

    /// Returns the configured working directory.
    #[must_use]
    pub const fn path(&self) -> &ServicePath {
        &self.path
    }

    /// Returns the start command.
    #[must_use]
    pub const fn start_command(&self) -> &StartCommand {
        &self.start_command
    }

    /// Returns the category tag, empty when none is configured.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the repository link, if any.
    #[must_use]
    pub fn github(&self) -> Option<&str> {
        self.github.as_deref()
    }
}
