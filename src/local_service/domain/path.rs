//! Configured service directory.

use super::LocalServiceDomainError;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Working directory of a service as written in configuration.
///
/// A leading `~` stands for the home directory and is expanded by
/// [`ServicePath::expand`] before the path is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServicePath(String);

impl ServicePath {
    /// Creates a service path.
    ///
    /// # Errors
    ///
    /// Returns [`LocalServiceDomainError::EmptyServicePath`] when the value
    /// is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, LocalServiceDomainError> {
        let path = value.into();
        if path.trim().is_empty() {
            return Err(LocalServiceDomainError::EmptyServicePath);
        }
        Ok(Self(path))
    }

    /// Returns the path as configured.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Expands a leading `~` against `home`.
    ///
    /// `~user` forms are not supported and are returned unchanged, as is
    /// every path when no home directory is known.
    #[must_use]
    pub fn expand(&self, home: Option<&Utf8Path>) -> Utf8PathBuf {
        let Some(home_dir) = home else {
            return Utf8PathBuf::from(&self.0);
        };

        if self.0 == "~" {
            return home_dir.to_path_buf();
        }

        match self.0.strip_prefix("~/") {
            Some(rest) => home_dir.join(rest),
            None => Utf8PathBuf::from(&self.0),
        }
    }
}

impl TryFrom<String> for ServicePath {
    type Error = LocalServiceDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ServicePath> for String {
    fn from(path: ServicePath) -> Self {
        path.0
    }
}

impl fmt::Display for ServicePath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}
