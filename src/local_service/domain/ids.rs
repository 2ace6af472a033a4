//! Identifier and validated-name types for local services.

use super::LocalServiceDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// TCP port that identifies a configured service.
///
/// The port is the registry key for every lifecycle and status operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ServicePort(u16);

impl ServicePort {
    /// Creates a validated service port.
    ///
    /// # Errors
    ///
    /// Returns [`LocalServiceDomainError::InvalidPort`] for port zero.
    pub const fn new(value: u16) -> Result<Self, LocalServiceDomainError> {
        if value == 0 {
            return Err(LocalServiceDomainError::InvalidPort(value));
        }
        Ok(Self(value))
    }

    /// Returns the raw port number.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Returns the local URL a running service on this port answers on.
    #[must_use]
    pub fn local_url(self) -> String {
        format!("http://localhost:{}", self.0)
    }
}

impl TryFrom<u16> for ServicePort {
    type Error = LocalServiceDomainError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ServicePort> for u16 {
    fn from(port: ServicePort) -> Self {
        port.0
    }
}

impl fmt::Display for ServicePort {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Display label of a configured service.
///
/// The label must contain a non-whitespace character. It is stored exactly
/// as written so that configuration round-trips unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceName(String);

impl ServiceName {
    /// Creates a validated service name.
    ///
    /// # Errors
    ///
    /// Returns [`LocalServiceDomainError::EmptyServiceName`] when the value
    /// is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, LocalServiceDomainError> {
        let name = value.into();
        if name.trim().is_empty() {
            return Err(LocalServiceDomainError::EmptyServiceName);
        }
        Ok(Self(name))
    }

    /// Returns the service name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ServiceName {
    type Error = LocalServiceDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ServiceName> for String {
    fn from(name: ServiceName) -> Self {
        name.0
    }
}

impl AsRef<str> for ServiceName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Operating-system process identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(u32);

impl ProcessId {
    /// Wraps a raw process identifier.
    #[must_use]
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw process identifier.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}
