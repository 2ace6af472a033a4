//! Start command value object.

use super::LocalServiceDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shell-style command line used to launch a service.
///
/// The raw text is kept as configured. Parsing splits on whitespace only:
/// quoting and escaping are not interpreted, so an argument cannot contain a
/// space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StartCommand(String);

/// Executable and arguments parsed from a [`StartCommand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Executable name or path.
    pub program: String,
    /// Arguments passed to the executable.
    pub args: Vec<String>,
}

impl StartCommand {
    /// Creates a validated start command.
    ///
    /// # Errors
    ///
    /// Returns [`LocalServiceDomainError::EmptyStartCommand`] when the value
    /// is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, LocalServiceDomainError> {
        let command = value.into();
        if command.trim().is_empty() {
            return Err(LocalServiceDomainError::EmptyStartCommand);
        }
        Ok(Self(command))
    }

    /// Returns the raw command text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the command on whitespace into an executable and arguments.
    ///
    /// # Errors
    ///
    /// Returns [`LocalServiceDomainError::EmptyStartCommand`] when the text
    /// holds no tokens.
    pub fn parse(&self) -> Result<CommandLine, LocalServiceDomainError> {
        let mut tokens = self.0.split_whitespace().map(str::to_owned);
        let program = tokens
            .next()
            .ok_or(LocalServiceDomainError::EmptyStartCommand)?;
        Ok(CommandLine {
            program,
            args: tokens.collect(),
        })
    }
}

impl TryFrom<String> for StartCommand {
    type Error = LocalServiceDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StartCommand> for String {
    fn from(command: StartCommand) -> Self {
        command.0
    }
}

impl fmt::Display for StartCommand {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}
