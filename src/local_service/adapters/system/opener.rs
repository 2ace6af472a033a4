//! Workspace opener that shells out to desktop applications.

use crate::local_service::{
    domain::OpenTarget,
    ports::{WorkspaceOpener, WorkspaceOpenerError, WorkspaceOpenerResult},
};
use async_trait::async_trait;
use camino::Utf8Path;
use std::process::Stdio;
use tokio::process::Command;

/// Platform command that reveals a directory in the file browser.
#[cfg(target_os = "macos")]
pub const FILE_BROWSER_COMMAND: &str = "open";
/// Platform command that reveals a directory in the file browser.
#[cfg(not(target_os = "macos"))]
pub const FILE_BROWSER_COMMAND: &str = "xdg-open";

/// Editor command.
pub const EDITOR_COMMAND: &str = "code";

/// Opens directories with `code` or the platform file browser.
#[derive(Debug, Clone)]
pub struct ShellWorkspaceOpener {
    editor: String,
    file_browser: String,
}

impl Default for ShellWorkspaceOpener {
    fn default() -> Self {
        Self {
            editor: EDITOR_COMMAND.to_owned(),
            file_browser: FILE_BROWSER_COMMAND.to_owned(),
        }
    }
}

impl ShellWorkspaceOpener {
    /// Creates an opener using the platform defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the editor command.
    #[must_use]
    pub fn with_editor(mut self, editor: impl Into<String>) -> Self {
        self.editor = editor.into();
        self
    }

    /// Replaces the file browser command.
    #[must_use]
    pub fn with_file_browser(mut self, file_browser: impl Into<String>) -> Self {
        self.file_browser = file_browser.into();
        self
    }

    /// Returns the program used for `target`.
    #[must_use]
    pub fn program_for(&self, target: OpenTarget) -> &str {
        match target {
            OpenTarget::Editor => &self.editor,
            OpenTarget::FileBrowser => &self.file_browser,
        }
    }
}

#[async_trait]
impl WorkspaceOpener for ShellWorkspaceOpener {
    async fn open(&self, target: OpenTarget, directory: &Utf8Path) -> WorkspaceOpenerResult<()> {
        Command::new(self.program_for(target))
            .arg(directory)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| WorkspaceOpenerError::new(target, directory, err))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(OpenTarget::Editor, EDITOR_COMMAND)]
    #[case(OpenTarget::FileBrowser, FILE_BROWSER_COMMAND)]
    fn defaults_follow_platform(#[case] target: OpenTarget, #[case] expected: &str) {
        assert_eq!(ShellWorkspaceOpener::new().program_for(target), expected);
    }

    #[rstest]
    #[case(OpenTarget::Editor)]
    #[case(OpenTarget::FileBrowser)]
    #[tokio::test(flavor = "multi_thread")]
    async fn missing_program_is_reported(#[case] target: OpenTarget) {
        let opener = ShellWorkspaceOpener::new()
            .with_editor("portwarden-no-such-editor")
            .with_file_browser("portwarden-no-such-file-browser");

        let result = opener.open(target, Utf8Path::new("/tmp")).await;

        let err = result.expect_err("spawn should fail");
        assert_eq!(err.target, target);
        assert_eq!(err.directory, "/tmp");
    }
}
