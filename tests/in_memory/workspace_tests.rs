//! Workspace opener tests through the [`Supervisor`] facade.

use crate::in_memory::helpers::{descriptor, home, host, port, runtime, supervisor};
use portwarden::local_service::{
    adapters::memory::InMemoryProcessHost, domain::OpenTarget, services::ServiceControlError,
};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Tests that both targets open the expanded service directory.
#[rstest]
fn editor_and_file_browser_open_same_directory(
    runtime: io::Result<Runtime>,
    host: Arc<InMemoryProcessHost>,
) {
    let rt = runtime.expect("runtime creation");
    let supervisor = supervisor(&host, vec![descriptor("web", 3000, "frontend")]);

    rt.block_on(supervisor.workspace().open(port(3000), OpenTarget::Editor))
        .expect("editor should open");
    rt.block_on(supervisor.workspace().open(port(3000), OpenTarget::FileBrowser))
        .expect("file browser should open");

    assert_eq!(
        host.opened().expect("open log"),
        vec![
            (OpenTarget::Editor, home()),
            (OpenTarget::FileBrowser, home()),
        ]
    );
}

/// Tests that an opener failure surfaces as an open error.
#[rstest]
fn opener_failure_is_reported(runtime: io::Result<Runtime>, host: Arc<InMemoryProcessHost>) {
    let rt = runtime.expect("runtime creation");
    host.set_open_failure(true)
        .expect("host state should be writable");
    let supervisor = supervisor(&host, vec![descriptor("web", 3000, "frontend")]);

    let result = rt.block_on(supervisor.workspace().open(port(3000), OpenTarget::Editor));

    assert!(
        matches!(result, Err(ServiceControlError::OpenFailed(_))),
        "opener failure should surface, got {result:?}"
    );
}
