//! Catalog tests through the [`Supervisor`] facade.

use crate::in_memory::helpers::{descriptor, host, port, runtime, supervisor};
use portwarden::local_service::{
    adapters::memory::InMemoryProcessHost, domain::StatusFilter, services::ServiceControlError,
};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Tests that an added service is immediately visible to status queries.
#[rstest]
fn added_service_appears_in_status(runtime: io::Result<Runtime>, host: Arc<InMemoryProcessHost>) {
    let rt = runtime.expect("runtime creation");
    let supervisor = supervisor(&host, vec![descriptor("web", 3000, "frontend")]);

    rt.block_on(supervisor.catalog().add(descriptor("api", 4000, "backend")))
        .expect("add should succeed");
    let views = rt
        .block_on(supervisor.status().get_all(&StatusFilter::All))
        .expect("status should load");

    let ports: Vec<u16> = views
        .iter()
        .map(|view| view.descriptor().port().get())
        .collect();
    assert_eq!(ports, vec![3000, 4000]);
}

/// Tests that a removed service can no longer be started.
#[rstest]
fn removed_service_cannot_start(runtime: io::Result<Runtime>, host: Arc<InMemoryProcessHost>) {
    let rt = runtime.expect("runtime creation");
    let supervisor = supervisor(&host, vec![descriptor("web", 3000, "frontend")]);

    rt.block_on(supervisor.catalog().remove(port(3000)))
        .expect("remove should succeed");
    let result = rt.block_on(supervisor.lifecycle().start(port(3000)));

    assert!(
        matches!(result, Err(ServiceControlError::ServiceNotFound(p)) if p == port(3000)),
        "removed service should be unknown, got {result:?}"
    );
    assert!(host.launches().expect("launch log").is_empty());
}

/// Tests that adding a duplicate port leaves the catalog unchanged.
#[rstest]
fn duplicate_add_leaves_catalog_unchanged(
    runtime: io::Result<Runtime>,
    host: Arc<InMemoryProcessHost>,
) {
    let rt = runtime.expect("runtime creation");
    let supervisor = supervisor(&host, vec![descriptor("web", 3000, "frontend")]);

    let result = rt.block_on(supervisor.catalog().add(descriptor("other", 3000, "")));
    let listed = rt
        .block_on(supervisor.catalog().list())
        .expect("list should succeed");

    assert!(matches!(result, Err(ServiceControlError::DuplicatePort(_))));
    assert_eq!(listed, vec![descriptor("web", 3000, "frontend")]);
}
