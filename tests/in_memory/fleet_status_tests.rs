//! Fleet status tests through the [`Supervisor`] facade.

use crate::in_memory::helpers::{descriptor, host, port, runtime, supervisor};
use portwarden::local_service::{
    adapters::memory::InMemoryProcessHost,
    domain::{ProcessId, ServiceView, StatusFilter},
};
use portwarden::supervisor::Supervisor;
use rstest::{fixture, rstest};
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[fixture]
fn fleet(host: Arc<InMemoryProcessHost>) -> (Arc<InMemoryProcessHost>, Supervisor) {
    host.bind(port(3000), ProcessId::from_raw(30))
        .expect("host state should be writable");
    let supervisor = supervisor(
        &host,
        vec![
            descriptor("web", 3000, "frontend"),
            descriptor("api", 4000, "backend"),
            descriptor("admin", 3100, "frontend"),
        ],
    );
    (host, supervisor)
}

fn names(views: &[ServiceView]) -> Vec<String> {
    views
        .iter()
        .map(|view| view.descriptor().name().as_str().to_owned())
        .collect()
}

/// Tests that a kind filter keeps registry order and ignores status.
#[rstest]
fn kind_filter_keeps_registry_order(
    runtime: io::Result<Runtime>,
    fleet: (Arc<InMemoryProcessHost>, Supervisor),
) {
    let rt = runtime.expect("runtime creation");
    let (_, supervisor) = fleet;

    let views = rt
        .block_on(supervisor.status().get_all(&StatusFilter::parse(Some("frontend"))))
        .expect("status should load");

    assert_eq!(names(&views), vec!["web", "admin"]);
}

/// Tests that only bound services carry a URL.
#[rstest]
fn only_running_services_have_urls(
    runtime: io::Result<Runtime>,
    fleet: (Arc<InMemoryProcessHost>, Supervisor),
) {
    let rt = runtime.expect("runtime creation");
    let (_, supervisor) = fleet;

    let views = rt
        .block_on(supervisor.status().get_all(&StatusFilter::All))
        .expect("status should load");

    let urls: Vec<Option<&str>> = views.iter().map(ServiceView::url).collect();
    assert_eq!(urls, vec![Some("http://localhost:3000"), None, None]);
}

/// Tests that the summary reflects a port bound after the first snapshot.
#[rstest]
fn summary_tracks_host_changes(
    runtime: io::Result<Runtime>,
    fleet: (Arc<InMemoryProcessHost>, Supervisor),
) {
    let rt = runtime.expect("runtime creation");
    let (host, supervisor) = fleet;

    let before = rt
        .block_on(supervisor.status().summary())
        .expect("summary");
    host.bind(port(4000), ProcessId::from_raw(40))
        .expect("host state should be writable");
    let after = rt
        .block_on(supervisor.status().summary())
        .expect("summary");

    assert_eq!((before.running, before.stopped), (1, 2));
    assert_eq!((after.running, after.stopped), (2, 1));
    assert_eq!(names(&after.running_services), vec!["web", "api"]);
}
