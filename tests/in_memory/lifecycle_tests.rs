//! Start and stop round trips through the [`Supervisor`] facade.

use crate::in_memory::helpers::{descriptor, home, host, port, runtime, supervisor};
use portwarden::local_service::{
    adapters::memory::InMemoryProcessHost, domain::ProcessId, services::ServiceControlError,
};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Tests that a started service shows as running and stops cleanly.
#[rstest]
fn start_then_stop_round_trip(runtime: io::Result<Runtime>, host: Arc<InMemoryProcessHost>) {
    let rt = runtime.expect("runtime creation");
    host.set_bind_on_launch(true)
        .expect("host state should be writable");
    let supervisor = supervisor(&host, vec![descriptor("web", 3000, "frontend")]);

    let started = rt
        .block_on(supervisor.lifecycle().start(port(3000)))
        .expect("start should succeed");
    let running = rt.block_on(supervisor.status().status_of(port(3000)));
    let stopped = rt
        .block_on(supervisor.lifecycle().stop(port(3000)))
        .expect("stop should succeed");
    let after = rt.block_on(supervisor.status().status_of(port(3000)));

    assert!(!started.initializing());
    assert!(running.running());
    assert_eq!(started.spawned_pid(), running.pid());
    assert_eq!(stopped.terminated(), running.pid().as_slice());
    assert!(stopped.released());
    assert!(!after.running());
    let launches = host.launches().expect("launch log");
    assert_eq!(
        launches
            .first()
            .map(|spec| spec.working_directory().to_owned()),
        Some(home())
    );
}

/// Tests that a second start is rejected while the first still listens.
#[rstest]
fn second_start_is_rejected(runtime: io::Result<Runtime>, host: Arc<InMemoryProcessHost>) {
    let rt = runtime.expect("runtime creation");
    host.set_bind_on_launch(true)
        .expect("host state should be writable");
    let supervisor = supervisor(&host, vec![descriptor("web", 3000, "frontend")]);

    rt.block_on(supervisor.lifecycle().start(port(3000)))
        .expect("first start should succeed");
    let result = rt.block_on(supervisor.lifecycle().start(port(3000)));

    assert!(
        matches!(result, Err(ServiceControlError::AlreadyRunning { .. })),
        "second start should be rejected, got {result:?}"
    );
    assert_eq!(host.launches().expect("launch log").len(), 1);
}

/// Tests that stopping reaches processes the supervisor did not start.
#[rstest]
fn stop_kills_foreign_listener(runtime: io::Result<Runtime>, host: Arc<InMemoryProcessHost>) {
    let rt = runtime.expect("runtime creation");
    host.bind(port(8080), ProcessId::from_raw(77))
        .expect("host state should be writable");
    let supervisor = supervisor(&host, vec![]);

    let outcome = rt
        .block_on(supervisor.lifecycle().stop(port(8080)))
        .expect("stop should succeed");

    assert_eq!(outcome.name(), None);
    assert_eq!(outcome.terminated(), &[ProcessId::from_raw(77)]);
}
