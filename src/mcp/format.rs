//! Plain-text rendering of tool results.

use crate::local_service::domain::{
    FleetSummary, RuntimeStatus, ServicePort, ServiceView, StatusFilter,
};

fn status_label(status: &RuntimeStatus) -> String {
    status.pid().map_or_else(
        || "stopped".to_owned(),
        |pid| format!("running (pid {pid})"),
    )
}

fn service_line(view: &ServiceView) -> String {
    let descriptor = view.descriptor();
    let mut line = format!(
        "- {} on port {}: {}",
        descriptor.name(),
        descriptor.port(),
        status_label(view.status())
    );
    if !descriptor.kind().is_empty() {
        line.push_str(&format!(" [{}]", descriptor.kind()));
    }
    if let Some(url) = view.url() {
        line.push_str(&format!(" {url}"));
    }
    line
}

/// Lists services, one per line, in registry order.
#[must_use]
pub fn service_list(views: &[ServiceView], filter: &StatusFilter) -> String {
    if views.is_empty() {
        return format!("No services match filter '{filter}'.");
    }
    let mut text = format!("{} service(s) (filter: {filter}):", views.len());
    for view in views {
        text.push('\n');
        text.push_str(&service_line(view));
    }
    text
}

/// Describes the owner of an arbitrary port.
#[must_use]
pub fn port_status(port: ServicePort, status: &RuntimeStatus) -> String {
    status.pid().map_or_else(
        || format!("Port {port} is free."),
        |pid| format!("Port {port} is in use by process {pid} ({}).", port.local_url()),
    )
}

/// Describes one configured service in detail.
#[must_use]
pub fn service_info(view: &ServiceView) -> String {
    let descriptor = view.descriptor();
    let mut text = format!(
        "{}\nport: {}\npath: {}\nstart command: {}\nstatus: {}",
        descriptor.name(),
        descriptor.port(),
        descriptor.path(),
        descriptor.start_command(),
        status_label(view.status())
    );
    if !descriptor.kind().is_empty() {
        text.push_str(&format!("\ntype: {}", descriptor.kind()));
    }
    if let Some(github) = descriptor.github() {
        text.push_str(&format!("\ngithub: {github}"));
    }
    if let Some(url) = view.url() {
        text.push_str(&format!("\nurl: {url}"));
    }
    text
}

/// Summarizes the fleet with the running services listed.
#[must_use]
pub fn summary(summary: &FleetSummary) -> String {
    let mut text = format!(
        "{} of {} service(s) running, {} stopped.",
        summary.running, summary.total, summary.stopped
    );
    for view in &summary.running_services {
        text.push('\n');
        text.push_str(&service_line(view));
    }
    text
}
