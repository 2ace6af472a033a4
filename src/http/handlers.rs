//! JSON endpoint handlers.

use super::error::{ApiError, ApiResult};
use crate::local_service::domain::{
    OpenTarget, RuntimeStatus, ServiceDescriptor, ServicePort, ServiceView, StatusFilter,
};
use crate::supervisor::Supervisor;
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

/// Query string for the service list.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// `all`, `running`, `stopped`, or a type tag.
    pub filter: Option<String>,
}

/// Status of an arbitrary port.
#[derive(Debug, Serialize)]
pub struct PortStatusBody {
    /// Probed port.
    pub port: ServicePort,
    /// Probe result.
    #[serde(flatten)]
    pub status: RuntimeStatus,
}

fn parse_port(raw: &str) -> ApiResult<ServicePort> {
    raw.trim()
        .parse::<u16>()
        .ok()
        .and_then(|value| ServicePort::new(value).ok())
        .ok_or_else(|| ApiError::BadRequest(format!("invalid port '{raw}'")))
}

pub(super) async fn list_services(
    State(supervisor): State<Arc<Supervisor>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<ServiceView>>> {
    let filter = StatusFilter::parse(query.filter.as_deref());
    Ok(Json(supervisor.status().get_all(&filter).await?))
}

pub(super) async fn service_info(
    State(supervisor): State<Arc<Supervisor>>,
    Path(raw_port): Path<String>,
) -> ApiResult<Json<ServiceView>> {
    let port = parse_port(&raw_port)?;
    Ok(Json(supervisor.status().service_info(port).await?))
}

pub(super) async fn port_status(
    State(supervisor): State<Arc<Supervisor>>,
    Path(raw_port): Path<String>,
) -> ApiResult<Json<PortStatusBody>> {
    let port = parse_port(&raw_port)?;
    let status = supervisor.status().status_of(port).await;
    Ok(Json(PortStatusBody { port, status }))
}

pub(super) async fn start_service(
    State(supervisor): State<Arc<Supervisor>>,
    Path(raw_port): Path<String>,
) -> ApiResult<Json<Value>> {
    let port = parse_port(&raw_port)?;
    let outcome = supervisor.lifecycle().start(port).await?;
    Ok(Json(json!({
        "success": true,
        "message": outcome.message(),
        "initializing": outcome.initializing(),
        "name": outcome.name(),
        "port": outcome.port(),
        "spawnedPid": outcome.spawned_pid(),
        "running": outcome.status().running(),
        "pid": outcome.status().pid(),
    })))
}

pub(super) async fn stop_service(
    State(supervisor): State<Arc<Supervisor>>,
    Path(raw_port): Path<String>,
) -> ApiResult<Json<Value>> {
    let port = parse_port(&raw_port)?;
    let outcome = supervisor.lifecycle().stop(port).await?;
    Ok(Json(json!({
        "success": true,
        "message": outcome.message(),
        "port": outcome.port(),
        "name": outcome.name(),
        "terminated": outcome.terminated(),
        "released": outcome.released(),
    })))
}

pub(super) async fn add_service(
    State(supervisor): State<Arc<Supervisor>>,
    body: Result<Json<ServiceDescriptor>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(descriptor) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let added = supervisor.catalog().add(descriptor).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("Added {} on port {}", added.name(), added.port()),
        "service": added,
    })))
}

pub(super) async fn remove_service(
    State(supervisor): State<Arc<Supervisor>>,
    Path(raw_port): Path<String>,
) -> ApiResult<Json<Value>> {
    let port = parse_port(&raw_port)?;
    let removed = supervisor.catalog().remove(port).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("Removed service on port {port}"),
        "removed": removed,
    })))
}

async fn open_workspace(
    supervisor: &Supervisor,
    raw_port: &str,
    target: OpenTarget,
) -> ApiResult<Json<Value>> {
    let port = parse_port(raw_port)?;
    let directory = supervisor.workspace().open(port, target).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("Opened {directory} in {target}"),
        "path": directory,
    })))
}

pub(super) async fn open_in_editor(
    State(supervisor): State<Arc<Supervisor>>,
    Path(raw_port): Path<String>,
) -> ApiResult<Json<Value>> {
    open_workspace(&supervisor, &raw_port, OpenTarget::Editor).await
}

pub(super) async fn open_in_file_browser(
    State(supervisor): State<Arc<Supervisor>>,
    Path(raw_port): Path<String>,
) -> ApiResult<Json<Value>> {
    open_workspace(&supervisor, &raw_port, OpenTarget::FileBrowser).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("4000", Some(4000))]
    #[case(" 80 ", Some(80))]
    #[case("0", None)]
    #[case("70000", None)]
    #[case("api", None)]
    fn port_segments(#[case] raw: &str, #[case] expected: Option<u16>) {
        assert_eq!(parse_port(raw).ok().map(ServicePort::get), expected);
    }
}
