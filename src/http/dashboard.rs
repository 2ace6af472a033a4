//! Server-rendered dashboard page.

use super::error::{ApiError, ApiResult};
use crate::local_service::domain::{FleetSummary, ServiceView, StatusFilter};
use crate::supervisor::Supervisor;
use axum::{extract::State, response::Html};
use minijinja::{Environment, context};
use std::sync::Arc;

const TEMPLATE_NAME: &str = "dashboard.html";
const TEMPLATE_SOURCE: &str = include_str!("dashboard.html");

/// Renders the dashboard for a fleet snapshot.
///
/// # Errors
///
/// Returns [`ApiError::Template`] when rendering fails.
pub(super) fn render(views: &[ServiceView]) -> ApiResult<String> {
    let summary = FleetSummary::from_views(views.to_vec());
    let mut environment = Environment::new();
    environment
        .add_template(TEMPLATE_NAME, TEMPLATE_SOURCE)
        .map_err(|err| ApiError::Template(err.to_string()))?;
    environment
        .get_template(TEMPLATE_NAME)
        .and_then(|template| template.render(context! { services => views, summary => summary }))
        .map_err(|err| ApiError::Template(err.to_string()))
}

pub(super) async fn page(State(supervisor): State<Arc<Supervisor>>) -> ApiResult<Html<String>> {
    let views = supervisor.status().get_all(&StatusFilter::All).await?;
    render(&views).map(Html)
}
