//! MCP tool server over the supervisor.

use super::format;
use crate::local_service::domain::{ServicePort, StatusFilter};
use crate::supervisor::Supervisor;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    transport::stdio,
};
use std::sync::Arc;
use tracing::info;

/// Boxed error returned by the stdio entry point.
pub type McpServeError = Box<dyn std::error::Error + Send + Sync>;

// ── Argument structs ──────────────────────────────────────────────────

/// Arguments for `list_services`.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct ListServicesArgs {
    /// `all` (default), `running`, `stopped`, or a service type such as `frontend`
    pub filter: Option<String>,
}

/// Arguments for tools addressing one port.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct PortArgs {
    /// TCP port number (1-65535)
    pub port: u16,
}

fn text(message: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(message.into())])
}

fn failure(message: impl ToString) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message.to_string())])
}

fn service_port(raw: u16) -> Result<ServicePort, CallToolResult> {
    ServicePort::new(raw).map_err(failure)
}

// ── Tool implementations ──────────────────────────────────────────────

/// MCP server exposing local service status and control.
///
/// Failures are reported inside a successful call as error results so
/// the assistant sees the message.
#[derive(Clone)]
pub struct PortwardenTools {
    supervisor: Arc<Supervisor>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl PortwardenTools {
    /// Creates the tool server.
    #[must_use]
    pub fn new(supervisor: Arc<Supervisor>) -> Self {
        Self {
            supervisor,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "List configured local services with their running status")]
    async fn list_services(
        &self,
        Parameters(args): Parameters<ListServicesArgs>,
    ) -> Result<CallToolResult, McpError> {
        let filter = StatusFilter::parse(args.filter.as_deref());
        Ok(match self.supervisor.status().get_all(&filter).await {
            Ok(views) => text(format::service_list(&views, &filter)),
            Err(err) => failure(err),
        })
    }

    #[tool(description = "Check whether any process is listening on a TCP port")]
    async fn check_port(
        &self,
        Parameters(args): Parameters<PortArgs>,
    ) -> Result<CallToolResult, McpError> {
        let port = match service_port(args.port) {
            Ok(port) => port,
            Err(result) => return Ok(result),
        };
        let status = self.supervisor.status().status_of(port).await;
        Ok(text(format::port_status(port, &status)))
    }

    #[tool(description = "Start the configured service on a port")]
    async fn start_service(
        &self,
        Parameters(args): Parameters<PortArgs>,
    ) -> Result<CallToolResult, McpError> {
        let port = match service_port(args.port) {
            Ok(port) => port,
            Err(result) => return Ok(result),
        };
        info!(%port, "start requested over MCP");
        Ok(match self.supervisor.lifecycle().start(port).await {
            Ok(outcome) => text(outcome.message()),
            Err(err) => failure(err),
        })
    }

    #[tool(description = "Kill every process listening on a port")]
    async fn stop_service(
        &self,
        Parameters(args): Parameters<PortArgs>,
    ) -> Result<CallToolResult, McpError> {
        let port = match service_port(args.port) {
            Ok(port) => port,
            Err(result) => return Ok(result),
        };
        info!(%port, "stop requested over MCP");
        Ok(match self.supervisor.lifecycle().stop(port).await {
            Ok(outcome) => text(outcome.message()),
            Err(err) => failure(err),
        })
    }

    #[tool(description = "Show configuration and status for the service on a port")]
    async fn get_service_info(
        &self,
        Parameters(args): Parameters<PortArgs>,
    ) -> Result<CallToolResult, McpError> {
        let port = match service_port(args.port) {
            Ok(port) => port,
            Err(result) => return Ok(result),
        };
        Ok(match self.supervisor.status().service_info(port).await {
            Ok(view) => text(format::service_info(&view)),
            Err(err) => failure(err),
        })
    }

    #[tool(description = "Summarize how many services are running and which")]
    async fn quick_status(&self) -> Result<CallToolResult, McpError> {
        Ok(match self.supervisor.status().summary().await {
            Ok(summary) => text(format::summary(&summary)),
            Err(err) => failure(err),
        })
    }
}

#[tool_handler]
impl ServerHandler for PortwardenTools {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Inspect, start, and stop local development services by port. \
                 Use quick_status for an overview and list_services to filter."
                    .into(),
            ),
            ..Default::default()
        }
    }
}

/// Serves the tools over stdin/stdout until the client disconnects.
///
/// # Errors
///
/// Returns an error when the transport fails to initialize or the server
/// task aborts.
pub async fn serve_stdio(supervisor: Arc<Supervisor>) -> Result<(), McpServeError> {
    info!("serving MCP tools over stdio");
    let service = PortwardenTools::new(supervisor).serve(stdio()).await?;
    let reason = service.waiting().await?;
    info!(?reason, "MCP client disconnected");
    Ok(())
}
