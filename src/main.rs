//! Runs the portwarden HTTP API or MCP server.
//!
//! Usage:
//!
//! ```text
//! portwarden [--config <path>] serve [--host <ip>] [--port <port>]
//! portwarden [--config <path>] mcp
//! ```
//!
//! Logs go to stderr so the MCP stdio transport stays clean.

#[cfg(unix)]
use clap::Parser;
#[cfg(unix)]
use portwarden::{
    config::{Cli, Command, home_dir},
    http, mcp,
    supervisor::Supervisor,
    telemetry,
};
#[cfg(unix)]
use std::net::SocketAddr;
#[cfg(unix)]
use std::sync::Arc;
#[cfg(unix)]
use tokio::net::TcpListener;
#[cfg(unix)]
use tracing::{info, warn};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[cfg(unix)]
#[tokio::main]
async fn main() -> Result<(), BoxError> {
    telemetry::init();
    let cli = Cli::parse();
    let config = cli.resolve(home_dir())?;
    info!(config = %config.config_path, "using service configuration");
    let supervisor = Arc::new(Supervisor::system(&config));

    match cli.command {
        Command::Serve(args) => serve_http(supervisor, args.socket_addr()).await,
        Command::Mcp => mcp::serve_stdio(supervisor).await,
    }
}

#[cfg(unix)]
async fn serve_http(supervisor: Arc<Supervisor>, addr: SocketAddr) -> Result<(), BoxError> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "dashboard listening on http://{addr}");
    axum::serve(listener, http::router(supervisor))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

#[cfg(not(unix))]
fn main() -> Result<(), BoxError> {
    Err("portwarden is not supported on non-Unix platforms".into())
}
