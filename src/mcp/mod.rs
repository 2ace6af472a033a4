//! MCP front end: six text tools over stdio.

pub mod format;
mod server;

pub use server::{ListServicesArgs, McpServeError, PortArgs, PortwardenTools, serve_stdio};
