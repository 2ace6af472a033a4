//! Portwarden: local development service supervisor.
//!
//! This crate tracks a set of locally configured services by listening
//! port, reports whether each one is running, and starts or stops them on
//! request. The same core is exposed over an HTTP API with a dashboard and
//! as MCP tools for AI assistants.
//!
//! # Architecture
//!
//! Portwarden follows hexagonal architecture principles:
//!
//! - **Domain**: Descriptors, ports, and runtime status with no I/O
//! - **Ports**: Registry, prober, launcher, and opener contracts
//! - **Adapters**: JSON file, `lsof`, process, and in-memory implementations
//!
//! # Modules
//!
//! - [`local_service`]: Core supervision logic
//! - [`supervisor`]: Wiring of adapters into services
//! - [`http`]: HTTP API and dashboard
//! - [`mcp`]: MCP tool server
//! - [`config`]: Command-line configuration
//! - [`telemetry`]: Tracing setup

pub mod config;
pub mod http;
pub mod local_service;
pub mod mcp;
pub mod supervisor;
pub mod telemetry;
