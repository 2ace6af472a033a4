//! Domain model for local service supervision.
//!
//! Descriptors are the static, persisted definition of a service. Runtime
//! status is derived from a point-in-time port probe and is never stored.
//! Infrastructure concerns remain outside this boundary.

mod command;
mod descriptor;
mod error;
mod filter;
mod ids;
mod launch;
mod outcome;
mod path;
mod status;
mod view;

pub use command::{CommandLine, StartCommand};
pub use descriptor::ServiceDescriptor;
pub use error::LocalServiceDomainError;
pub use filter::StatusFilter;
pub use ids::{ProcessId, ServiceName, ServicePort};
pub use launch::{LaunchSpec, OpenTarget, PORT_ENV_VAR};
pub use outcome::{StartOutcome, StopOutcome};
pub use path::ServicePath;
pub use status::RuntimeStatus;
pub use view::{FleetSummary, ServiceView};
