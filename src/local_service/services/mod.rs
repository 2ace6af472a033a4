//! Application services for local service supervision.

mod catalog;
mod error;
mod lifecycle;
mod status;
mod support;
mod workspace;

pub use catalog::ServiceCatalogService;
pub use error::{ServiceControlError, ServiceControlResult};
pub use lifecycle::{LifecycleSettings, ServiceLifecycleService};
pub use status::ServiceStatusService;
pub use workspace::ServiceWorkspaceService;
