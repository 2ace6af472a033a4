//! In-memory adapters for tests and deterministic local flows.

mod host;
mod registry;

pub use host::{InMemoryHostError, InMemoryProcessHost};
pub use registry::InMemoryServiceRegistry;
