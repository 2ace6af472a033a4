//! JSON file adapters.

mod registry;

pub use registry::JsonFileServiceRegistry;
