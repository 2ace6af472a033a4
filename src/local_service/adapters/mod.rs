//! Adapter implementations for local service ports.

pub mod json;
pub mod memory;
#[cfg(unix)]
pub mod system;
