//! Dependency containers.

pub mod host_runtime;

pub use host_runtime::HostRuntime;
