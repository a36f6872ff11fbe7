//! Tianfa player crate.
//!
//! Dashboard services over a host chat runtime, the ports that runtime is
//! reached through, and adapters for running outside the host.

pub mod application;
pub mod infrastructure;
pub mod ports;
pub mod runner;
pub mod state;

// Re-export commonly used entrypoints
pub use application::services::{DashboardService, TacticalOptionsService};
pub use application::ServiceError;
pub use state::HostRuntime;
