//! Data transfer objects
//!
//! Types the dashboard service hands to its callers: pending confirmations,
//! the transient notice and a point-in-time snapshot of the dashboard.

pub mod dashboard;

pub use dashboard::{DashboardSnapshot, DeleteTarget, Notice, PendingAction, PendingDelete};
