//! Application services

pub mod dashboard_service;
pub mod tactical_options_service;

pub use dashboard_service::DashboardService;
pub use tactical_options_service::TacticalOptionsService;
