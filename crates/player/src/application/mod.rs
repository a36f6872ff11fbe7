//! Application layer - dashboard use cases over the host runtime ports.

pub mod dto;
pub mod error;
pub mod services;

pub use error::ServiceError;
