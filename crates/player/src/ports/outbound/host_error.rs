//! Errors reported by host runtime adapters.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    /// The host does not expose this capability
    #[error("Host capability unavailable: {0}")]
    Unavailable(&'static str),

    /// The host refused or failed the call
    #[error("Host rejected the request: {0}")]
    Rejected(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
