//! Service layer error types
//!
//! This module defines errors that can occur in the application service layer,
//! wrapping the domain, mutation and host errors beneath it.

use thiserror::Error;
use tianfa_domain::DomainError;
use tianfa_shared::MutationError;

use crate::ports::outbound::HostError;

/// Errors that can occur in service operations
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Mutation(#[from] MutationError),

    #[error(transparent)]
    Host(#[from] HostError),

    /// Confirm or cancel with no matching pending action
    #[error("Nothing is pending confirmation")]
    NothingPending,
}

impl ServiceError {
    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ServiceError::Domain(DomainError::NotFound { .. })
                | ServiceError::Mutation(MutationError::VillainNotFound(_))
        )
    }
}
