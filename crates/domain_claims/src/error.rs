//! Claims domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    /// The request was rejected before anything was stored
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Claim not found: {0}")]
    NotFound(String),

    /// The acting user may not perform this operation
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// An intake, screening, policy or storage adapter failed
    #[error(transparent)]
    Port(#[from] PortError),
}

impl ClaimError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied(message.into())
    }
}
