//! Party domain errors
//!
//! This module defines all error types that can occur in the party domain,
//! including registration, sign-in and account administration failures.

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the party domain
#[derive(Debug, Error)]
pub enum PartyError {
    /// Registration data failed validation
    #[error("Invalid registration: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    /// Another account already uses this email address
    #[error("Email already in use: {0}")]
    EmailInUse(String),

    /// Unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The account is waiting for admin approval
    #[error("Account pending approval")]
    AccountPending,

    /// The account registration was rejected
    #[error("Account access denied")]
    AccountRejected,

    /// The acting user may not perform this operation
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// User with the given ID was not found
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// The user store failed
    #[error(transparent)]
    Port(#[from] PortError),
}
