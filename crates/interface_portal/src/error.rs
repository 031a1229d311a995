//! Portal error handling

use thiserror::Error;

use core_kernel::CoreError;
use infra_store::StoreError;

/// Errors raised while assembling the portal
#[derive(Debug, Error)]
pub enum PortalError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}
