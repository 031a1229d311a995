//! Storage error types
//!
//! This module defines the errors that can occur while reading or writing
//! snapshot files, and their translation into port errors.

use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

use core_kernel::PortError;

/// Errors that can occur during snapshot operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing or renaming a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot could not be encoded or decoded
    #[error("Snapshot {path} is not valid JSON: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn serialization(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        StoreError::Serialization {
            path: path.into(),
            source,
        }
    }

    /// Path of the file involved
    pub fn path(&self) -> &PathBuf {
        match self {
            StoreError::Io { path, .. } | StoreError::Serialization { path, .. } => path,
        }
    }
}

impl From<StoreError> for PortError {
    fn from(error: StoreError) -> Self {
        warn!(path = %error.path().display(), error = %error, "Snapshot operation failed");
        let message = error.to_string();
        PortError::internal_with_source(message, error)
    }
}
