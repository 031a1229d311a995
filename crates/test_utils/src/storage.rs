//! Storage Test Utilities
//!
//! Provides throwaway data directories for tests of the file-backed stores.

use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A unique directory under the system temp dir, removed on drop
#[derive(Debug)]
pub struct TempDataDir {
    path: PathBuf,
}

impl TempDataDir {
    /// Reserves a fresh directory path; the directory itself is created lazily
    /// by whatever writes into it
    pub fn new() -> Self {
        Self {
            path: std::env::temp_dir().join(format!("claims-portal-test-{}", Uuid::new_v4())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of a file inside the directory
    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Default for TempDataDir {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempDataDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
