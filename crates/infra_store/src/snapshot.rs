//! Atomic JSON snapshot files

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::StoreError;

/// A JSON file holding a list of records
///
/// Writes go to a sibling temporary file which is then renamed over the
/// snapshot, so readers see either the old or the new list, never a torn
/// file.
#[derive(Debug, Clone)]
pub struct SnapshotFile<T> {
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> SnapshotFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _records: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> Result<bool, StoreError> {
        tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))
    }

    /// Reads the records; a missing file holds no records
    pub async fn load(&self) -> Result<Vec<T>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        let records: Vec<T> =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::serialization(&self.path, e))?;
        debug!(path = %self.path.display(), count = records.len(), "Loaded snapshot");
        Ok(records)
    }

    /// Replaces the file contents with `records`
    pub async fn save(&self, records: &[T]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| StoreError::io(dir, e))?;
        }

        let bytes =
            serde_json::to_vec_pretty(records).map_err(|e| StoreError::serialization(&self.path, e))?;
        let staging = self.staging_path();
        tokio::fs::write(&staging, bytes)
            .await
            .map_err(|e| StoreError::io(&staging, e))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;

        debug!(path = %self.path.display(), count = records.len(), "Saved snapshot");
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
