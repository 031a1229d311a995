//! File-backed user store

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use core_kernel::{DomainPort, HealthCheckable, HealthCheckResult, PortError, UserId};
use domain_party::ports::check_unique;
use domain_party::{AccountStatus, User, UserStore};

use crate::error::StoreError;
use crate::snapshot::SnapshotFile;

/// Snapshot file name inside the data directory
pub const USERS_FILE: &str = "users.json";

/// User store persisted to `<data_dir>/users.json`
#[derive(Debug, Clone)]
pub struct FileUserStore {
    snapshot: SnapshotFile<User>,
    users: Arc<RwLock<Vec<User>>>,
}

impl FileUserStore {
    /// Opens the store, loading any existing snapshot
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let snapshot = SnapshotFile::new(data_dir.as_ref().join(USERS_FILE));
        let users = snapshot.load().await?;
        info!(path = %snapshot.path().display(), count = users.len(), "Opened user store");
        Ok(Self {
            snapshot,
            users: Arc::new(RwLock::new(users)),
        })
    }

    /// Opens the store, writing `seed` first when no snapshot exists yet
    pub async fn open_or_seed(data_dir: impl AsRef<Path>, seed: Vec<User>) -> Result<Self, StoreError> {
        let snapshot = SnapshotFile::new(data_dir.as_ref().join(USERS_FILE));
        if !snapshot.exists().await? {
            snapshot.save(&seed).await?;
        }
        Self::open(data_dir).await
    }
}

impl DomainPort for FileUserStore {}

#[async_trait]
impl HealthCheckable for FileUserStore {
    async fn health_check(&self) -> HealthCheckResult {
        match self.snapshot.exists().await {
            Ok(_) => {
                let count = self.users.read().await.len();
                HealthCheckResult::healthy("file-user-store", Some(format!("{} users", count)))
            }
            Err(e) => HealthCheckResult::unhealthy("file-user-store", e.to_string()),
        }
    }
}

#[async_trait]
impl UserStore for FileUserStore {
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn insert(&self, user: User) -> Result<(), PortError> {
        let mut users = self.users.write().await;
        check_unique(&users, &user)?;
        let mut next = users.clone();
        next.push(user);
        self.snapshot.save(&next).await?;
        *users = next;
        Ok(())
    }

    async fn get(&self, id: &UserId) -> Result<User, PortError> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| &u.id == id)
            .cloned()
            .ok_or_else(|| PortError::not_found("User", id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PortError> {
        Ok(self.users.read().await.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, PortError> {
        Ok(self.users.read().await.clone())
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn set_status(&self, id: &UserId, status: AccountStatus) -> Result<User, PortError> {
        let mut users = self.users.write().await;
        let mut next = users.clone();
        let user = next
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| PortError::not_found("User", id))?;
        user.status = status;
        let updated = user.clone();

        self.snapshot.save(&next).await?;
        *users = next;
        Ok(updated)
    }
}
