//! Party Domain Ports
//!
//! This module defines the port interface for user persistence, enabling
//! swappable implementations (in-memory, file snapshot, ...).
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_party::{UserDirectory, InMemoryUserStore};
//! use std::sync::Arc;
//!
//! let store = Arc::new(InMemoryUserStore::with_users(seed_users()));
//! let directory = UserDirectory::new(store, "password", notifier);
//! ```

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use core_kernel::{DomainPort, HealthCheckable, HealthCheckResult, PortError, UserId};

use crate::user::{AccountStatus, User};

/// Port for storing portal users
#[async_trait]
pub trait UserStore: DomainPort {
    /// Adds a new user; fails with `Conflict` if the id or email is taken
    async fn insert(&self, user: User) -> Result<(), PortError>;

    /// Retrieves a user by ID
    async fn get(&self, id: &UserId) -> Result<User, PortError>;

    /// Finds a user by exact email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PortError>;

    /// Lists all users in registration order
    async fn list(&self) -> Result<Vec<User>, PortError>;

    /// Changes the account status of a user and returns the updated record
    async fn set_status(&self, id: &UserId, status: AccountStatus) -> Result<User, PortError>;
}

/// Checks that `user` can be added to `users` without clashing
pub fn check_unique(users: &[User], user: &User) -> Result<(), PortError> {
    if users.iter().any(|u| u.id == user.id) {
        return Err(PortError::conflict(format!("User {} already exists", user.id)));
    }
    if users.iter().any(|u| u.email == user.email) {
        return Err(PortError::conflict(format!("Email {} already registered", user.email)));
    }
    Ok(())
}

/// In-memory implementation of UserStore
///
/// State lives only as long as the process; the file-backed adapter in
/// `infra_store` persists the same records.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with users
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }
}

impl DomainPort for InMemoryUserStore {}

#[async_trait]
impl HealthCheckable for InMemoryUserStore {
    async fn health_check(&self) -> HealthCheckResult {
        let count = self.users.read().await.len();
        HealthCheckResult::healthy("in-memory-user-store", Some(format!("{} users", count)))
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: User) -> Result<(), PortError> {
        let mut users = self.users.write().await;
        check_unique(&users, &user)?;
        users.push(user);
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

    async fn set_status(&self, id: &UserId, status: AccountStatus) -> Result<User, PortError> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| PortError::not_found("User", id))?;
        user.status = status;
        Ok(user.clone())
    }
}
