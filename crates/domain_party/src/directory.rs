//! User directory service
//!
//! Orchestrates registration, sign-in and account approval over a
//! [`UserStore`], reporting each outcome through the [`Notifier`] port.
//!
//! Sign-in compares the supplied password with a single configured demo
//! credential. There is no password storage or hashing.

use std::sync::Arc;

use tracing::{info, warn};

use core_kernel::{Notification, Notifier, PortError, UserId};

use crate::error::PartyError;
use crate::ports::UserStore;
use crate::user::{AccountStatus, Role, User};
use crate::validation::{RegistrationRequest, RegistrationValidator};

/// Registration, sign-in and account administration
pub struct UserDirectory {
    store: Arc<dyn UserStore>,
    demo_password: String,
    notifier: Arc<dyn Notifier>,
}

impl UserDirectory {
    /// Creates a new directory
    ///
    /// # Arguments
    ///
    /// * `store` - Where users are kept
    /// * `demo_password` - The password every approved account signs in with
    /// * `notifier` - Receives user-facing outcome messages
    pub fn new(store: Arc<dyn UserStore>, demo_password: impl Into<String>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            demo_password: demo_password.into(),
            notifier,
        }
    }

    /// Registers a new account in the `Pending` state
    pub async fn register(&self, request: RegistrationRequest) -> Result<User, PartyError> {
        let validation = RegistrationValidator::validate(&request);
        for warning in &validation.warnings {
            warn!(email = %request.email, "{}", warning);
        }
        if !validation.is_valid {
            self.notifier.notify(Notification::destructive(
                "Registration failed",
                validation.errors.join("; "),
            ));
            return Err(PartyError::ValidationFailed(validation.errors));
        }

        if self.store.find_by_email(&request.email).await?.is_some() {
            self.notifier.notify(Notification::destructive("Registration failed", "Email already in use"));
            return Err(PartyError::EmailInUse(request.email));
        }

        let user = User {
            id: UserId::generate(),
            name: request.name,
            email: request.email,
            role: request.role,
            status: AccountStatus::Pending,
            policy_number: match request.role {
                Role::Patient => request.policy_number,
                Role::Hospital | Role::Admin => None,
            },
            hospital_name: match request.role {
                Role::Hospital => request.hospital_name,
                Role::Patient | Role::Admin => None,
            },
        };

        self.store.insert(user.clone()).await.map_err(|e| match e {
            PortError::Conflict { .. } => PartyError::EmailInUse(user.email.clone()),
            other => PartyError::Port(other),
        })?;

        info!(user_id = %user.id, role = %user.role, "Registered new account pending approval");
        self.notifier.notify(Notification::info(
            "Registration successful",
            "Your account is pending approval by an administrator",
        ));
        Ok(user)
    }

    /// Signs a user in
    ///
    /// Only approved accounts may sign in; pending and rejected accounts are
    /// refused with a distinct error even when the password matches.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, PartyError> {
        let user = match self.store.find_by_email(email).await? {
            Some(user) if password == self.demo_password => user,
            _ => {
                warn!(email, "Sign-in failed");
                self.notifier.notify(Notification::destructive("Login failed", "Invalid email or password"));
                return Err(PartyError::InvalidCredentials);
            }
        };

        match user.status {
            AccountStatus::Pending => {
                self.notifier.notify(Notification::destructive(
                    "Account pending approval",
                    "Your account is waiting for admin approval. Please check back later.",
                ));
                Err(PartyError::AccountPending)
            }
            AccountStatus::Rejected => {
                self.notifier.notify(Notification::destructive(
                    "Account access denied",
                    "Your account registration was rejected. Please contact support.",
                ));
                Err(PartyError::AccountRejected)
            }
            AccountStatus::Approved => {
                info!(user_id = %user.id, role = %user.role, "User signed in");
                self.notifier.notify(Notification::info("Login successful", format!("Welcome back, {}", user.name)));
                Ok(user)
            }
        }
    }

    /// Approves a pending account so it can sign in
    pub async fn approve_user(&self, actor: &User, user_id: &UserId) -> Result<User, PartyError> {
        self.set_status(actor, user_id, AccountStatus::Approved).await
    }

    /// Rejects an account so sign-in is refused
    pub async fn reject_user(&self, actor: &User, user_id: &UserId) -> Result<User, PartyError> {
        self.set_status(actor, user_id, AccountStatus::Rejected).await
    }

    /// Lists accounts awaiting approval
    pub async fn pending_users(&self, actor: &User) -> Result<Vec<User>, PartyError> {
        Self::require_admin(actor, "Only admins can review pending accounts")?;
        Ok(self
            .store
            .list()
            .await?
            .into_iter()
            .filter(|u| u.status == AccountStatus::Pending)
            .collect())
    }

    /// Looks up a user by ID
    pub async fn get_user(&self, user_id: &UserId) -> Result<User, PartyError> {
        self.store.get(user_id).await.map_err(|e| not_found_or_port(e, user_id))
    }

    async fn set_status(&self, actor: &User, user_id: &UserId, status: AccountStatus) -> Result<User, PartyError> {
        if let Err(e) = Self::require_admin(actor, "Only admins can approve or reject accounts") {
            self.notifier.notify(Notification::destructive("Permission denied", e.to_string()));
            return Err(e);
        }

        let user = self
            .store
            .set_status(user_id, status)
            .await
            .map_err(|e| not_found_or_port(e, user_id))?;

        info!(user_id = %user.id, admin_id = %actor.id, ?status, "Account status changed");
        let notification = match status {
            AccountStatus::Approved => Notification::info("User approved", "The user can now log in to their account"),
            AccountStatus::Rejected => Notification::info("User rejected", "The user has been denied access"),
            AccountStatus::Pending => Notification::info("User reset", "The account is pending approval again"),
        };
        self.notifier.notify(notification);
        Ok(user)
    }

    fn require_admin(actor: &User, message: &str) -> Result<(), PartyError> {
        if actor.is_admin() {
            Ok(())
        } else {
            Err(PartyError::PermissionDenied(message.to_string()))
        }
    }
}

fn not_found_or_port(error: PortError, user_id: &UserId) -> PartyError {
    if error.is_not_found() {
        PartyError::UserNotFound(user_id.to_string())
    } else {
        PartyError::Port(error)
    }
}
