//! Party Management Domain
//!
//! This crate manages the people and organisations that use the claims
//! portal: patients, hospitals and insurance admins.
//!
//! # Roles
//!
//! Every user carries exactly one [`Role`]. Permission checks elsewhere in
//! the workspace match on it exhaustively, so adding a role is a compile
//! error until every gate decides what the new role may do.
//!
//! # Account Lifecycle
//!
//! ```text
//! register -> Pending -> Approved (may sign in)
//!                     -> Rejected (sign-in refused)
//! ```

pub mod user;
pub mod validation;
pub mod ports;
pub mod directory;
pub mod error;

pub use user::{User, Role, AccountStatus};
pub use validation::{RegistrationRequest, RegistrationValidator, ValidationResult};
pub use ports::{UserStore, InMemoryUserStore};
pub use directory::UserDirectory;
pub use error::PartyError;
