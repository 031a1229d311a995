//! Policy Domain
//!
//! Holds each patient's policy record and checks a proposed claim against
//! it before adjudication.
//!
//! # Compliance Checks
//!
//! ```text
//! policy record ──┬── current?   (expiry strictly after now)
//!                 ├── covered?   (diagnosis hits no excluded treatment)
//!                 └── in limit?  (amount <= limit - used)
//! ```
//!
//! The three checks are independent; every failing check contributes one
//! issue string. A patient without a record fails all three at once.

pub mod policy;
pub mod compliance;
pub mod ports;

pub use policy::PolicyRecord;
pub use compliance::{verify_compliance, PolicyVerification, POLICY_NOT_FOUND};
pub use ports::{PolicyVerificationPort, PolicyRegistryVerifier};
