//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims portal test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for users, policies and clocks
//! - `builders`: Builder patterns for claims and extracted records
//! - `storage`: Throwaway data directories for file-backed stores
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators
//! - `notify`: A notifier that records what it was told

pub mod fixtures;
pub mod builders;
pub mod storage;
pub mod assertions;
pub mod generators;
pub mod notify;

pub use fixtures::*;
pub use builders::*;
pub use storage::*;
pub use assertions::*;
pub use generators::*;
pub use notify::*;
