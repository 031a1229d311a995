//! Infrastructure Storage Layer
//!
//! File-backed adapters for the claim and user store ports. Each store
//! keeps its records in memory and mirrors them to a single JSON snapshot
//! file in the configured data directory.
//!
//! # Consistency
//!
//! Every mutation is computed on a copy of the records, written to disk,
//! and only then swapped into memory, all under the store's write lock. A
//! failed write leaves both the file and the in-memory state untouched.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_store::FileClaimStore;
//!
//! let store = FileClaimStore::open_or_seed("./data", seed_claims()).await?;
//! let claims = store.list().await?;
//! ```

pub mod error;
pub mod snapshot;
pub mod claims;
pub mod users;

pub use error::StoreError;
pub use snapshot::SnapshotFile;
pub use claims::FileClaimStore;
pub use users::FileUserStore;
