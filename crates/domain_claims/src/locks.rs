//! Per-claim serialisation
//!
//! Reading a claim, deciding on it and writing the decision back must not
//! interleave with another writer on the same claim. [`ClaimLocks`] hands
//! out one async mutex per claim id.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use core_kernel::ClaimId;

/// Keyed async mutexes, one per claim id
#[derive(Debug, Default)]
pub struct ClaimLocks {
    locks: Mutex<HashMap<ClaimId, Arc<Mutex<()>>>>,
}

impl ClaimLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to a claim
    ///
    /// The claim stays locked until the returned guard is dropped.
    pub async fn acquire(&self, claim_id: ClaimId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // Forget locks nobody holds or waits on.
            locks.retain(|id, lock| *id == claim_id || Arc::strong_count(lock) > 1);
            locks.entry(claim_id).or_default().clone()
        };
        lock.lock_owned().await
    }
}
