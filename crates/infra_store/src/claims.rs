//! File-backed claim store

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use core_kernel::{
    ClaimId, DomainPort, HealthCheckable, HealthCheckResult, PortError, UserId,
};
use domain_claims::ports::{apply_update, check_unique};
use domain_claims::{AppliedUpdate, Claim, ClaimStore, ClaimUpdate};

use crate::error::StoreError;
use crate::snapshot::SnapshotFile;

/// Snapshot file name inside the data directory
pub const CLAIMS_FILE: &str = "claims.json";

/// Claim store persisted to `<data_dir>/claims.json`
#[derive(Debug, Clone)]
pub struct FileClaimStore {
    snapshot: SnapshotFile<Claim>,
    claims: Arc<RwLock<Vec<Claim>>>,
}

impl FileClaimStore {
    /// Opens the store, loading any existing snapshot
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let snapshot = SnapshotFile::new(data_dir.as_ref().join(CLAIMS_FILE));
        let claims = snapshot.load().await?;
        info!(path = %snapshot.path().display(), count = claims.len(), "Opened claim store");
        Ok(Self {
            snapshot,
            claims: Arc::new(RwLock::new(claims)),
        })
    }

    /// Opens the store, writing `seed` first when no snapshot exists yet
    pub async fn open_or_seed(data_dir: impl AsRef<Path>, seed: Vec<Claim>) -> Result<Self, StoreError> {
        let snapshot = SnapshotFile::new(data_dir.as_ref().join(CLAIMS_FILE));
        if !snapshot.exists().await? {
            snapshot.save(&seed).await?;
        }
        Self::open(data_dir).await
    }

    /// Writes `next` to disk and only then makes it the in-memory state
    async fn commit(&self, claims: &mut Vec<Claim>, next: Vec<Claim>) -> Result<(), PortError> {
        self.snapshot.save(&next).await?;
        *claims = next;
        Ok(())
    }
}

impl DomainPort for FileClaimStore {}

#[async_trait]
impl HealthCheckable for FileClaimStore {
    async fn health_check(&self) -> HealthCheckResult {
        match self.snapshot.exists().await {
            Ok(_) => {
                let count = self.claims.read().await.len();
                HealthCheckResult::healthy("file-claim-store", Some(format!("{} claims", count)))
            }
            Err(e) => HealthCheckResult::unhealthy("file-claim-store", e.to_string()),
        }
    }
}

#[async_trait]
impl ClaimStore for FileClaimStore {
    #[instrument(skip(self, claim), fields(claim_id = %claim.id))]
    async fn insert(&self, claim: Claim) -> Result<(), PortError> {
        let mut claims = self.claims.write().await;
        check_unique(&claims, &claim)?;
        let mut next = claims.clone();
        next.push(claim);
        self.commit(&mut claims, next).await
    }

    async fn get(&self, id: &ClaimId) -> Result<Claim, PortError> {
        self.claims
            .read()
            .await
            .iter()
            .find(|c| &c.id == id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Claim", id))
    }

    async fn find_by_patient(&self, patient_id: &UserId) -> Result<Vec<Claim>, PortError> {
        Ok(self
            .claims
            .read()
            .await
            .iter()
            .filter(|c| &c.patient_id == patient_id)
            .cloned()
            .collect())
    }

    async fn find_by_hospital(&self, hospital_id: &UserId) -> Result<Vec<Claim>, PortError> {
        Ok(self
            .claims
            .read()
            .await
            .iter()
            .filter(|c| c.hospital_id.as_ref() == Some(hospital_id))
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<Claim>, PortError> {
        Ok(self.claims.read().await.clone())
    }

    #[instrument(skip(self, update), fields(claim_id = %id))]
    async fn update(&self, id: &ClaimId, update: ClaimUpdate) -> Result<AppliedUpdate, PortError> {
        let mut claims = self.claims.write().await;
        let mut next = claims.clone();
        let applied = apply_update(&mut next, id, &update)?;
        self.commit(&mut claims, next).await?;
        Ok(applied)
    }
}
