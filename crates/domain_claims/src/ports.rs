//! Claims Domain Ports
//!
//! Port interfaces the claims service depends on. Document intake and fraud
//! screening live in [`crate::intake`] and [`crate::fraud`]; policy
//! verification comes from `domain_policy`. This module defines the claim
//! repository and its in-memory adapter.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::{ClaimStore, InMemoryClaimStore};
//!
//! let store = InMemoryClaimStore::with_claims(seed_claims());
//! let claim = store.get(&claim_id).await?;
//! ```

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use core_kernel::{ClaimId, DomainPort, HealthCheckable, HealthCheckResult, PortError, UserId};

use crate::claim::{AppliedUpdate, Claim, ClaimUpdate};

/// Port for storing claims
///
/// Claims are never deleted. Every mutation goes through [`ClaimStore::update`],
/// which applies a whole [`ClaimUpdate`] atomically.
#[async_trait]
pub trait ClaimStore: DomainPort {
    /// Adds a new claim; fails with `Conflict` if the id is taken
    async fn insert(&self, claim: Claim) -> Result<(), PortError>;

    /// Retrieves a claim by ID
    async fn get(&self, id: &ClaimId) -> Result<Claim, PortError>;

    /// Claims filed for a patient, in submission order
    async fn find_by_patient(&self, patient_id: &UserId) -> Result<Vec<Claim>, PortError>;

    /// Claims submitted by a hospital, in submission order
    async fn find_by_hospital(&self, hospital_id: &UserId) -> Result<Vec<Claim>, PortError>;

    /// All claims in submission order
    async fn list(&self) -> Result<Vec<Claim>, PortError>;

    /// Applies an update to one claim and returns the stored result
    async fn update(&self, id: &ClaimId, update: ClaimUpdate) -> Result<AppliedUpdate, PortError>;
}

/// Checks that `claim` can be added to `claims` without clashing
pub fn check_unique(claims: &[Claim], claim: &Claim) -> Result<(), PortError> {
    if claims.iter().any(|c| c.id == claim.id) {
        return Err(PortError::conflict(format!("Claim {} already exists", claim.id)));
    }
    Ok(())
}

/// Applies `update` to the claim with `id` inside `claims`
pub fn apply_update(claims: &mut [Claim], id: &ClaimId, update: &ClaimUpdate) -> Result<AppliedUpdate, PortError> {
    let claim = claims
        .iter_mut()
        .find(|c| &c.id == id)
        .ok_or_else(|| PortError::not_found("Claim", id))?;
    let status_applied = update.apply(claim);
    Ok(AppliedUpdate {
        claim: claim.clone(),
        status_applied,
    })
}

/// In-memory implementation of ClaimStore
#[derive(Debug, Default, Clone)]
pub struct InMemoryClaimStore {
    claims: Arc<RwLock<Vec<Claim>>>,
}

impl InMemoryClaimStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with claims
    pub fn with_claims(claims: Vec<Claim>) -> Self {
        Self {
            claims: Arc::new(RwLock::new(claims)),
        }
    }

    async fn filtered(&self, predicate: impl Fn(&Claim) -> bool) -> Vec<Claim> {
        self.claims
            .read()
            .await
            .iter()
            .filter(|c| predicate(c))
            .cloned()
            .collect()
    }
}

impl DomainPort for InMemoryClaimStore {}

#[async_trait]
impl HealthCheckable for InMemoryClaimStore {
    async fn health_check(&self) -> HealthCheckResult {
        let count = self.claims.read().await.len();
        HealthCheckResult::healthy("in-memory-claim-store", Some(format!("{} claims", count)))
    }
}

#[async_trait]
impl ClaimStore for InMemoryClaimStore {
    async fn insert(&self, claim: Claim) -> Result<(), PortError> {
        let mut claims = self.claims.write().await;
        check_unique(&claims, &claim)?;
        claims.push(claim);
        Ok(())
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
        Ok(self.filtered(|c| &c.patient_id == patient_id).await)
    }

    async fn find_by_hospital(&self, hospital_id: &UserId) -> Result<Vec<Claim>, PortError> {
        Ok(self.filtered(|c| c.hospital_id.as_ref() == Some(hospital_id)).await)
    }

    async fn list(&self) -> Result<Vec<Claim>, PortError> {
        Ok(self.claims.read().await.clone())
    }

    async fn update(&self, id: &ClaimId, update: ClaimUpdate) -> Result<AppliedUpdate, PortError> {
        let mut claims = self.claims.write().await;
        apply_update(&mut claims, id, &update)
    }
}
