//! Policy Domain Ports
//!
//! [`PolicyVerificationPort`] is what the claims intake pipeline calls to
//! check a claim against the patient's policy. [`PolicyRegistryVerifier`]
//! answers from a fixed table of policy records and simulates the latency
//! of a policy administration system.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use core_kernel::{Clock, DomainPort, PortError, SimulatedLatency, SystemClock, UserId};

use crate::compliance::{verify_compliance, PolicyVerification};
use crate::policy::PolicyRecord;

/// Port for verifying a claim against the patient's policy
#[async_trait]
pub trait PolicyVerificationPort: DomainPort {
    /// Checks currency, coverage and limit for a proposed claim
    async fn verify_policy(
        &self,
        patient_id: &UserId,
        diagnosis: &str,
        claim_amount: Decimal,
    ) -> Result<PolicyVerification, PortError>;
}

/// Verifies claims against an in-process table of policy records
#[derive(Debug, Clone)]
pub struct PolicyRegistryVerifier {
    policies: HashMap<UserId, PolicyRecord>,
    clock: Arc<dyn Clock>,
    latency: SimulatedLatency,
}

impl PolicyRegistryVerifier {
    /// Creates an empty registry using the system clock and no latency
    pub fn new() -> Self {
        Self {
            policies: HashMap::new(),
            clock: Arc::new(SystemClock),
            latency: SimulatedLatency::none(),
        }
    }

    /// Creates a registry holding the demo policy table
    ///
    /// Patient `1` holds POL-123456: expires 2025-12-31, limit 5000 with
    /// 750 used, excluding cosmetic surgery and experimental treatments.
    pub fn seeded() -> Self {
        let mut registry = Self::new();
        if let (Ok(patient), Some(expiration_date)) =
            (UserId::parse("1"), NaiveDate::from_ymd_opt(2025, 12, 31))
        {
            registry = registry.with_policy(
                patient,
                PolicyRecord {
                    policy_number: "POL-123456".to_string(),
                    expiration_date,
                    coverage_limit: dec!(5000),
                    used_coverage: dec!(750),
                    excluded_treatments: vec![
                        "cosmetic surgery".to_string(),
                        "experimental treatments".to_string(),
                    ],
                },
            );
        }
        registry
    }

    /// Adds or replaces the policy for a patient
    pub fn with_policy(mut self, patient_id: UserId, record: PolicyRecord) -> Self {
        self.policies.insert(patient_id, record);
        self
    }

    /// Sets the clock used to judge expiry
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Sets the simulated lookup latency
    pub fn with_latency(mut self, latency: SimulatedLatency) -> Self {
        self.latency = latency;
        self
    }

    /// Returns the policy on file for a patient
    pub fn policy_for(&self, patient_id: &UserId) -> Option<&PolicyRecord> {
        self.policies.get(patient_id)
    }
}

impl Default for PolicyRegistryVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainPort for PolicyRegistryVerifier {}

#[async_trait]
impl PolicyVerificationPort for PolicyRegistryVerifier {
    async fn verify_policy(
        &self,
        patient_id: &UserId,
        diagnosis: &str,
        claim_amount: Decimal,
    ) -> Result<PolicyVerification, PortError> {
        self.latency.wait().await;

        let verification = verify_compliance(
            self.policy_for(patient_id),
            diagnosis,
            claim_amount,
            self.clock.now(),
        );
        debug!(
            patient_id = %patient_id,
            compliant = verification.is_compliant,
            issues = verification.issues().len(),
            "Policy verified"
        );
        Ok(verification)
    }
}
