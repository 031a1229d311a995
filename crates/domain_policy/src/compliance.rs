//! Claim compliance verification

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::start_of_day_utc;

use crate::policy::PolicyRecord;

/// Issue reported when the patient has no policy on file
pub const POLICY_NOT_FOUND: &str = "Policy not found for this patient";

/// Snapshot of a claim's compliance with the patient's policy
///
/// Computed once when the claim is submitted and stored on the claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyVerification {
    /// All three checks passed
    #[serde(default)]
    pub is_compliant: bool,
    pub is_policy_current: bool,
    pub is_treatment_covered: bool,
    pub is_within_claim_limit: bool,
    /// Coverage left on the policy, when a policy was found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_coverage: Option<Decimal>,
    /// Human-readable reasons for each failed check; absent when compliant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<String>>,
}

impl PolicyVerification {
    /// A verification where every check passed
    pub fn compliant(remaining_coverage: Option<Decimal>) -> Self {
        Self {
            is_compliant: true,
            is_policy_current: true,
            is_treatment_covered: true,
            is_within_claim_limit: true,
            remaining_coverage,
            issues: None,
        }
    }

    /// Result for a patient with no policy on file
    pub fn not_found() -> Self {
        Self {
            is_compliant: false,
            is_policy_current: false,
            is_treatment_covered: false,
            is_within_claim_limit: false,
            remaining_coverage: None,
            issues: Some(vec![POLICY_NOT_FOUND.to_string()]),
        }
    }

    /// True when any of the three checks failed
    pub fn has_issues(&self) -> bool {
        !self.is_policy_current || !self.is_treatment_covered || !self.is_within_claim_limit
    }

    /// Issue strings; empty when there are none
    pub fn issues(&self) -> &[String] {
        self.issues.as_deref().unwrap_or(&[])
    }
}

/// Verifies a proposed claim against a patient's policy
///
/// # Arguments
///
/// * `policy` - The patient's policy record, if one exists
/// * `diagnosis` - Diagnosis text from the claim
/// * `claim_amount` - Amount being claimed
/// * `now` - The instant expiry is judged against
///
/// # Returns
///
/// The verification snapshot. A missing policy short-circuits the three
/// checks and yields a single "not found" issue.
pub fn verify_compliance(
    policy: Option<&PolicyRecord>,
    diagnosis: &str,
    claim_amount: Decimal,
    now: DateTime<Utc>,
) -> PolicyVerification {
    let Some(policy) = policy else {
        return PolicyVerification::not_found();
    };

    let mut issues = Vec::new();

    let is_policy_current = start_of_day_utc(policy.expiration_date) > now;
    if !is_policy_current {
        issues.push(format!("Policy expired on {}", policy.expiration_date.format("%Y-%m-%d")));
    }

    let is_treatment_covered = policy.matching_exclusion(diagnosis).is_none();
    if !is_treatment_covered {
        issues.push("This treatment is excluded from policy coverage".to_string());
    }

    let remaining_coverage = policy.remaining_coverage();
    let is_within_claim_limit = claim_amount <= remaining_coverage;
    if !is_within_claim_limit {
        issues.push(format!("Claim exceeds remaining coverage ({:.2})", remaining_coverage));
    }

    PolicyVerification {
        is_compliant: is_policy_current && is_treatment_covered && is_within_claim_limit,
        is_policy_current,
        is_treatment_covered,
        is_within_claim_limit,
        remaining_coverage: Some(remaining_coverage),
        issues: if issues.is_empty() { None } else { Some(issues) },
    }
}
