//! Claim auto-adjudication
//!
//! [`decide`] maps the fraud findings, the policy verdict and the claimed
//! amount to a recommended status. The first matching row wins:
//!
//! | Condition | Recommendation |
//! |---|---|
//! | any high-severity flag, or a policy issue on an amount above 5000 | rejected |
//! | a policy issue, an amount above 5000, or any flag | under review |
//! | no policy issue and no flags | approved |
//! | otherwise | pending |
//!
//! A claim without a policy verification has no policy issue.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::ClaimId;
use domain_policy::PolicyVerification;

use crate::claim::{Claim, ClaimStatus};
use crate::fraud::{FraudFlag, Severity};

/// Amounts strictly above this are never approved automatically
pub const REVIEW_AMOUNT_THRESHOLD: Decimal = dec!(5000);

/// Whether the verification reports a failed check
pub fn has_policy_issues(policy: Option<&PolicyVerification>) -> bool {
    policy.is_some_and(PolicyVerification::has_issues)
}

/// Recommends a status for a claim
pub fn decide(flags: &[FraudFlag], policy: Option<&PolicyVerification>, claim_amount: Decimal) -> ClaimStatus {
    let serious_fraud = flags.iter().any(|flag| flag.severity == Severity::High);
    let policy_issues = has_policy_issues(policy);
    let high_amount = claim_amount > REVIEW_AMOUNT_THRESHOLD;

    if serious_fraud || (policy_issues && high_amount) {
        ClaimStatus::Rejected
    } else if policy_issues || high_amount || !flags.is_empty() {
        ClaimStatus::UnderReview
    } else if !policy_issues && flags.is_empty() {
        ClaimStatus::Approved
    } else {
        ClaimStatus::Pending
    }
}

/// Recommends a status from the findings stored on a claim
pub fn decide_for(claim: &Claim) -> ClaimStatus {
    decide(claim.flags(), claim.policy_verification.as_ref(), claim.claim_amount)
}

/// Text of the audit comment the engine appends on every run
pub fn auto_process_comment(recommended: ClaimStatus) -> String {
    format!(
        "Claim automatically processed. Recommended status: {}.",
        recommended.label()
    )
}

/// Result of running the engine on one claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjudicationOutcome {
    pub claim_id: ClaimId,
    pub recommended: ClaimStatus,
    /// Whether the recommendation replaced a pending status
    pub status_applied: bool,
}
