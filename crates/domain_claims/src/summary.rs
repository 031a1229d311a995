//! Claim portfolio summaries

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::claim::{Claim, ClaimStatus};

/// Counts per status, flagged claims and amounts claimed and approved
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSummary {
    pub total: usize,
    pub pending: usize,
    pub under_review: usize,
    pub approved: usize,
    pub rejected: usize,
    pub additional_info: usize,
    /// Claims carrying at least one fraud flag
    pub flagged: usize,
    pub total_amount: Decimal,
    pub approved_amount: Decimal,
}

impl ClaimSummary {
    pub fn from_claims(claims: &[Claim]) -> Self {
        claims.iter().fold(Self::default(), |mut summary, claim| {
            summary.total += 1;
            summary.total_amount += claim.claim_amount;
            if claim.status == ClaimStatus::Approved {
                summary.approved_amount += claim.claim_amount;
            }
            if claim.is_flagged() {
                summary.flagged += 1;
            }
            *summary.count_mut(claim.status) += 1;
            summary
        })
    }

    /// Number of claims with the given status
    pub fn count(&self, status: ClaimStatus) -> usize {
        match status {
            ClaimStatus::Pending => self.pending,
            ClaimStatus::UnderReview => self.under_review,
            ClaimStatus::Approved => self.approved,
            ClaimStatus::Rejected => self.rejected,
            ClaimStatus::AdditionalInfo => self.additional_info,
        }
    }

    fn count_mut(&mut self, status: ClaimStatus) -> &mut usize {
        match status {
            ClaimStatus::Pending => &mut self.pending,
            ClaimStatus::UnderReview => &mut self.under_review,
            ClaimStatus::Approved => &mut self.approved,
            ClaimStatus::Rejected => &mut self.rejected,
            ClaimStatus::AdditionalInfo => &mut self.additional_info,
        }
    }
}
