//! Claim aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClaimId, CommentId, UserId};
use domain_party::{Role, User};
use domain_policy::PolicyVerification;

use crate::fraud::{FraudFlag, Severity};

/// Author name shown on comments written by the adjudication engine
pub const AUTO_PROCESSOR_NAME: &str = "Auto-Processing System";

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    /// Submitted, not yet decided
    Pending,
    /// Held for a human reviewer
    UnderReview,
    /// Approved for payment
    Approved,
    /// Rejected
    Rejected,
    /// Waiting on more information from the submitter
    AdditionalInfo,
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 5] = [
        ClaimStatus::Pending,
        ClaimStatus::UnderReview,
        ClaimStatus::Approved,
        ClaimStatus::Rejected,
        ClaimStatus::AdditionalInfo,
    ];

    /// Wire name, e.g. `under_review`
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::UnderReview => "under_review",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
            ClaimStatus::AdditionalInfo => "additional_info",
        }
    }

    /// Human label: the wire name with its first underscore replaced by a space
    pub fn label(&self) -> String {
        self.as_str().replacen('_', " ", 1)
    }

    /// Whether the claim still awaits a final decision
    pub fn is_open(&self) -> bool {
        match self {
            ClaimStatus::Pending | ClaimStatus::UnderReview | ClaimStatus::AdditionalInfo => true,
            ClaimStatus::Approved | ClaimStatus::Rejected => false,
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClaimStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown claim status: {}", s))
    }
}

/// A comment on a claim
///
/// Comments are append-only; the claim keeps them in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimComment {
    pub id: CommentId,
    pub author_id: UserId,
    pub author_name: String,
    pub author_role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ClaimComment {
    /// A comment written by a portal user
    pub fn by(author: &User, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: CommentId::new_v7(),
            author_id: author.id.clone(),
            author_name: author.name.clone(),
            author_role: author.role,
            text: text.into(),
            timestamp,
        }
    }

    /// A comment written by the adjudication engine
    pub fn system(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: CommentId::new_v7(),
            author_id: UserId::system(),
            author_name: AUTO_PROCESSOR_NAME.to_string(),
            author_role: Role::Admin,
            text: text.into(),
            timestamp,
        }
    }
}

/// A medical claim submitted by or on behalf of a patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,
    pub patient_id: UserId,
    pub patient_name: String,
    /// Set when a hospital submitted the claim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital_id: Option<UserId>,
    pub hospital_name: String,
    pub diagnosis: String,
    pub diagnosis_code: String,
    pub treatment_details: String,
    /// File names of the supporting documents
    #[serde(default)]
    pub document_names: Vec<String>,
    pub claim_amount: Decimal,
    pub status: ClaimStatus,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub comments: Vec<ClaimComment>,
    /// Findings of the fraud screen, when the claim went through intake
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fraud_flags: Option<Vec<FraudFlag>>,
    /// Policy compliance snapshot taken at intake
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_verification: Option<PolicyVerification>,
    /// Raw field values read from the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_data: Option<BTreeMap<String, String>>,
}

impl Claim {
    /// Fraud flags, empty when the claim was never screened
    pub fn flags(&self) -> &[FraudFlag] {
        self.fraud_flags.as_deref().unwrap_or(&[])
    }

    pub fn is_flagged(&self) -> bool {
        !self.flags().is_empty()
    }

    /// Severity of the most serious fraud flag
    pub fn highest_severity(&self) -> Option<Severity> {
        self.flags().iter().map(|flag| flag.severity).max()
    }

    /// Whether `user` may see this claim
    ///
    /// Patients see their own claims, hospitals the claims they submitted,
    /// admins everything.
    pub fn is_visible_to(&self, user: &User) -> bool {
        match user.role {
            Role::Patient => self.patient_id == user.id,
            Role::Hospital => self.hospital_id.as_ref() == Some(&user.id),
            Role::Admin => true,
        }
    }
}

/// A single atomic change to a stored claim
///
/// Stores apply the whole update inside one critical section: comments are
/// appended, the updated timestamp is set and the status is written when
/// the precondition (if any) holds.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimUpdate {
    pub status: Option<ClaimStatus>,
    /// Only write `status` when the claim currently has this status
    pub only_if_status: Option<ClaimStatus>,
    pub comments: Vec<ClaimComment>,
    pub updated_at: DateTime<Utc>,
}

impl ClaimUpdate {
    /// An update that only bumps the updated timestamp
    pub fn at(updated_at: DateTime<Utc>) -> Self {
        Self {
            status: None,
            only_if_status: None,
            comments: Vec::new(),
            updated_at,
        }
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Makes the status write conditional on the current status
    pub fn when_status(mut self, expected: ClaimStatus) -> Self {
        self.only_if_status = Some(expected);
        self
    }

    pub fn with_comment(mut self, comment: ClaimComment) -> Self {
        self.comments.push(comment);
        self
    }

    /// Applies the update in place and reports whether the status was written
    pub fn apply(&self, claim: &mut Claim) -> bool {
        claim.comments.extend(self.comments.iter().cloned());
        claim.updated_at = self.updated_at;

        match self.status {
            Some(status) if self.only_if_status.map_or(true, |expected| claim.status == expected) => {
                claim.status = status;
                true
            }
            _ => false,
        }
    }
}

/// The stored claim after an update
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedUpdate {
    pub claim: Claim,
    /// Whether the status in the update was written
    pub status_applied: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn uid(token: &str) -> UserId {
        UserId::parse(token).unwrap()
    }

    fn claim(status: ClaimStatus) -> Claim {
        let now = Utc::now();
        Claim {
            id: ClaimId::new_v7(),
            patient_id: uid("1"),
            patient_name: "John Patient".to_string(),
            hospital_id: Some(uid("2")),
            hospital_name: "City General Hospital".to_string(),
            diagnosis: "Asthma".to_string(),
            diagnosis_code: "J45.901".to_string(),
            treatment_details: "Nebulizer treatment".to_string(),
            document_names: vec![],
            claim_amount: dec!(750),
            status,
            submitted_at: now,
            updated_at: now,
            comments: vec![],
            fraud_flags: None,
            policy_verification: None,
            extracted_data: None,
        }
    }

    #[test]
    fn test_status_label_replaces_first_underscore() {
        assert_eq!(ClaimStatus::UnderReview.label(), "under review");
        assert_eq!(ClaimStatus::AdditionalInfo.label(), "additional info");
        assert_eq!(ClaimStatus::Approved.label(), "approved");
    }

    #[test]
    fn test_status_parses_wire_names() {
        for status in ClaimStatus::ALL {
            assert_eq!(status.as_str().parse::<ClaimStatus>().unwrap(), status);
        }
        assert!("closed".parse::<ClaimStatus>().is_err());
    }

    #[test]
    fn test_conditional_update_skips_status_but_keeps_comment() {
        let mut c = claim(ClaimStatus::Approved);
        let later = c.updated_at + chrono::Duration::seconds(5);
        let update = ClaimUpdate::at(later)
            .with_status(ClaimStatus::Rejected)
            .when_status(ClaimStatus::Pending)
            .with_comment(ClaimComment::system("checked", later));

        assert!(!update.apply(&mut c));
        assert_eq!(c.status, ClaimStatus::Approved);
        assert_eq!(c.comments.len(), 1);
        assert_eq!(c.updated_at, later);
    }

    #[test]
    fn test_visibility_by_role() {
        let c = claim(ClaimStatus::Pending);
        let owner = User::patient(uid("1"), "John Patient", "patient@example.com", "POL-123456");
        let other = User::patient(uid("4"), "Alice Roberts", "alice@example.com", "POL-654321");
        let hospital = User::hospital(uid("2"), "City Hospital", "hospital@example.com", "City General Hospital");
        let admin = User::admin(uid("3"), "Admin User", "admin@example.com");

        assert!(c.is_visible_to(&owner));
        assert!(!c.is_visible_to(&other));
        assert!(c.is_visible_to(&hospital));
        assert!(c.is_visible_to(&admin));
    }
}
