//! Demo accounts and claims
//!
//! Loaded into empty stores when `seed_demo_data` is on. Every approved
//! account signs in with the configured demo password.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ClaimId, CoreError, UserId};
use domain_claims::{Claim, ClaimComment, ClaimStatus, FraudFlag, FraudFlagType, Severity};
use domain_party::User;
use domain_policy::PolicyVerification;

fn user_id(token: &str) -> Result<UserId, CoreError> {
    UserId::parse(token)
}

fn at(stamp: &str) -> Result<DateTime<Utc>, CoreError> {
    stamp
        .parse()
        .map_err(|e| CoreError::configuration(format!("invalid seed timestamp {}: {}", stamp, e)))
}

/// The six demo accounts, ids `1` to `6`
pub fn demo_users() -> Result<Vec<User>, CoreError> {
    Ok(vec![
        User::patient(user_id("1")?, "John Patient", "patient@example.com", "POL-123456"),
        User::hospital(user_id("2")?, "City Hospital", "hospital@example.com", "City General Hospital"),
        User::admin(user_id("3")?, "Admin User", "admin@example.com"),
        User::patient(user_id("4")?, "Alice Roberts", "alice.roberts@example.com", "POL-654321"),
        User::patient(user_id("5")?, "David Kumar", "david.kumar@example.com", "POL-654322"),
        User::patient(user_id("6")?, "Priya Singh", "priya.singh@example.com", "POL-654323"),
    ])
}

struct SeedClaim<'a> {
    patient: (&'a str, &'a str),
    diagnosis_code: &'a str,
    diagnosis: &'a str,
    treatment_details: &'a str,
    claim_amount: Decimal,
    status: ClaimStatus,
    submitted: &'a str,
    updated: &'a str,
}

impl SeedClaim<'_> {
    fn build(self) -> Result<Claim, CoreError> {
        Ok(Claim {
            id: ClaimId::new_v7(),
            patient_id: user_id(self.patient.0)?,
            patient_name: self.patient.1.to_string(),
            hospital_id: Some(user_id("2")?),
            hospital_name: "City General Hospital".to_string(),
            diagnosis: self.diagnosis.to_string(),
            diagnosis_code: self.diagnosis_code.to_string(),
            treatment_details: self.treatment_details.to_string(),
            document_names: vec!["placeholder.svg".to_string()],
            claim_amount: self.claim_amount,
            status: self.status,
            submitted_at: at(self.submitted)?,
            updated_at: at(self.updated)?,
            comments: Vec::new(),
            fraud_flags: None,
            policy_verification: None,
            extracted_data: None,
        })
    }
}

/// Five demo claims filed through City General Hospital
///
/// Two of them are still pending, so an admin run of the engine has work
/// to do: a clean 350.00 claim and an 1800.00 claim carrying a medium flag.
pub fn demo_claims() -> Result<Vec<Claim>, CoreError> {
    let users = demo_users()?;
    let admin = users
        .iter()
        .find(|u| u.is_admin())
        .ok_or_else(|| CoreError::configuration("demo users lack an admin"))?;

    let mut approved = SeedClaim {
        patient: ("1", "John Patient"),
        diagnosis_code: "J45.901",
        diagnosis: "Asthma, unspecified",
        treatment_details: "Emergency room visit, nebulizer treatment, prescription for albuterol",
        claim_amount: dec!(750.00),
        status: ClaimStatus::Approved,
        submitted: "2025-03-15T10:30:00Z",
        updated: "2025-03-20T14:45:00Z",
    }
    .build()?;
    approved.policy_verification = Some(PolicyVerification::compliant(Some(dec!(4250.00))));
    approved.comments.push(ClaimComment::by(
        admin,
        "Claim approved after verification of policy coverage.",
        approved.updated_at,
    ));

    let mut in_review = SeedClaim {
        patient: ("1", "John Patient"),
        diagnosis_code: "S52.501A",
        diagnosis: "Fracture of the lower end of radius",
        treatment_details: "X-ray, cast application, follow-up appointment in 6 weeks",
        claim_amount: dec!(1200.00),
        status: ClaimStatus::UnderReview,
        submitted: "2025-04-05T09:15:00Z",
        updated: "2025-04-05T09:15:00Z",
    }
    .build()?;
    in_review.policy_verification = Some(PolicyVerification::compliant(Some(dec!(3050.00))));

    let pending = SeedClaim {
        patient: ("1", "John Patient"),
        diagnosis_code: "J03.00",
        diagnosis: "Acute streptococcal tonsillitis",
        treatment_details: "Consultation, strep test, prescription for antibiotics",
        claim_amount: dec!(350.00),
        status: ClaimStatus::Pending,
        submitted: "2025-04-10T16:20:00Z",
        updated: "2025-04-10T16:20:00Z",
    }
    .build()?;

    let mut flagged = SeedClaim {
        patient: ("4", "Alice Roberts"),
        diagnosis_code: "M54.5",
        diagnosis: "Low back pain",
        treatment_details: "Physical therapy, 6 sessions, prescription for muscle relaxants",
        claim_amount: dec!(1800.00),
        status: ClaimStatus::Pending,
        submitted: "2025-04-08T11:45:00Z",
        updated: "2025-04-08T11:45:00Z",
    }
    .build()?;
    flagged.fraud_flags = Some(vec![FraudFlag::new(
        FraudFlagType::HighAmount,
        "Claim amount exceeds typical cost for this treatment",
        Severity::Medium,
    )]);

    let mut rejected = SeedClaim {
        patient: ("5", "David Kumar"),
        diagnosis_code: "K29.70",
        diagnosis: "Gastritis, unspecified",
        treatment_details: "Endoscopy, biopsy, medication prescription",
        claim_amount: dec!(2200.00),
        status: ClaimStatus::Rejected,
        submitted: "2025-03-25T14:10:00Z",
        updated: "2025-03-30T09:20:00Z",
    }
    .build()?;
    rejected.policy_verification = Some(PolicyVerification {
        is_compliant: false,
        is_policy_current: false,
        is_treatment_covered: true,
        is_within_claim_limit: true,
        remaining_coverage: None,
        issues: Some(vec!["Policy expired on 2025-03-01".to_string()]),
    });
    rejected.comments.push(ClaimComment::by(
        admin,
        "Claim rejected due to policy expiration. Please renew your policy.",
        rejected.updated_at,
    ));

    Ok(vec![approved, in_review, pending, flagged, rejected])
}
