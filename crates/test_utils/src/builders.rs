//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use core_kernel::{ClaimId, UserId};
use domain_claims::{Claim, ClaimComment, ClaimStatus, ExtractedRecord, FraudFlag};
use domain_policy::PolicyVerification;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::{TemporalFixtures, UserFixtures};

/// Builder for constructing stored claims
pub struct ClaimBuilder {
    claim: Claim,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimBuilder {
    /// A pending 200.00 claim for John Patient via City General Hospital
    pub fn new() -> Self {
        let at = TemporalFixtures::while_covered();
        Self {
            claim: Claim {
                id: ClaimId::new_v7(),
                patient_id: UserFixtures::id("1"),
                patient_name: "John Patient".to_string(),
                hospital_id: Some(UserFixtures::id("2")),
                hospital_name: "City General Hospital".to_string(),
                diagnosis: "Acute bronchitis".to_string(),
                diagnosis_code: "J20.9".to_string(),
                treatment_details: "Chest X-ray, Consultation, Antibiotics".to_string(),
                document_names: vec!["statement.pdf".to_string()],
                claim_amount: dec!(200.00),
                status: ClaimStatus::Pending,
                submitted_at: at,
                updated_at: at,
                comments: Vec::new(),
                fraud_flags: Some(Vec::new()),
                policy_verification: None,
                extracted_data: None,
            },
        }
    }

    /// Sets the patient the claim is for
    pub fn for_patient(mut self, id: UserId, name: impl Into<String>) -> Self {
        self.claim.patient_id = id;
        self.claim.patient_name = name.into();
        self
    }

    /// Sets the submitting hospital; `None` for a patient submission
    pub fn from_hospital(mut self, id: Option<UserId>) -> Self {
        self.claim.hospital_id = id;
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.claim.claim_amount = amount;
        self
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.claim.status = status;
        self
    }

    /// Adds a fraud flag
    pub fn with_flag(mut self, flag: FraudFlag) -> Self {
        self.claim.fraud_flags.get_or_insert_with(Vec::new).push(flag);
        self
    }

    /// Marks the claim as never screened
    pub fn unscreened(mut self) -> Self {
        self.claim.fraud_flags = None;
        self
    }

    pub fn with_policy_verification(mut self, verification: PolicyVerification) -> Self {
        self.claim.policy_verification = Some(verification);
        self
    }

    pub fn with_comment(mut self, comment: ClaimComment) -> Self {
        self.claim.comments.push(comment);
        self
    }

    pub fn build(self) -> Claim {
        self.claim
    }
}

/// Builder for constructing extracted document data
pub struct ExtractedRecordBuilder {
    record: ExtractedRecord,
}

impl Default for ExtractedRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractedRecordBuilder {
    /// A complete record with every required field at 0.95 confidence
    pub fn new() -> Self {
        let mut builder = Self {
            record: ExtractedRecord {
                patient_name: Some("John Patient".to_string()),
                patient_id: Some("1".to_string()),
                hospital_name: Some("City General Hospital".to_string()),
                diagnosis: Some("Acute bronchitis".to_string()),
                diagnosis_code: Some("J20.9".to_string()),
                treatment_details: Some("Antibiotics".to_string()),
                claim_amount: Some(dec!(450.00)),
                service_date: None,
                confidence: Default::default(),
            },
        };
        for field in domain_claims::intake::fields::REQUIRED {
            builder = builder.with_confidence(field, 0.95);
        }
        builder
    }

    pub fn with_amount(mut self, amount: Option<Decimal>) -> Self {
        self.record.claim_amount = amount;
        self
    }

    pub fn with_patient_name(mut self, name: Option<&str>) -> Self {
        self.record.patient_name = name.map(str::to_string);
        self
    }

    pub fn with_diagnosis(mut self, diagnosis: Option<&str>) -> Self {
        self.record.diagnosis = diagnosis.map(str::to_string);
        self
    }

    pub fn with_treatment_details(mut self, details: Option<&str>) -> Self {
        self.record.treatment_details = details.map(str::to_string);
        self
    }

    pub fn with_confidence(mut self, field: &str, confidence: f64) -> Self {
        self.record.confidence.insert(field.to_string(), confidence);
        self
    }

    pub fn build(self) -> ExtractedRecord {
        self.record
    }
}
