//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use domain_claims::{intake::fields, ClaimStatus, ExtractedRecord, FraudFlag, FraudFlagType, Severity};
use domain_policy::PolicyVerification;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for claim amounts from 0.00 to 20,000.00
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..2_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn severity_strategy() -> impl Strategy<Value = Severity> {
    prop_oneof![Just(Severity::Low), Just(Severity::Medium), Just(Severity::High)]
}

fn flag_type_strategy() -> impl Strategy<Value = FraudFlagType> {
    prop_oneof![
        Just(FraudFlagType::RepeatedClaim),
        Just(FraudFlagType::HighAmount),
        Just(FraudFlagType::MismatchedData),
        Just(FraudFlagType::MissingInfo),
        Just(FraudFlagType::LowConfidence),
    ]
}

/// Strategy for up to four fraud flags
pub fn flags_strategy() -> impl Strategy<Value = Vec<FraudFlag>> {
    prop::collection::vec(
        (flag_type_strategy(), severity_strategy())
            .prop_map(|(flag_type, severity)| FraudFlag::new(flag_type, "Generated finding", severity)),
        0..4,
    )
}

/// Strategy for an optional, internally consistent policy verification
pub fn policy_verification_strategy() -> impl Strategy<Value = Option<PolicyVerification>> {
    prop::option::of((any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(is_policy_current, is_treatment_covered, is_within_claim_limit)| {
            let is_compliant = is_policy_current && is_treatment_covered && is_within_claim_limit;
            PolicyVerification {
                is_compliant,
                is_policy_current,
                is_treatment_covered,
                is_within_claim_limit,
                remaining_coverage: None,
                issues: if is_compliant { None } else { Some(vec!["Generated issue".to_string()]) },
            }
        },
    ))
}

/// Strategy for generating claim statuses
pub fn status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop::sample::select(ClaimStatus::ALL.to_vec())
}

/// Strategy for extracted records with arbitrary gaps and confidences
pub fn extracted_record_strategy() -> impl Strategy<Value = ExtractedRecord> {
    (
        prop::option::of("[A-Za-z ]{0,20}"),
        prop::option::of("[A-Za-z ]{0,20}"),
        prop::option::of("[A-Za-z ,]{0,30}"),
        prop::option::of(amount_strategy()),
        prop::collection::vec(0.0f64..=1.0, 4),
    )
        .prop_map(|(patient_name, diagnosis, treatment_details, claim_amount, confidences)| ExtractedRecord {
            patient_name,
            diagnosis,
            treatment_details,
            claim_amount,
            confidence: fields::REQUIRED
                .iter()
                .zip(confidences)
                .map(|(field, c)| (field.to_string(), c))
                .collect(),
            ..Default::default()
        })
}
