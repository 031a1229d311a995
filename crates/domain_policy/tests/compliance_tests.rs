//! Tests for policy compliance verification

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::FixedClock;
use domain_policy::{
    verify_compliance, PolicyRecord, PolicyRegistryVerifier, PolicyVerification,
    PolicyVerificationPort, POLICY_NOT_FOUND,
};
use test_utils::{PolicyFixtures, TemporalFixtures, UserFixtures};

fn record() -> PolicyRecord {
    PolicyFixtures::standard()
}

fn before_expiry() -> chrono::DateTime<Utc> {
    TemporalFixtures::while_covered()
}

mod verify_compliance_tests {
    use super::*;

    #[test]
    fn test_fully_compliant() {
        let result = verify_compliance(Some(&record()), "Asthma, unspecified", dec!(750), before_expiry());

        assert!(result.is_compliant);
        assert!(!result.has_issues());
        assert_eq!(result.remaining_coverage, Some(dec!(4250)));
        assert!(result.issues.is_none());
    }

    #[test]
    fn test_unknown_patient() {
        let result = verify_compliance(None, "Cosmetic surgery", dec!(99999), before_expiry());

        assert_eq!(result, PolicyVerification::not_found());
        assert!(!result.is_policy_current);
        assert!(!result.is_treatment_covered);
        assert!(!result.is_within_claim_limit);
        assert_eq!(result.issues(), &[POLICY_NOT_FOUND.to_string()]);
        assert!(result.remaining_coverage.is_none());
    }

    #[test]
    fn test_expired_policy() {
        let result = verify_compliance(Some(&record()), "Asthma", dec!(100), TemporalFixtures::after_expiry());

        assert!(!result.is_policy_current);
        assert!(result.is_treatment_covered);
        assert!(!result.is_compliant);
        assert_eq!(result.issues(), &["Policy expired on 2025-12-31".to_string()]);
        assert_eq!(result, PolicyFixtures::expired());
    }

    #[test]
    fn test_expiry_day_itself_is_not_current() {
        let midnight = Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap();
        let result = verify_compliance(Some(&record()), "Asthma", dec!(100), midnight);
        assert!(!result.is_policy_current);

        let just_before = Utc.with_ymd_and_hms(2025, 12, 30, 23, 59, 59).unwrap();
        let result = verify_compliance(Some(&record()), "Asthma", dec!(100), just_before);
        assert!(result.is_policy_current);
    }

    #[test]
    fn test_excluded_treatment_case_insensitive() {
        let result = verify_compliance(
            Some(&record()),
            "Follow-up after COSMETIC SURGERY",
            dec!(100),
            before_expiry(),
        );

        assert!(!result.is_treatment_covered);
        assert_eq!(
            result.issues(),
            &["This treatment is excluded from policy coverage".to_string()]
        );
    }

    #[test]
    fn test_exceeds_remaining_coverage() {
        let result = verify_compliance(Some(&record()), "Asthma", dec!(4250.01), before_expiry());

        assert!(!result.is_within_claim_limit);
        assert_eq!(
            result.issues(),
            &["Claim exceeds remaining coverage (4250.00)".to_string()]
        );
    }

    #[test]
    fn test_exactly_remaining_coverage_is_within_limit() {
        let result = verify_compliance(Some(&record()), "Asthma", dec!(4250), before_expiry());
        assert!(result.is_within_claim_limit);
    }

    #[test]
    fn test_all_checks_fail_independently() {
        let after = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let result = verify_compliance(Some(&record()), "experimental treatments", dec!(10000), after);

        assert_eq!(result.issues().len(), 3);
        assert!(!result.is_compliant);
    }

    #[test]
    fn test_json_uses_camel_case_and_omits_absent_issues() {
        let json = serde_json::to_value(PolicyFixtures::compliant()).unwrap();
        assert_eq!(json["isPolicyCurrent"], serde_json::json!(true));
        assert!(json.get("issues").is_none());
    }

    proptest! {
        #[test]
        fn test_compliant_iff_no_issues(
            amount in 0i64..1_000_000,
            days_offset in -400i64..400,
            excluded in any::<bool>(),
        ) {
            let now = before_expiry() + chrono::Duration::days(days_offset);
            let diagnosis = if excluded { "cosmetic surgery" } else { "Hypertension" };
            let result = verify_compliance(Some(&record()), diagnosis, Decimal::new(amount, 2), now);

            prop_assert_eq!(
                result.is_compliant,
                result.is_policy_current && result.is_treatment_covered && result.is_within_claim_limit
            );
            prop_assert_eq!(result.is_compliant, result.issues.is_none());
            prop_assert_eq!(result.has_issues(), !result.is_compliant);
        }

        #[test]
        fn test_unknown_patient_ignores_inputs(amount in 0i64..10_000_000, diagnosis in ".{0,40}") {
            let result = verify_compliance(None, &diagnosis, Decimal::new(amount, 2), before_expiry());
            prop_assert_eq!(result, PolicyVerification::not_found());
        }
    }
}

mod registry_tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_registry_knows_patient_one() {
        let verifier = PolicyRegistryVerifier::seeded().with_clock(TemporalFixtures::covered_clock());

        let result = verifier.verify_policy(&UserFixtures::id("1"), "Asthma", dec!(200)).await.unwrap();
        assert!(result.is_compliant);

        let result = verifier.verify_policy(&UserFixtures::id("42"), "Asthma", dec!(200)).await.unwrap();
        assert_eq!(result.issues(), &[POLICY_NOT_FOUND.to_string()]);
    }

    #[tokio::test]
    async fn test_lapsed_policy_after_expiry() {
        let verifier = PolicyRegistryVerifier::seeded().with_clock(TemporalFixtures::expired_clock());

        let result = verifier.verify_policy(&UserFixtures::id("1"), "Asthma", dec!(100)).await.unwrap();
        assert_eq!(result, PolicyFixtures::expired());
    }

    #[tokio::test]
    async fn test_registry_uses_injected_clock() {
        let clock = std::sync::Arc::new(FixedClock::at_date(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()));
        let verifier = PolicyRegistryVerifier::seeded().with_clock(clock);

        let result = verifier.verify_policy(&UserFixtures::id("1"), "Asthma", dec!(200)).await.unwrap();
        assert!(!result.is_policy_current);
    }
}
