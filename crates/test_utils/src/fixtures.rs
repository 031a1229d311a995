//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data mirroring the demo accounts and the
//! seeded policy table. These fixtures are consistent and predictable.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::{FixedClock, UserId};
use domain_claims::{FraudFlag, FraudFlagType, Severity};
use domain_party::User;
use domain_policy::{PolicyRecord, PolicyVerification};
use rust_decimal_macros::dec;
use std::sync::Arc;

/// Fixture for portal users
pub struct UserFixtures;

impl UserFixtures {
    /// Parses a user id token
    pub fn id(token: &str) -> UserId {
        UserId::parse(token).expect("fixture user ids are non-blank")
    }

    /// John Patient, id 1, holder of POL-123456
    pub fn patient() -> User {
        User::patient(Self::id("1"), "John Patient", "patient@example.com", "POL-123456")
    }

    /// City Hospital, id 2
    pub fn hospital() -> User {
        User::hospital(Self::id("2"), "City Hospital", "hospital@example.com", "City General Hospital")
    }

    /// Admin User, id 3
    pub fn admin() -> User {
        User::admin(Self::id("3"), "Admin User", "admin@example.com")
    }

    /// Alice Roberts, id 4, a patient with no policy on file
    pub fn other_patient() -> User {
        User::patient(Self::id("4"), "Alice Roberts", "alice@example.com", "POL-654321")
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// A morning while the seeded policy is in force (Apr 10, 2025)
    pub fn while_covered() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 10, 9, 30, 0).unwrap()
    }

    /// A day after the seeded policy expired (Jan 15, 2026)
    pub fn after_expiry() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    /// A clock frozen at [`TemporalFixtures::while_covered`]
    pub fn covered_clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::new(Self::while_covered()))
    }

    /// A clock frozen at [`TemporalFixtures::after_expiry`]
    pub fn expired_clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::new(Self::after_expiry()))
    }
}

/// Fixture for policy data
pub struct PolicyFixtures;

impl PolicyFixtures {
    /// POL-123456: limit 5000, 750 used, expires Dec 31, 2025
    pub fn standard() -> PolicyRecord {
        PolicyRecord {
            policy_number: "POL-123456".to_string(),
            expiration_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            coverage_limit: dec!(5000),
            used_coverage: dec!(750),
            excluded_treatments: vec![
                "cosmetic surgery".to_string(),
                "experimental treatments".to_string(),
            ],
        }
    }

    /// A verification where every check passed
    pub fn compliant() -> PolicyVerification {
        PolicyVerification::compliant(Some(dec!(4250)))
    }

    /// A verification of a lapsed but otherwise valid policy
    pub fn expired() -> PolicyVerification {
        PolicyVerification {
            is_compliant: false,
            is_policy_current: false,
            is_treatment_covered: true,
            is_within_claim_limit: true,
            remaining_coverage: Some(dec!(4250)),
            issues: Some(vec!["Policy expired on 2025-12-31".to_string()]),
        }
    }
}

/// Fixture for fraud flags
pub struct FlagFixtures;

impl FlagFixtures {
    pub fn high_amount() -> FraudFlag {
        FraudFlag::new(
            FraudFlagType::HighAmount,
            "Claim amount is unusually high for this diagnosis",
            Severity::Medium,
        )
    }

    pub fn repeated_claim() -> FraudFlag {
        FraudFlag::new(
            FraudFlagType::RepeatedClaim,
            "A claim for the same treatment was filed this week",
            Severity::High,
        )
    }
}
