//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use domain_claims::{Claim, ClaimStatus, FraudFlag, FraudFlagType, AUTO_PROCESSOR_NAME};

use crate::notify::RecordingNotifier;

/// Asserts that a claim has the expected status
pub fn assert_status(claim: &Claim, expected: ClaimStatus) {
    assert_eq!(
        claim.status, expected,
        "Claim {} has status {}, expected {}",
        claim.id, claim.status, expected
    );
}

/// Asserts that exactly one flag of the given type is present and returns it
pub fn assert_single_flag(flags: &[FraudFlag], flag_type: FraudFlagType) -> &FraudFlag {
    let matching: Vec<&FraudFlag> = flags.iter().filter(|f| f.flag_type == flag_type).collect();
    assert_eq!(
        matching.len(),
        1,
        "Expected exactly one {} flag, found {}: {:?}",
        flag_type,
        matching.len(),
        flags
    );
    matching[0]
}

/// Asserts that the newest comment was written by the adjudication engine
/// and recommends `status`
pub fn assert_auto_processed(claim: &Claim, status: ClaimStatus) {
    let comment = claim
        .comments
        .last()
        .unwrap_or_else(|| panic!("Claim {} has no comments", claim.id));
    assert_eq!(comment.author_name, AUTO_PROCESSOR_NAME, "Last comment was not written by the engine");
    assert_eq!(
        comment.text,
        format!("Claim automatically processed. Recommended status: {}.", status.label())
    );
}

/// Asserts that a notification with the given title was delivered
pub fn assert_notified(notifier: &RecordingNotifier, title: &str) {
    let titles = notifier.titles();
    assert!(
        titles.iter().any(|t| t == title),
        "Expected a notification titled {:?}, got {:?}",
        title,
        titles
    );
}
