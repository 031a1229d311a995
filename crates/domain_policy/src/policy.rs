//! Patient policy records

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The coverage terms of one patient's policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRecord {
    /// Policy number printed on the member card
    pub policy_number: String,
    /// Last calendar day of cover; the policy lapses at the start of this day
    pub expiration_date: NaiveDate,
    /// Total amount the policy pays out over its term
    pub coverage_limit: Decimal,
    /// Amount already paid out
    pub used_coverage: Decimal,
    /// Treatments the policy never pays for, matched as substrings
    pub excluded_treatments: Vec<String>,
}

impl PolicyRecord {
    /// Coverage left before the limit is reached
    pub fn remaining_coverage(&self) -> Decimal {
        self.coverage_limit - self.used_coverage
    }

    /// Returns the first excluded treatment mentioned in `diagnosis`, ignoring case
    pub fn matching_exclusion(&self, diagnosis: &str) -> Option<&str> {
        let diagnosis = diagnosis.to_lowercase();
        self.excluded_treatments
            .iter()
            .find(|excluded| diagnosis.contains(&excluded.to_lowercase()))
            .map(String::as_str)
    }
}
