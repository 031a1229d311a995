//! Fraud screening
//!
//! Three independent rules run over every extracted record:
//!
//! | Rule | Flag | Severity |
//! |---|---|---|
//! | amount above [`HIGH_AMOUNT_THRESHOLD`] | `high_amount` | medium |
//! | any required field absent, empty or zero | one `missing_info` | low |
//! | required field confidence below [`LOW_CONFIDENCE_THRESHOLD`] | `low_confidence` per field | low |
//!
//! Only the high-amount rule marks a claim as suspected fraud; the other
//! flags route the claim to a reviewer through adjudication.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use core_kernel::{DomainPort, PortError, SimulatedLatency};

use crate::intake::{fields, ExtractedRecord};

/// Amounts strictly above this raise a `high_amount` flag
pub const HIGH_AMOUNT_THRESHOLD: Decimal = Decimal::ONE_THOUSAND;

/// Confidences strictly below this raise a `low_confidence` flag
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Kind of fraud finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudFlagType {
    RepeatedClaim,
    HighAmount,
    MismatchedData,
    MissingInfo,
    LowConfidence,
}

impl FraudFlagType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FraudFlagType::RepeatedClaim => "repeated_claim",
            FraudFlagType::HighAmount => "high_amount",
            FraudFlagType::MismatchedData => "mismatched_data",
            FraudFlagType::MissingInfo => "missing_info",
            FraudFlagType::LowConfidence => "low_confidence",
        }
    }
}

impl fmt::Display for FraudFlagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a fraud finding, ordered low to high
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A single fraud finding on a claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudFlag {
    #[serde(rename = "type")]
    pub flag_type: FraudFlagType,
    pub description: String,
    pub severity: Severity,
}

impl FraudFlag {
    pub fn new(flag_type: FraudFlagType, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            flag_type,
            description: description.into(),
            severity,
        }
    }
}

/// Outcome of screening one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudScreening {
    pub is_fraud_suspected: bool,
    #[serde(rename = "fraudFlags")]
    pub flags: Vec<FraudFlag>,
}

impl FraudScreening {
    /// Wraps flags, suspecting fraud when any of them is a high-amount flag
    pub fn from_flags(flags: Vec<FraudFlag>) -> Self {
        Self {
            is_fraud_suspected: flags.iter().any(|f| f.flag_type == FraudFlagType::HighAmount),
            flags,
        }
    }
}

/// Runs every screening rule over a record
pub fn screen_record(record: &ExtractedRecord) -> Vec<FraudFlag> {
    let mut flags = Vec::new();

    if record.claim_amount.is_some_and(|amount| amount > HIGH_AMOUNT_THRESHOLD) {
        flags.push(FraudFlag::new(
            FraudFlagType::HighAmount,
            "Claim amount is unusually high for this diagnosis",
            Severity::Medium,
        ));
    }

    let missing: Vec<&str> = fields::REQUIRED
        .into_iter()
        .filter(|field| record.is_missing(field))
        .collect();
    if !missing.is_empty() {
        flags.push(FraudFlag::new(
            FraudFlagType::MissingInfo,
            format!("Missing required information: {}", missing.join(", ")),
            Severity::Low,
        ));
    }

    for field in fields::REQUIRED {
        match record.confidence_of(field) {
            Some(confidence) if confidence < LOW_CONFIDENCE_THRESHOLD => {
                flags.push(FraudFlag::new(
                    FraudFlagType::LowConfidence,
                    format!(
                        "Low confidence in extracted {} ({}%)",
                        field,
                        (confidence * 100.0).round() as i64
                    ),
                    Severity::Low,
                ));
            }
            _ => {}
        }
    }

    flags
}

/// Port for screening extracted claim data for fraud indicators
#[async_trait]
pub trait FraudScreeningPort: DomainPort {
    async fn screen(&self, record: &ExtractedRecord) -> Result<FraudScreening, PortError>;
}

/// Applies [`screen_record`] after a simulated analysis delay
#[derive(Debug, Clone, Default)]
pub struct RuleBasedFraudScreener {
    latency: SimulatedLatency,
}

impl RuleBasedFraudScreener {
    pub fn new(latency: SimulatedLatency) -> Self {
        Self { latency }
    }
}

impl DomainPort for RuleBasedFraudScreener {}

#[async_trait]
impl FraudScreeningPort for RuleBasedFraudScreener {
    async fn screen(&self, record: &ExtractedRecord) -> Result<FraudScreening, PortError> {
        self.latency.wait().await;

        let screening = FraudScreening::from_flags(screen_record(record));
        debug!(
            flags = screening.flags.len(),
            suspected = screening.is_fraud_suspected,
            "Fraud screening complete"
        );
        Ok(screening)
    }
}
