//! Document intake
//!
//! An uploaded medical document is turned into an [`ExtractedRecord`] by a
//! [`DocumentProcessor`]. The shipped [`SimulatedOcrProcessor`] does not read
//! the document: it returns one of a few canned records chosen by a keyword
//! in the file name, after an artificial processing delay.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use core_kernel::{DomainPort, PortError, SimulatedLatency};

/// Field names used as keys of the confidence map and the extracted-data map
pub mod fields {
    pub const PATIENT_NAME: &str = "patientName";
    pub const PATIENT_ID: &str = "patientId";
    pub const HOSPITAL_NAME: &str = "hospitalName";
    pub const DIAGNOSIS: &str = "diagnosis";
    pub const DIAGNOSIS_CODE: &str = "diagnosisCode";
    pub const TREATMENT_DETAILS: &str = "treatmentDetails";
    pub const CLAIM_AMOUNT: &str = "claimAmount";
    pub const SERVICE_DATE: &str = "serviceDate";

    /// Fields a claim cannot be assessed without, in reporting order
    pub const REQUIRED: [&str; 4] = [PATIENT_NAME, DIAGNOSIS, TREATMENT_DETAILS, CLAIM_AMOUNT];
}

/// An uploaded supporting document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub file_name: String,
    pub size_bytes: u64,
}

impl DocumentUpload {
    pub fn new(file_name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            size_bytes,
        }
    }

    /// A document known only by name
    pub fn named(file_name: impl Into<String>) -> Self {
        Self::new(file_name, 0)
    }
}

/// Claim data read from a document, with a confidence per field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_date: Option<NaiveDate>,
    /// Field name -> confidence in 0.0..=1.0
    pub confidence: BTreeMap<String, f64>,
}

impl ExtractedRecord {
    pub fn confidence_of(&self, field: &str) -> Option<f64> {
        self.confidence.get(field).copied()
    }

    /// Whether a field is absent, empty or zero
    pub fn is_missing(&self, field: &str) -> bool {
        match field {
            fields::PATIENT_NAME => blank(&self.patient_name),
            fields::DIAGNOSIS => blank(&self.diagnosis),
            fields::TREATMENT_DETAILS => blank(&self.treatment_details),
            fields::CLAIM_AMOUNT => self.claim_amount.map_or(true, |amount| amount.is_zero()),
            fields::PATIENT_ID => blank(&self.patient_id),
            fields::HOSPITAL_NAME => blank(&self.hospital_name),
            fields::DIAGNOSIS_CODE => blank(&self.diagnosis_code),
            fields::SERVICE_DATE => self.service_date.is_none(),
            _ => true,
        }
    }

    /// The present field values as strings, keyed by field name
    pub fn to_field_map(&self) -> BTreeMap<String, String> {
        let text_fields = [
            (fields::PATIENT_NAME, &self.patient_name),
            (fields::PATIENT_ID, &self.patient_id),
            (fields::HOSPITAL_NAME, &self.hospital_name),
            (fields::DIAGNOSIS, &self.diagnosis),
            (fields::DIAGNOSIS_CODE, &self.diagnosis_code),
            (fields::TREATMENT_DETAILS, &self.treatment_details),
        ];

        let mut map: BTreeMap<String, String> = text_fields
            .into_iter()
            .filter_map(|(name, value)| value.as_ref().map(|v| (name.to_string(), v.clone())))
            .collect();
        if let Some(amount) = self.claim_amount {
            map.insert(fields::CLAIM_AMOUNT.to_string(), amount.to_string());
        }
        if let Some(date) = self.service_date {
            map.insert(fields::SERVICE_DATE.to_string(), date.format("%Y-%m-%d").to_string());
        }
        map
    }
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

/// Port for extracting claim data from an uploaded document
#[async_trait]
pub trait DocumentProcessor: DomainPort {
    async fn extract(&self, document: &DocumentUpload) -> Result<ExtractedRecord, PortError>;
}

/// Returns canned records instead of reading documents
///
/// | file name contains | record |
/// |---|---|
/// | `sharma` | Amit Sharma, hypertension, 200.00 |
/// | `kumar` | Raj Kumar, type 2 diabetes, 350.00 |
/// | `kishore` | Vinod Kishore, back pain, 150.00, low confidence |
/// | anything else | John Patient, acute bronchitis, 450.00 |
#[derive(Debug, Clone, Default)]
pub struct SimulatedOcrProcessor {
    latency: SimulatedLatency,
}

impl SimulatedOcrProcessor {
    pub fn new(latency: SimulatedLatency) -> Self {
        Self { latency }
    }

    /// The canned record for a file name
    pub fn record_for(file_name: &str) -> ExtractedRecord {
        let name = file_name.to_lowercase();
        if name.contains("sharma") {
            sharma_record()
        } else if name.contains("kumar") {
            kumar_record()
        } else if name.contains("kishore") {
            kishore_record()
        } else {
            default_record()
        }
    }
}

impl DomainPort for SimulatedOcrProcessor {}

#[async_trait]
impl DocumentProcessor for SimulatedOcrProcessor {
    async fn extract(&self, document: &DocumentUpload) -> Result<ExtractedRecord, PortError> {
        if document.file_name.trim().is_empty() {
            return Err(PortError::validation_field("Document has no file name", "file_name"));
        }

        self.latency.wait().await;
        let record = Self::record_for(&document.file_name);
        debug!(
            file_name = %document.file_name,
            size_bytes = document.size_bytes,
            patient = record.patient_name.as_deref().unwrap_or_default(),
            "Extracted claim data from document"
        );
        Ok(record)
    }
}

#[allow(clippy::too_many_arguments)]
fn record(
    patient_name: &str,
    patient_id: &str,
    hospital_name: &str,
    diagnosis: &str,
    diagnosis_code: &str,
    treatment_details: &str,
    claim_amount: Decimal,
    service_date: (i32, u32, u32),
    confidence: [f64; 8],
) -> ExtractedRecord {
    let names = [
        fields::PATIENT_NAME,
        fields::PATIENT_ID,
        fields::HOSPITAL_NAME,
        fields::DIAGNOSIS,
        fields::DIAGNOSIS_CODE,
        fields::TREATMENT_DETAILS,
        fields::CLAIM_AMOUNT,
        fields::SERVICE_DATE,
    ];
    let (year, month, day) = service_date;

    ExtractedRecord {
        patient_name: Some(patient_name.to_string()),
        patient_id: Some(patient_id.to_string()),
        hospital_name: Some(hospital_name.to_string()),
        diagnosis: Some(diagnosis.to_string()),
        diagnosis_code: Some(diagnosis_code.to_string()),
        treatment_details: Some(treatment_details.to_string()),
        claim_amount: Some(claim_amount),
        service_date: NaiveDate::from_ymd_opt(year, month, day),
        confidence: names
            .into_iter()
            .zip(confidence)
            .map(|(name, c)| (name.to_string(), c))
            .collect(),
    }
}

fn sharma_record() -> ExtractedRecord {
    record(
        "Amit Sharma",
        "2",
        "Apollo Clinic",
        "Hypertension",
        "I10",
        "BP Monitoring, ECG, Prescription for Amlodipine",
        dec!(200.00),
        (2025, 4, 5),
        [0.97, 0.96, 0.91, 0.93, 0.95, 0.89, 0.94, 0.98],
    )
}

fn kumar_record() -> ExtractedRecord {
    record(
        "Raj Kumar",
        "3",
        "Sunrise Health Center",
        "Type 2 Diabetes",
        "E11",
        "Blood Sugar Test, Consultation, Metformin",
        dec!(350.00),
        (2025, 4, 3),
        [0.96, 0.95, 0.92, 0.94, 0.93, 0.90, 0.91, 0.95],
    )
}

fn kishore_record() -> ExtractedRecord {
    record(
        "Vinod Kishore",
        "4",
        "Noble Health",
        "Back Pain",
        "M54.5",
        "Consultation, Painkillers",
        dec!(150.00),
        (2025, 4, 9),
        [0.82, 0.80, 0.78, 0.74, 0.75, 0.70, 0.76, 0.79],
    )
}

fn default_record() -> ExtractedRecord {
    record(
        "John Patient",
        "1",
        "City General Hospital",
        "Acute bronchitis",
        "J20.9",
        "Chest X-ray, Consultation, Antibiotics",
        dec!(450.00),
        (2025, 4, 8),
        [0.95, 0.94, 0.92, 0.91, 0.90, 0.88, 0.93, 0.96],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_selected_by_keyword_ignoring_case() {
        assert_eq!(SimulatedOcrProcessor::record_for("Scan_SHARMA.pdf").patient_name.as_deref(), Some("Amit Sharma"));
        assert_eq!(SimulatedOcrProcessor::record_for("kumar-invoice.png").patient_id.as_deref(), Some("3"));
        assert_eq!(SimulatedOcrProcessor::record_for("receipt.jpg").patient_name.as_deref(), Some("John Patient"));
    }

    #[test]
    fn test_field_map_holds_present_values_only() {
        let mut record = SimulatedOcrProcessor::record_for("kishore.pdf");
        record.service_date = None;
        let map = record.to_field_map();

        assert_eq!(map.get(fields::CLAIM_AMOUNT).map(String::as_str), Some("150.00"));
        assert_eq!(map.get(fields::DIAGNOSIS_CODE).map(String::as_str), Some("M54.5"));
        assert!(!map.contains_key(fields::SERVICE_DATE));
        assert!(!map.contains_key("confidence"));
    }

    #[test]
    fn test_zero_amount_and_empty_text_count_as_missing() {
        let record = ExtractedRecord {
            patient_name: Some(String::new()),
            claim_amount: Some(Decimal::ZERO),
            diagnosis: Some("Flu".to_string()),
            ..Default::default()
        };

        assert!(record.is_missing(fields::PATIENT_NAME));
        assert!(record.is_missing(fields::CLAIM_AMOUNT));
        assert!(record.is_missing(fields::TREATMENT_DETAILS));
        assert!(!record.is_missing(fields::DIAGNOSIS));
    }

    #[tokio::test]
    async fn test_blank_file_name_is_rejected() {
        let processor = SimulatedOcrProcessor::default();
        let result = processor.extract(&DocumentUpload::named("  ")).await;
        assert!(matches!(result, Err(PortError::Validation { .. })));
    }
}
