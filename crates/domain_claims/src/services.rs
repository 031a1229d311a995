//! Claims domain services
//!
//! [`ClaimsService`] orchestrates the claim lifecycle across the intake,
//! fraud screening, policy verification and storage ports, and enforces the
//! role rules for who may see and change a claim.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, warn};

use core_kernel::{ClaimId, Clock, Notification, Notifier, SystemClock, UserId};
use domain_party::{Role, User};
use domain_policy::PolicyVerificationPort;

use crate::adjudication::{auto_process_comment, decide_for, AdjudicationOutcome};
use crate::claim::{Claim, ClaimComment, ClaimStatus, ClaimUpdate};
use crate::error::ClaimError;
use crate::fraud::FraudScreeningPort;
use crate::intake::{DocumentProcessor, DocumentUpload, ExtractedRecord};
use crate::locks::ClaimLocks;
use crate::ports::ClaimStore;

/// Hospital name used when neither the document nor the submitter names one
pub const UNKNOWN_HOSPITAL: &str = "Unknown Hospital";

/// A claim as submitted through the upload form
///
/// Form values are fallbacks; whatever intake reads from the document wins.
#[derive(Debug, Clone, Default)]
pub struct ClaimSubmission {
    pub document: Option<DocumentUpload>,
    /// The patient the claim is for; defaults to the submitter
    pub patient_id: Option<UserId>,
    pub patient_name: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment_details: Option<String>,
    pub claim_amount: Option<Decimal>,
}

impl ClaimSubmission {
    pub fn with_document(document: DocumentUpload) -> Self {
        Self {
            document: Some(document),
            ..Default::default()
        }
    }

    pub fn for_patient(mut self, patient_id: UserId) -> Self {
        self.patient_id = Some(patient_id);
        self
    }
}

/// Service for submitting, adjudicating and reviewing claims
pub struct ClaimsService {
    store: Arc<dyn ClaimStore>,
    documents: Arc<dyn DocumentProcessor>,
    fraud: Arc<dyn FraudScreeningPort>,
    policies: Arc<dyn PolicyVerificationPort>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    locks: ClaimLocks,
}

impl ClaimsService {
    /// Creates a new claims service using the system clock
    pub fn new(
        store: Arc<dyn ClaimStore>,
        documents: Arc<dyn DocumentProcessor>,
        fraud: Arc<dyn FraudScreeningPort>,
        policies: Arc<dyn PolicyVerificationPort>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            documents,
            fraud,
            policies,
            notifier,
            clock: Arc::new(SystemClock),
            locks: ClaimLocks::new(),
        }
    }

    /// Replaces the clock used for timestamps
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Submits a new claim from an uploaded document
    ///
    /// This method:
    /// 1. Validates that a document was uploaded
    /// 2. Resolves the patient the claim is for
    /// 3. Extracts claim data from the document
    /// 4. Screens the extracted data for fraud
    /// 5. Verifies the claim against the patient's policy
    /// 6. Builds the claim and runs the adjudication engine on it
    /// 7. Stores the adjudicated claim
    ///
    /// Nothing is stored unless every step succeeds.
    ///
    /// # Arguments
    ///
    /// * `actor` - The signed-in user submitting the claim
    /// * `submission` - Uploaded document and form fallbacks
    ///
    /// # Returns
    ///
    /// The stored claim, already carrying the engine's decision and comment
    ///
    /// # Errors
    ///
    /// `Validation` without a document or with a negative form amount,
    /// `PermissionDenied` when a patient submits for someone else, `Port`
    /// when any adapter fails.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let submission = ClaimSubmission::with_document(DocumentUpload::named("sharma.pdf"));
    /// let claim = service.submit_claim(&patient, submission).await?;
    /// println!("{} is {}", claim.id, claim.status.label());
    /// ```
    pub async fn submit_claim(&self, actor: &User, submission: ClaimSubmission) -> Result<Claim, ClaimError> {
        let document = match &submission.document {
            Some(document) if !document.file_name.trim().is_empty() => document.clone(),
            _ => {
                self.notifier.notify(Notification::destructive(
                    "Document Required",
                    "Please upload a medical document",
                ));
                return Err(ClaimError::validation("A medical document is required"));
            }
        };

        if submission.claim_amount.is_some_and(|amount| amount < Decimal::ZERO) {
            self.notifier.notify(Notification::destructive(
                "Invalid claim amount",
                "The claim amount cannot be negative",
            ));
            return Err(ClaimError::validation("Claim amount must not be negative"));
        }

        match self.intake(actor, document, submission).await {
            Ok(claim) => {
                info!(
                    claim_id = %claim.id,
                    patient_id = %claim.patient_id,
                    amount = %claim.claim_amount,
                    status = %claim.status,
                    "Claim submitted"
                );
                self.notifier.notify(Notification::info(
                    "Claim submitted successfully",
                    format!("Claim ID: {} has been automatically processed.", claim.id),
                ));
                Ok(claim)
            }
            Err(e) => {
                warn!(actor_id = %actor.id, error = %e, "Claim submission failed");
                self.notifier.notify(Notification::destructive(
                    "Claim submission failed",
                    "An error occurred while processing your claim",
                ));
                Err(e)
            }
        }
    }

    async fn intake(&self, actor: &User, document: DocumentUpload, submission: ClaimSubmission) -> Result<Claim, ClaimError> {
        let patient_id = submission.patient_id.clone().unwrap_or_else(|| actor.id.clone());
        if actor.role == Role::Patient && patient_id != actor.id {
            return Err(ClaimError::permission_denied("Patients can only submit claims for themselves"));
        }

        let record = self.documents.extract(&document).await?;
        let screening = self.fraud.screen(&record).await?;
        let verification = self
            .policies
            .verify_policy(
                &patient_id,
                record.diagnosis.as_deref().unwrap_or_default(),
                record.claim_amount.unwrap_or_default(),
            )
            .await?;

        let now = self.clock.now();
        let mut claim = build_claim(actor, patient_id, &document, &record, submission, now);
        claim.fraud_flags = Some(screening.flags);
        claim.policy_verification = Some(verification);

        let recommended = decide_for(&claim);
        auto_process_update(recommended, now).apply(&mut claim);
        debug!(claim_id = %claim.id, recommended = %recommended, "Adjudicated new claim before storing");

        self.store.insert(claim.clone()).await?;
        Ok(claim)
    }

    /// Runs the adjudication engine on a stored claim
    ///
    /// Always appends the engine's audit comment and bumps the updated
    /// timestamp. The recommended status is written only while the claim is
    /// still pending, so running the engine again never changes a decided
    /// claim.
    ///
    /// # Returns
    ///
    /// The recommended status, whether or not it was applied
    pub async fn auto_process_claim(&self, claim_id: &ClaimId) -> Result<ClaimStatus, ClaimError> {
        Ok(self.adjudicate(claim_id).await?.recommended)
    }

    /// Runs the adjudication engine on every pending claim
    pub async fn auto_process_pending(&self, actor: &User) -> Result<Vec<AdjudicationOutcome>, ClaimError> {
        self.require_admin(actor, "Only admins can auto-process claims")?;

        let pending: Vec<ClaimId> = self
            .store
            .list()
            .await?
            .into_iter()
            .filter(|c| c.status == ClaimStatus::Pending)
            .map(|c| c.id)
            .collect();

        let mut outcomes = Vec::with_capacity(pending.len());
        for claim_id in &pending {
            outcomes.push(self.adjudicate(claim_id).await?);
        }

        info!(admin_id = %actor.id, processed = outcomes.len(), "Auto-processed pending claims");
        self.notifier.notify(Notification::info(
            "Auto-processing completed",
            format!("{} claims have been automatically processed", outcomes.len()),
        ));
        Ok(outcomes)
    }

    async fn adjudicate(&self, claim_id: &ClaimId) -> Result<AdjudicationOutcome, ClaimError> {
        let _guard = self.locks.acquire(*claim_id).await;

        let claim = self.load(claim_id).await?;
        let recommended = decide_for(&claim);
        let applied = self
            .store
            .update(claim_id, auto_process_update(recommended, self.clock.now()))
            .await?;

        info!(
            claim_id = %claim_id,
            recommended = %recommended,
            applied = applied.status_applied,
            status = %applied.claim.status,
            "Claim auto-processed"
        );
        Ok(AdjudicationOutcome {
            claim_id: *claim_id,
            recommended,
            status_applied: applied.status_applied,
        })
    }

    /// Sets a claim's status by hand
    ///
    /// Admin only. The status is overwritten unconditionally and an audit
    /// comment recording the change is appended under the admin's name.
    pub async fn update_claim_status(&self, actor: &User, claim_id: &ClaimId, status: ClaimStatus) -> Result<Claim, ClaimError> {
        if let Err(e) = self.require_admin(actor, "Only admins can update claim status") {
            self.notifier.notify(Notification::destructive("Permission denied", "Only admins can update claim status"));
            return Err(e);
        }

        let _guard = self.locks.acquire(*claim_id).await;

        let previous = match self.load(claim_id).await {
            Ok(claim) => claim.status,
            Err(e) => {
                if matches!(e, ClaimError::NotFound(_)) {
                    self.notifier.notify(Notification::destructive("Error", "Claim not found"));
                }
                return Err(e);
            }
        };

        let now = self.clock.now();
        let comment = ClaimComment::by(
            actor,
            format!("Status changed from {} to {}.", previous.label(), status.label()),
            now,
        );
        let applied = self
            .store
            .update(claim_id, ClaimUpdate::at(now).with_status(status).with_comment(comment))
            .await?;

        info!(claim_id = %claim_id, admin_id = %actor.id, from = %previous, to = %status, "Claim status overridden");
        self.notifier.notify(Notification::info(
            "Status updated",
            format!("Claim status changed to {}", status.label()),
        ));
        Ok(applied.claim)
    }

    /// Sets the status of several claims at once
    ///
    /// Admin only. Each claim goes through [`ClaimsService::update_claim_status`],
    /// so every one gets its own audit comment. Stops at the first failure;
    /// claims updated before it keep their new status.
    pub async fn bulk_update_status(
        &self,
        actor: &User,
        claim_ids: &[ClaimId],
        status: ClaimStatus,
    ) -> Result<Vec<Claim>, ClaimError> {
        if let Err(e) = self.require_admin(actor, "Only admins can update claim status") {
            self.notifier.notify(Notification::destructive("Permission denied", "Only admins can update claim status"));
            return Err(e);
        }
        if claim_ids.is_empty() {
            self.notifier.notify(Notification::destructive(
                "No claims selected",
                "Please select at least one claim",
            ));
            return Err(ClaimError::validation("No claims selected"));
        }

        let mut updated = Vec::with_capacity(claim_ids.len());
        for claim_id in claim_ids {
            updated.push(self.update_claim_status(actor, claim_id, status).await?);
        }

        info!(admin_id = %actor.id, count = updated.len(), status = %status, "Bulk status update");
        self.notifier.notify(Notification::info(
            "Bulk action completed",
            format!("{} claims updated to {}", updated.len(), status.label()),
        ));
        Ok(updated)
    }

    /// Adds a comment to a claim the actor can see
    pub async fn add_comment(&self, actor: &User, claim_id: &ClaimId, text: &str) -> Result<Claim, ClaimError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ClaimError::validation("Comment text must not be empty"));
        }

        let claim = match self.claim_details(actor, claim_id).await {
            Ok(claim) => claim,
            Err(e) => {
                self.notifier.notify(Notification::destructive("Error", e.to_string()));
                return Err(e);
            }
        };

        let now = self.clock.now();
        let applied = self
            .store
            .update(&claim.id, ClaimUpdate::at(now).with_comment(ClaimComment::by(actor, text, now)))
            .await?;

        debug!(claim_id = %claim_id, author_id = %actor.id, "Comment added");
        self.notifier.notify(Notification::info("Comment added", "Your comment has been added to the claim"));
        Ok(applied.claim)
    }

    /// Claims the actor may see
    pub async fn claims_for(&self, actor: &User) -> Result<Vec<Claim>, ClaimError> {
        let claims = match actor.role {
            Role::Patient => self.store.find_by_patient(&actor.id).await?,
            Role::Hospital => self.store.find_by_hospital(&actor.id).await?,
            Role::Admin => self.store.list().await?,
        };
        Ok(claims)
    }

    /// A single claim, if the actor may see it
    pub async fn claim_details(&self, actor: &User, claim_id: &ClaimId) -> Result<Claim, ClaimError> {
        let claim = self.load(claim_id).await?;
        if !claim.is_visible_to(actor) {
            return Err(ClaimError::permission_denied("You do not have access to this claim"));
        }
        Ok(claim)
    }

    /// Claims awaiting a final decision
    pub async fn review_queue(&self, actor: &User) -> Result<Vec<Claim>, ClaimError> {
        self.require_admin(actor, "Only admins can review claims")?;
        Ok(self
            .store
            .list()
            .await?
            .into_iter()
            .filter(|c| c.status.is_open())
            .collect())
    }

    /// Flagged claims, most serious first
    pub async fn fraud_alerts(&self, actor: &User) -> Result<Vec<Claim>, ClaimError> {
        self.require_admin(actor, "Only admins can view fraud alerts")?;
        let mut flagged: Vec<Claim> = self
            .store
            .list()
            .await?
            .into_iter()
            .filter(Claim::is_flagged)
            .collect();
        flagged.sort_by(|a, b| b.highest_severity().cmp(&a.highest_severity()));
        Ok(flagged)
    }

    async fn load(&self, claim_id: &ClaimId) -> Result<Claim, ClaimError> {
        self.store.get(claim_id).await.map_err(|e| {
            if e.is_not_found() {
                ClaimError::NotFound(claim_id.to_string())
            } else {
                ClaimError::Port(e)
            }
        })
    }

    fn require_admin(&self, actor: &User, message: &str) -> Result<(), ClaimError> {
        if actor.is_admin() {
            Ok(())
        } else {
            warn!(actor_id = %actor.id, role = %actor.role, "{}", message);
            Err(ClaimError::permission_denied(message))
        }
    }
}

fn auto_process_update(recommended: ClaimStatus, now: DateTime<Utc>) -> ClaimUpdate {
    ClaimUpdate::at(now)
        .with_comment(ClaimComment::system(auto_process_comment(recommended), now))
        .with_status(recommended)
        .when_status(ClaimStatus::Pending)
}

fn build_claim(
    actor: &User,
    patient_id: UserId,
    document: &DocumentUpload,
    record: &ExtractedRecord,
    submission: ClaimSubmission,
    now: DateTime<Utc>,
) -> Claim {
    Claim {
        id: ClaimId::new_v7(),
        patient_id,
        patient_name: first_present(&record.patient_name, submission.patient_name),
        hospital_id: match actor.role {
            Role::Hospital => Some(actor.id.clone()),
            Role::Patient | Role::Admin => None,
        },
        hospital_name: non_empty(&record.hospital_name)
            .or_else(|| actor.hospital_name.clone())
            .unwrap_or_else(|| UNKNOWN_HOSPITAL.to_string()),
        diagnosis: first_present(&record.diagnosis, submission.diagnosis),
        diagnosis_code: non_empty(&record.diagnosis_code).unwrap_or_default(),
        treatment_details: first_present(&record.treatment_details, submission.treatment_details),
        document_names: vec![document.file_name.clone()],
        claim_amount: record
            .claim_amount
            .filter(|amount| !amount.is_zero())
            .or(submission.claim_amount)
            .unwrap_or_default(),
        status: ClaimStatus::Pending,
        submitted_at: now,
        updated_at: now,
        comments: Vec::new(),
        fraud_flags: None,
        policy_verification: None,
        extracted_data: Some(record.to_field_map()),
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

fn first_present(extracted: &Option<String>, fallback: Option<String>) -> String {
    non_empty(extracted).or(fallback).unwrap_or_default()
}
