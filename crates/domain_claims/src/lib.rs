//! Claims Domain
//!
//! This crate implements the claim lifecycle from document upload through
//! automatic adjudication and manual review.
//!
//! # Claim Lifecycle
//!
//! ```text
//! upload -> intake -> fraud screen ─┐
//!                  -> policy check ─┴-> adjudication -> stored
//!                                                          │
//!                        admin override / comments <───────┘
//! ```
//!
//! The adjudication engine only ever moves a claim out of `pending`; after
//! that, status changes are made by admins.

pub mod claim;
pub mod intake;
pub mod fraud;
pub mod adjudication;
pub mod ports;
pub mod locks;
pub mod services;
pub mod summary;
pub mod error;

pub use claim::{AppliedUpdate, Claim, ClaimComment, ClaimStatus, ClaimUpdate, AUTO_PROCESSOR_NAME};
pub use intake::{DocumentProcessor, DocumentUpload, ExtractedRecord, SimulatedOcrProcessor};
pub use fraud::{
    screen_record, FraudFlag, FraudFlagType, FraudScreening, FraudScreeningPort, RuleBasedFraudScreener,
    Severity,
};
pub use adjudication::{decide, decide_for, has_policy_issues, AdjudicationOutcome};
pub use ports::{ClaimStore, InMemoryClaimStore};
pub use locks::ClaimLocks;
pub use services::{ClaimSubmission, ClaimsService, UNKNOWN_HOSPITAL};
pub use summary::ClaimSummary;
pub use error::ClaimError;
