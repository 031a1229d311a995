//! Ports and Adapters Infrastructure
//!
//! This module provides the foundational types for implementing the hexagonal
//! architecture (ports and adapters) pattern across all domain modules.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Application Layer                        │
//! │          (ClaimsService, UserDirectory, the binary)          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Port Traits                             │
//! │  (ClaimStore, DocumentProcessor, FraudScreeningPort,         │
//! │   PolicyVerificationPort, UserStore, Notifier)               │
//! └─────────────────────────────────────────────────────────────┘
//!                    ▲                         ▲
//!                    │                         │
//!         ┌─────────┴─────────┐     ┌────────┴────────┐
//!         │ In-memory adapter │     │ Snapshot adapter │
//!         │ / static tables   │     │  (infra_store)   │
//!         └───────────────────┘     └──────────────────┘
//! ```
//!
//! Each domain defines its own port trait extending [`DomainPort`]. Adapters
//! report failures through [`PortError`] so services can handle stores and
//! simulated external systems uniformly.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for port operations
///
/// Stores and the simulated intake, fraud and policy adapters all fail with
/// this type, so services map adapter failures in one place.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested record does not exist
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// The adapter refused its input
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// A record with the same identity already exists
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    /// The adapter could not be reached
    #[error("Adapter unavailable: {adapter}")]
    Unavailable {
        adapter: String,
    },

    /// Anything else, usually an I/O or encoding failure
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Validation error naming the offending field
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    pub fn unavailable(adapter: impl Into<String>) -> Self {
        PortError::Unavailable {
            adapter: adapter.into(),
        }
    }

    /// Creates an Internal error wrapping its cause
    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        PortError::Internal {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all domain ports
pub trait DomainPort: Send + Sync + 'static {}

/// Health status for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    Unhealthy,
}

/// Outcome of probing one adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub adapter_id: String,
    pub status: AdapterHealth,
    /// Record count or failure description
    pub message: Option<String>,
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckResult {
    pub fn healthy(adapter_id: impl Into<String>, message: Option<String>) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status: AdapterHealth::Healthy,
            message,
            checked_at: chrono::Utc::now(),
        }
    }

    /// Creates an unhealthy result describing the failure
    pub fn unhealthy(adapter_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status: AdapterHealth::Unhealthy,
            message: Some(message.into()),
            checked_at: chrono::Utc::now(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == AdapterHealth::Healthy
    }
}

/// Adapters that can report whether their backing state is reachable
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    async fn health_check(&self) -> HealthCheckResult;
}

/// Fixed artificial delay applied by simulated adapters
///
/// The intake, fraud and policy stand-ins have no real I/O; they sleep for
/// a configured duration so callers observe realistic latency. A zero
/// latency skips the sleep entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulatedLatency(Duration);

impl SimulatedLatency {
    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    pub fn none() -> Self {
        Self(Duration::ZERO)
    }

    pub fn duration(&self) -> Duration {
        self.0
    }

    /// Sleeps for the configured duration
    pub async fn wait(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let error = PortError::not_found("Claim", "CLM-123");
        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "Not found: Claim with id CLM-123");
    }

    #[test]
    fn test_unavailable_names_adapter() {
        let error = PortError::unavailable("fraud-screening");
        assert!(!error.is_not_found());
        assert!(error.to_string().contains("fraud-screening"));
    }

    #[test]
    fn test_unhealthy_result() {
        let result = HealthCheckResult::unhealthy("file-claim-store", "permission denied");
        assert!(!result.is_healthy());
        assert_eq!(result.message.as_deref(), Some("permission denied"));
    }

    #[test]
    fn test_latency_from_millis() {
        assert_eq!(SimulatedLatency::from_millis(1500).duration(), Duration::from_millis(1500));
        assert!(SimulatedLatency::none().duration().is_zero());
    }

    #[tokio::test]
    async fn test_zero_latency_returns_immediately() {
        let latency = SimulatedLatency::none();
        let started = std::time::Instant::now();
        latency.wait().await;
        assert!(started.elapsed() < Duration::from_millis(50));
    }
}
