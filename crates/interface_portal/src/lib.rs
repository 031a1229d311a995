//! Claims Portal Wiring
//!
//! Assembles the user directory and the claims service from a
//! [`PortalConfig`]: picks in-memory or file-backed stores, loads the demo
//! data and plugs the simulated intake, fraud and policy adapters in with
//! their configured delays.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_portal::{Portal, PortalConfig, TracingNotifier};
//!
//! let config = PortalConfig::from_env()?;
//! let portal = Portal::from_config(&config, Arc::new(TracingNotifier)).await?;
//! let user = portal.directory.authenticate("admin@example.com", "password").await?;
//! ```

pub mod config;
pub mod error;
pub mod notify;
pub mod seed;

use std::sync::Arc;
use tracing::info;

use core_kernel::{Clock, HealthCheckResult, HealthCheckable, Notifier, SystemClock};
use domain_claims::{
    ClaimStore, ClaimsService, InMemoryClaimStore, RuleBasedFraudScreener, SimulatedOcrProcessor,
};
use domain_party::{InMemoryUserStore, UserDirectory, UserStore};
use domain_policy::PolicyRegistryVerifier;
use infra_store::{FileClaimStore, FileUserStore};

pub use crate::config::PortalConfig;
pub use crate::error::PortalError;
pub use crate::notify::TracingNotifier;

/// Opened user and claim stores
struct Stores {
    users: Arc<dyn UserStore>,
    claims: Arc<dyn ClaimStore>,
    health_checks: Vec<Arc<dyn HealthCheckable>>,
}

/// The assembled portal services
pub struct Portal {
    pub directory: UserDirectory,
    pub claims: ClaimsService,
    health_checks: Vec<Arc<dyn HealthCheckable>>,
}

impl Portal {
    /// Builds the portal on the system clock
    pub async fn from_config(config: &PortalConfig, notifier: Arc<dyn Notifier>) -> Result<Self, PortalError> {
        Self::build(config, notifier, Arc::new(SystemClock)).await
    }

    /// Builds the portal with an explicit clock for timestamps and policy expiry
    pub async fn build(
        config: &PortalConfig,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, PortalError> {
        config.validate()?;
        let stores = open_stores(config).await?;

        info!(
            ocr_ms = config.ocr_latency().duration().as_millis() as u64,
            fraud_ms = config.fraud_latency().duration().as_millis() as u64,
            policy_ms = config.policy_latency().duration().as_millis() as u64,
            "Simulated adapter latency"
        );

        let policies = PolicyRegistryVerifier::seeded()
            .with_clock(clock.clone())
            .with_latency(config.policy_latency());

        let claims = ClaimsService::new(
            stores.claims,
            Arc::new(SimulatedOcrProcessor::new(config.ocr_latency())),
            Arc::new(RuleBasedFraudScreener::new(config.fraud_latency())),
            Arc::new(policies),
            notifier.clone(),
        )
        .with_clock(clock);

        let directory = UserDirectory::new(stores.users, config.demo_password.clone(), notifier);

        Ok(Self {
            directory,
            claims,
            health_checks: stores.health_checks,
        })
    }

    /// Health of every store
    pub async fn health(&self) -> Vec<HealthCheckResult> {
        let mut results = Vec::with_capacity(self.health_checks.len());
        for check in &self.health_checks {
            results.push(check.health_check().await);
        }
        results
    }
}

async fn open_stores(config: &PortalConfig) -> Result<Stores, PortalError> {
    let (seed_users, seed_claims) = if config.seed_demo_data {
        (seed::demo_users()?, seed::demo_claims()?)
    } else {
        (Vec::new(), Vec::new())
    };

    match &config.data_dir {
        Some(dir) => {
            info!(data_dir = %dir.display(), "Using file-backed stores");
            let users = Arc::new(FileUserStore::open_or_seed(dir, seed_users).await?);
            let claims = Arc::new(FileClaimStore::open_or_seed(dir, seed_claims).await?);
            let health_checks: Vec<Arc<dyn HealthCheckable>> = vec![users.clone() as Arc<dyn HealthCheckable>, claims.clone()];
            Ok(Stores { users, claims, health_checks })
        }
        None => {
            info!("Using in-memory stores");
            let users = Arc::new(InMemoryUserStore::with_users(seed_users));
            let claims = Arc::new(InMemoryClaimStore::with_claims(seed_claims));
            let health_checks: Vec<Arc<dyn HealthCheckable>> = vec![users.clone() as Arc<dyn HealthCheckable>, claims.clone()];
            Ok(Stores { users, claims, health_checks })
        }
    }
}
