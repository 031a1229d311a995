//! Portal configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};

use core_kernel::{CoreError, SimulatedLatency};

use crate::error::PortalError;

/// Environment variable naming an optional configuration file
pub const CONFIG_FILE_VAR: &str = "PORTAL_CONFIG";

/// Portal configuration
///
/// Every key may also be set as `PORTAL_<KEY>` in the environment, which
/// takes precedence over the file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Log level
    pub log_level: String,
    /// Directory holding the JSON snapshots; unset keeps everything in memory
    pub data_dir: Option<PathBuf>,
    /// Artificial delay of the document intake stub
    pub ocr_latency_ms: u64,
    /// Artificial delay of the fraud screen
    pub fraud_latency_ms: u64,
    /// Artificial delay of the policy lookup
    pub policy_latency_ms: u64,
    /// The password every approved account signs in with
    pub demo_password: String,
    /// Load the demo users and claims into empty stores
    pub seed_demo_data: bool,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            data_dir: None,
            ocr_latency_ms: 1500,
            fraud_latency_ms: 800,
            policy_latency_ms: 1000,
            demo_password: "password".to_string(),
            seed_demo_data: true,
        }
    }
}

impl PortalConfig {
    /// Loads configuration from `PORTAL_CONFIG` (if set) and the environment
    pub fn from_env() -> Result<Self, PortalError> {
        let file = std::env::var_os(CONFIG_FILE_VAR).map(PathBuf::from);
        Self::load(file.as_deref())
    }

    /// Loads configuration from an optional file overlaid with `PORTAL_*` variables
    pub fn load(file: Option<&Path>) -> Result<Self, PortalError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }
        let config: PortalConfig = builder
            .add_source(config::Environment::with_prefix("PORTAL").try_parsing(true))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the portal cannot start with
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.log_level.trim().is_empty() {
            return Err(CoreError::configuration("log_level must not be empty"));
        }
        if self.demo_password.is_empty() {
            return Err(CoreError::configuration("demo_password must not be empty"));
        }
        if self.data_dir.as_ref().is_some_and(|dir| dir.as_os_str().is_empty()) {
            return Err(CoreError::configuration("data_dir must not be empty when set"));
        }
        Ok(())
    }

    pub fn ocr_latency(&self) -> SimulatedLatency {
        SimulatedLatency::from_millis(self.ocr_latency_ms)
    }

    pub fn fraud_latency(&self) -> SimulatedLatency {
        SimulatedLatency::from_millis(self.fraud_latency_ms)
    }

    pub fn policy_latency(&self) -> SimulatedLatency {
        SimulatedLatency::from_millis(self.policy_latency_ms)
    }

    /// Defaults with every artificial delay switched off
    pub fn without_latency() -> Self {
        Self {
            ocr_latency_ms: 0,
            fraud_latency_ms: 0,
            policy_latency_ms: 0,
            ..Self::default()
        }
    }
}
