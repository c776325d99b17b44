//! Configuration for the header relay.

use std::fs;
use std::path::Path;

use bitcoin::{Network, Target};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::types::ValidationMode;

/// Blocks between Bitcoin difficulty adjustments.
pub const DEFAULT_RETARGET_INTERVAL: u32 = 2016;

/// Configuration for a [`Relay`](crate::Relay).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Network whose headers are relayed. Selects the proof of work limit.
    pub network: Network,

    /// Validation mode applied to submitted headers.
    pub validation_mode: ValidationMode,

    /// Number of blocks between difficulty retargets.
    pub retarget_interval: u32,

    /// Log level used by the CLI when none is given on the command line.
    pub log_level: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            network: Network::Bitcoin,
            validation_mode: ValidationMode::Full,
            retarget_interval: DEFAULT_RETARGET_INTERVAL,
            log_level: "info".to_string(),
        }
    }
}

impl RelayConfig {
    /// Create a new configuration for the given network.
    pub fn new(network: Network) -> Self {
        Self {
            network,
            ..Self::default()
        }
    }

    pub fn mainnet() -> Self {
        Self::new(Network::Bitcoin)
    }

    pub fn testnet() -> Self {
        Self::new(Network::Testnet)
    }

    pub fn regtest() -> Self {
        Self::new(Network::Regtest)
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: &Path) -> ConfigResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_validation_mode(mut self, mode: ValidationMode) -> Self {
        self.validation_mode = mode;
        self
    }

    pub fn with_retarget_interval(mut self, interval: u32) -> Self {
        self.retarget_interval = interval;
        self
    }

    pub fn with_log_level(mut self, level: &str) -> Self {
        self.log_level = level.to_string();
        self
    }

    /// Highest target a header on this network may claim.
    pub fn pow_limit(&self) -> Target {
        match self.network {
            Network::Bitcoin => Target::MAX_ATTAINABLE_MAINNET,
            Network::Signet => Target::MAX_ATTAINABLE_SIGNET,
            Network::Regtest => Target::MAX_ATTAINABLE_REGTEST,
            _ => Target::MAX_ATTAINABLE_TESTNET,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.retarget_interval == 0 {
            return Err(ConfigError::InvalidValue(
                "retarget_interval",
                "must be greater than zero".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(ConfigError::InvalidValue("log_level", other.to_string())),
        }
    }
}
