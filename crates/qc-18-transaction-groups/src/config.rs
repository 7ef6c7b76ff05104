//! Configuration for Transaction Groups Subsystem

use crate::domain::errors::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Ledger limit on transactions per atomic group.
pub const MAX_TX_GROUP_SIZE: usize = 16;

/// Highest accepted [`DecodeLimits::max_depth`].
pub const MAX_DECODE_DEPTH: usize = 64;

/// Environment override for [`GroupingConfig::max_batch_size`].
pub const ENV_MAX_BATCH_SIZE: &str = "QC_GROUP_MAX_BATCH_SIZE";
/// Environment override for [`GroupingConfig::max_group_size`].
pub const ENV_MAX_GROUP_SIZE: &str = "QC_GROUP_MAX_GROUP_SIZE";
/// Environment override for [`DecodeLimits::max_depth`].
pub const ENV_MAX_DEPTH: &str = "QC_GROUP_MAX_DEPTH";

/// Bounds applied while decoding a single record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeLimits {
    /// Maximum container nesting depth
    pub max_depth: usize,
    /// Maximum entries any array or map header may claim
    pub max_container_len: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_depth: 16,
            max_container_len: 65_536,
        }
    }
}

/// Grouping configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Maximum transactions accepted in one call (anti-DoS)
    pub max_batch_size: usize,
    /// Maximum transactions in one stamped group or verified run
    pub max_group_size: usize,
    /// Record decoding bounds
    pub decode_limits: DecodeLimits,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 1024,
            max_group_size: MAX_TX_GROUP_SIZE,
            decode_limits: DecodeLimits::default(),
        }
    }
}

impl GroupingConfig {
    /// Defaults with environment overrides applied.
    ///
    /// Unparsable, zero or out-of-range values are logged and ignored, so the
    /// result always passes [`GroupingConfig::validate`].
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(value) = read_env_limit(ENV_MAX_BATCH_SIZE, usize::MAX) {
            config.max_batch_size = value;
        }
        if let Some(value) = read_env_limit(ENV_MAX_GROUP_SIZE, usize::MAX) {
            config.max_group_size = value;
        }
        if let Some(value) = read_env_limit(ENV_MAX_DEPTH, MAX_DECODE_DEPTH) {
            config.decode_limits.max_depth = value;
        }

        info!(
            max_batch_size = config.max_batch_size,
            max_group_size = config.max_group_size,
            max_depth = config.decode_limits.max_depth,
            "Loaded grouping configuration"
        );
        config
    }

    /// Check that every limit is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("max_batch_size", self.max_batch_size),
            ("max_group_size", self.max_group_size),
            ("decode_limits.max_depth", self.decode_limits.max_depth),
            (
                "decode_limits.max_container_len",
                self.decode_limits.max_container_len,
            ),
        ];
        if let Some(&(field, _)) = limits.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::ZeroLimit { field });
        }
        if self.decode_limits.max_depth > MAX_DECODE_DEPTH {
            return Err(ConfigError::DepthTooLarge {
                depth: self.decode_limits.max_depth,
                max: MAX_DECODE_DEPTH,
            });
        }
        Ok(())
    }
}

fn read_env_limit(name: &str, max: usize) -> Option<usize> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<usize>() {
        Ok(0) => {
            warn!("{} must be greater than zero, ignoring", name);
            None
        }
        Ok(value) if value > max => {
            warn!("{} exceeds the ceiling of {}, ignoring", name, max);
            None
        }
        Ok(value) => Some(value),
        Err(_) => {
            warn!("{} is not a valid integer ({:?}), ignoring", name, raw);
            None
        }
    }
}
