//! Runtime configuration.
//!
//! Every field has a default, so a host only needs to persist the values it
//! overrides:
//!
//! ```rust
//! use crossfade::config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_json_str(r#"{ "fade": { "pool": { "prewarm": 8 } } }"#).unwrap();
//! assert_eq!(config.fade.pool.prewarm, 8);
//! assert!(config.fade.validate_easing);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Sizing of one object pool.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Instances constructed up front so the first acquisitions do not allocate.
    pub prewarm: usize,

    /// Upper bound on the free list; released items beyond it are dropped.
    pub max_free: Option<usize>,
}

/// Behaviour of the fade scheduler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeConfig {
    /// Check custom easing functions for `f(0) == 0` and `f(1) == 1` when a
    /// fade starts. Only active in debug builds.
    pub validate_easing: bool,

    /// Pool used for fade operations.
    pub pool: PoolConfig,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            validate_easing: true,
            pool: PoolConfig::default(),
        }
    }
}

/// Top-level configuration grouping every subsystem.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Default sizing for pools created lazily by a registry.
    pub pools: PoolConfig,

    pub fade: FadeConfig,
}

impl RuntimeConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = RuntimeConfig::from_json_str("{}").unwrap();
        assert_eq!(config, RuntimeConfig::default());
        assert!(config.fade.validate_easing);
        assert_eq!(config.pools.max_free, None);
    }

    #[test]
    fn partial_document_overrides_only_given_fields() {
        let config = RuntimeConfig::from_json_str(
            r#"{ "pools": { "max_free": 16 }, "fade": { "validate_easing": false } }"#,
        )
        .unwrap();

        assert_eq!(config.pools.max_free, Some(16));
        assert_eq!(config.pools.prewarm, 0);
        assert!(!config.fade.validate_easing);
    }

    #[test]
    fn config_roundtrips_through_json() {
        let mut config = RuntimeConfig::default();
        config.fade.pool.prewarm = 4;

        let json = config.to_json_string().unwrap();
        let restored = RuntimeConfig::from_json_str(&json).unwrap();

        assert_eq!(config, restored);
    }

    #[test]
    fn malformed_document_is_reported() {
        let result = RuntimeConfig::from_json_str("{ \"pools\": 3 }");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
