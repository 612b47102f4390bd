//! Configuration types

use serde::{Deserialize, Serialize};
use svd_domain::Lifetime;

use crate::constants::DEFAULT_LOG_LEVEL;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Delegate registration settings
    pub delegates: DelegateConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Delegate registration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelegateConfig {
    /// Lifetime of hook-registered delegates whose marking sets none
    pub default_lifetime: Lifetime,

    /// Read markings collected at link time
    pub discover_markings: bool,
}

impl Default for DelegateConfig {
    fn default() -> Self {
        Self {
            default_lifetime: Lifetime::Transient,
            discover_markings: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
        }
    }
}
