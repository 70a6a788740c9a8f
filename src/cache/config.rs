//! Cache configuration.

use serde::Deserialize;

/// Collection cache behaviour, resolved from `[cache]` settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Serve reads from the held snapshot. When false every read reloads.
    pub enabled: bool,
    /// Load the catalog once before the HTTP listener starts.
    pub warm_on_startup: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            warm_on_startup: true,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            enabled: settings.enabled,
            warm_on_startup: settings.warm_on_startup,
        }
    }
}

impl CacheConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            warm_on_startup: false,
        }
    }
}
