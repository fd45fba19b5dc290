//! Configuration schema definitions.
//!
//! This module defines the configuration structure for the synchronizer.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the configuration synchronizer.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SyncConfig {
    /// Push behaviour.
    pub sync: SyncSettings,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Push behaviour settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SyncSettings {
    /// Push on every run, bypassing change detection.
    ///
    /// Used when the data plane can be mutated out of band, so the locally
    /// stored fingerprint cannot be trusted to reflect remote state.
    pub enable_reverse_sync: bool,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
