//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (log levels, bind addresses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SyncConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::SyncConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown log level '{0}' (expected one of trace, debug, info, warn, error)")]
    UnknownLogLevel(String),

    #[error("invalid metrics address '{address}': {reason}")]
    InvalidMetricsAddress { address: String, reason: String },
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &SyncConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let observability = &config.observability;

    let level = observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            observability.log_level.clone(),
        ));
    }

    if observability.metrics_enabled {
        if let Err(e) = observability.metrics_address.parse::<SocketAddr>() {
            errors.push(ValidationError::InvalidMetricsAddress {
                address: observability.metrics_address.clone(),
                reason: e.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
