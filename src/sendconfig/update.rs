//! Configuration push orchestration.
//!
//! # States
//! ```text
//! Start
//!     → FingerprintComputed
//!     → Skipped                (detector reports no change)
//!     | StrategyResolved
//!         → Applied(Success)   (fingerprint committed, success metric)
//!         | Applied(Failure)   (failures translated, failure metric)
//! ```
//!
//! # Design Decisions
//! - Reverse sync bypasses change detection; it is an override, not a signal
//!   to combine with the detector's answer
//! - Detector errors are fatal; there is no fail-safe push
//! - No retries here: the reconciliation loop requeues on error
//! - Cancellation drops the in-flight detector or update future

use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::SyncSettings;
use crate::content::{fingerprint, ConfigFingerprint, DesiredConfiguration, FingerprintError};
use crate::failures::{resource_errors_to_resource_failures, ResourceFailure};
use crate::observability::PushMetrics;
use crate::sendconfig::client::UpdateClient;
use crate::sendconfig::detector::{ChangeDetectionError, ConfigurationChangeDetector};
use crate::sendconfig::strategy::{UpdateError, UpdateFailure, UpdateStrategyResolver};

/// Successful end of a sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Nothing to push. Carries the unchanged previous fingerprint.
    Skipped { fingerprint: Option<ConfigFingerprint> },
    /// The data plane accepted the configuration.
    Pushed { fingerprint: ConfigFingerprint },
}

impl SyncOutcome {
    /// Fingerprint of the configuration the data plane holds after the run.
    pub fn fingerprint(&self) -> Option<&ConfigFingerprint> {
        match self {
            SyncOutcome::Skipped { fingerprint } => fingerprint.as_ref(),
            SyncOutcome::Pushed { fingerprint } => Some(fingerprint),
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, SyncOutcome::Skipped { .. })
    }
}

/// Failed sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Fingerprint(#[from] FingerprintError),

    #[error("failed to detect configuration change: {0}")]
    ChangeDetection(#[from] ChangeDetectionError),

    #[error("configuration sync cancelled")]
    Cancelled,

    #[error("failed to push configuration to {url}: {source}")]
    Update {
        url: String,
        #[source]
        source: UpdateError,
        failures: Vec<ResourceFailure>,
    },
}

impl SyncError {
    /// Per-resource diagnostics. Empty unless the push itself failed with
    /// parseable resource errors.
    pub fn failures(&self) -> &[ResourceFailure] {
        match self {
            SyncError::Update { failures, .. } => failures,
            _ => &[],
        }
    }
}

/// Runs the decide, apply, translate pipeline for one target at a time.
#[derive(Clone)]
pub struct Synchronizer {
    settings: SyncSettings,
    resolver: Arc<dyn UpdateStrategyResolver>,
    detector: Arc<dyn ConfigurationChangeDetector>,
    metrics: Arc<dyn PushMetrics>,
}

impl Synchronizer {
    pub fn new(
        settings: SyncSettings,
        resolver: Arc<dyn UpdateStrategyResolver>,
        detector: Arc<dyn ConfigurationChangeDetector>,
        metrics: Arc<dyn PushMetrics>,
    ) -> Self {
        Self {
            settings,
            resolver,
            detector,
            metrics,
        }
    }

    /// Push `content` to the data plane behind `client` if it needs it.
    ///
    /// The caller must not run two updates for the same client concurrently.
    pub async fn perform_update(
        &self,
        cancel: &CancellationToken,
        client: &dyn UpdateClient,
        content: &DesiredConfiguration,
    ) -> Result<SyncOutcome, SyncError> {
        let span = tracing::info_span!(
            "perform_update",
            sync_id = %Uuid::new_v4(),
            url = %client.base_root_url()
        );
        self.run(cancel, client, content).instrument(span).await
    }

    async fn run(
        &self,
        cancel: &CancellationToken,
        client: &dyn UpdateClient,
        content: &DesiredConfiguration,
    ) -> Result<SyncOutcome, SyncError> {
        let old_sha = client.last_config_sha();
        let new_sha = fingerprint(content)?;

        if !self.settings.enable_reverse_sync {
            let changed = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(SyncError::Cancelled),
                res = self.detector.has_configuration_changed(old_sha.as_ref(), &new_sha, client) => res?,
            };
            if !changed {
                tracing::debug!("No configuration change, skipping sync to data plane");
                return Ok(SyncOutcome::Skipped {
                    fingerprint: old_sha,
                });
            }
        }

        let strategy = self.resolver.resolve_update_strategy(client);
        let protocol = strategy.metrics_protocol();
        let url = client.base_root_url();

        let start = Instant::now();
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(UpdateFailure::from(UpdateError::Cancelled)),
            res = strategy.update(content) => res,
        };
        let duration = start.elapsed();

        match result {
            Err(failure) => {
                let failures = resource_errors_to_resource_failures(
                    &failure.resource_errors,
                    failure.parse_error.as_ref(),
                );
                self.metrics
                    .record_push_failure(protocol, duration, url, &failure.error);
                Err(SyncError::Update {
                    url: url.to_string(),
                    source: failure.error,
                    failures,
                })
            }
            Ok(()) => {
                self.metrics.record_push_success(protocol, duration, url);
                client.set_last_config_sha(new_sha);
                tracing::info!(
                    protocol = %protocol,
                    fingerprint = %new_sha.short(),
                    services = content.services.len(),
                    routes = content.route_count(),
                    duration_ms = millis(duration),
                    "Successfully synced configuration to data plane"
                );
                Ok(SyncOutcome::Pushed {
                    fingerprint: new_sha,
                })
            }
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl std::fmt::Debug for Synchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Synchronizer")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_fingerprint() {
        let sha = ConfigFingerprint::from_bytes([9; 32]);
        assert_eq!(
            SyncOutcome::Pushed { fingerprint: sha }.fingerprint(),
            Some(&sha)
        );
        assert_eq!(SyncOutcome::Skipped { fingerprint: None }.fingerprint(), None);
        assert!(SyncOutcome::Skipped { fingerprint: Some(sha) }.is_skipped());
    }

    #[test]
    fn test_failures_only_on_update_errors() {
        assert!(SyncError::Cancelled.failures().is_empty());

        let err = SyncError::Update {
            url: "http://localhost:8001".to_string(),
            source: UpdateError::Network("connection reset".to_string()),
            failures: Vec::new(),
        };
        assert_eq!(
            err.to_string(),
            "failed to push configuration to http://localhost:8001: network error: connection reset"
        );
    }

    #[test]
    fn test_millis_saturates() {
        assert_eq!(millis(Duration::from_millis(250)), 250);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }
}
