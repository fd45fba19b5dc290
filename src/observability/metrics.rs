//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define configuration push metrics (count, duration)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `gateway_sync_configuration_push_count` (counter): pushes by protocol,
//!   success, failure reason, data plane
//! - `gateway_sync_configuration_push_duration_milliseconds` (histogram):
//!   push latency distribution
//!
//! # Design Decisions
//! - The synchronizer only sees the narrow [`PushMetrics`] trait
//! - Recording is fire-and-forget: it returns nothing and cannot fail a push
//! - Without an installed recorder the `metrics` facade is a no-op

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::sendconfig::{MetricsProtocol, UpdateError};

pub const PUSH_COUNT: &str = "gateway_sync_configuration_push_count";
pub const PUSH_DURATION: &str = "gateway_sync_configuration_push_duration_milliseconds";

/// Recording interface for configuration push outcomes.
///
/// Called exactly once per attempted push, never for a skipped run.
pub trait PushMetrics: Send + Sync {
    fn record_push_success(&self, protocol: MetricsProtocol, duration: Duration, url: &str);

    fn record_push_failure(
        &self,
        protocol: MetricsProtocol,
        duration: Duration,
        url: &str,
        error: &UpdateError,
    );
}

/// [`PushMetrics`] backed by the global `metrics` recorder.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrometheusPushMetrics;

impl PushMetrics for PrometheusPushMetrics {
    fn record_push_success(&self, protocol: MetricsProtocol, duration: Duration, url: &str) {
        metrics::counter!(
            PUSH_COUNT,
            "protocol" => protocol.as_str(),
            "success" => "true",
            "failure_reason" => "",
            "dataplane" => url.to_string()
        )
        .increment(1);
        metrics::histogram!(
            PUSH_DURATION,
            "protocol" => protocol.as_str(),
            "success" => "true",
            "dataplane" => url.to_string()
        )
        .record(duration_millis(duration));
    }

    fn record_push_failure(
        &self,
        protocol: MetricsProtocol,
        duration: Duration,
        url: &str,
        error: &UpdateError,
    ) {
        metrics::counter!(
            PUSH_COUNT,
            "protocol" => protocol.as_str(),
            "success" => "false",
            "failure_reason" => error.failure_reason(),
            "dataplane" => url.to_string()
        )
        .increment(1);
        metrics::histogram!(
            PUSH_DURATION,
            "protocol" => protocol.as_str(),
            "success" => "false",
            "dataplane" => url.to_string()
        )
        .record(duration_millis(duration));
    }
}

fn duration_millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// Install the Prometheus exporter and describe the push metrics.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    describe_counter!(
        PUSH_COUNT,
        Unit::Count,
        "Count of configuration pushes to the data plane"
    );
    describe_histogram!(
        PUSH_DURATION,
        Unit::Milliseconds,
        "Time taken to push configuration to the data plane"
    );

    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}
