//! Shared fakes for synchronizer integration tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use gateway_sync::content::{DesiredConfiguration, Route, Service};
use gateway_sync::failures::ResourceError;
use gateway_sync::observability::PushMetrics;
use gateway_sync::sendconfig::{
    AdminApiClient, ChangeDetectionError, ConfigurationChangeDetector, DataPlaneStatus,
    MetricsProtocol, StatusError, UpdateClient, UpdateError, UpdateFailure, UpdateStrategy,
};
use gateway_sync::ConfigFingerprint;

/// Strategy returning queued results, `Ok(())` once the queue is empty.
pub struct FakeStrategy {
    protocol: MetricsProtocol,
    responses: Mutex<VecDeque<Result<(), UpdateFailure>>>,
    delay: Option<Duration>,
    pub calls: AtomicUsize,
}

impl FakeStrategy {
    pub fn new(protocol: MetricsProtocol) -> Arc<Self> {
        Arc::new(Self {
            protocol,
            responses: Mutex::new(VecDeque::new()),
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(protocol: MetricsProtocol, failure: UpdateFailure) -> Arc<Self> {
        let strategy = Self::new(protocol);
        strategy.push_response(Err(failure));
        strategy
    }

    pub fn slow(protocol: MetricsProtocol, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            protocol,
            responses: Mutex::new(VecDeque::new()),
            delay: Some(delay),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn push_response(&self, response: Result<(), UpdateFailure>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpdateStrategy for FakeStrategy {
    async fn update(&self, _content: &DesiredConfiguration) -> Result<(), UpdateFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.responses.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    fn metrics_protocol(&self) -> MetricsProtocol {
        self.protocol
    }
}

/// Detector with a fixed answer.
pub struct FakeDetector {
    answer: Result<bool, ChangeDetectionError>,
    pub calls: AtomicUsize,
}

impl FakeDetector {
    pub fn answering(answer: Result<bool, ChangeDetectionError>) -> Arc<Self> {
        Arc::new(Self {
            answer,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigurationChangeDetector for FakeDetector {
    async fn has_configuration_changed(
        &self,
        _old_sha: Option<&ConfigFingerprint>,
        _new_sha: &ConfigFingerprint,
        _client: &dyn UpdateClient,
    ) -> Result<bool, ChangeDetectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }
}

/// Admin API reporting a loaded configuration.
pub struct LoadedStatus;

#[async_trait]
impl AdminApiClient for LoadedStatus {
    async fn status(&self) -> Result<DataPlaneStatus, StatusError> {
        Ok(DataPlaneStatus {
            configuration_hash: "8a1f2e3d4c5b6a7980f1e2d3c4b5a697".to_string(),
        })
    }
}

/// Admin API of a database-backed data plane, which reports no hash.
pub struct HashlessStatus;

#[async_trait]
impl AdminApiClient for HashlessStatus {
    async fn status(&self) -> Result<DataPlaneStatus, StatusError> {
        Ok(serde_json::from_str(r#"{"database":{"reachable":true}}"#).unwrap())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PushRecord {
    Success {
        protocol: MetricsProtocol,
        duration: Duration,
        url: String,
    },
    Failure {
        protocol: MetricsProtocol,
        duration: Duration,
        url: String,
        reason: &'static str,
        error: String,
    },
}

/// Metrics sink remembering every call.
#[derive(Default)]
pub struct RecordingMetrics {
    records: Mutex<Vec<PushRecord>>,
}

impl RecordingMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn records(&self) -> Vec<PushRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl PushMetrics for RecordingMetrics {
    fn record_push_success(&self, protocol: MetricsProtocol, duration: Duration, url: &str) {
        self.records.lock().unwrap().push(PushRecord::Success {
            protocol,
            duration,
            url: url.to_string(),
        });
    }

    fn record_push_failure(
        &self,
        protocol: MetricsProtocol,
        duration: Duration,
        url: &str,
        error: &UpdateError,
    ) {
        self.records.lock().unwrap().push(PushRecord::Failure {
            protocol,
            duration,
            url: url.to_string(),
            reason: error.failure_reason(),
            error: error.to_string(),
        });
    }
}

/// A small desired configuration with one service and one route.
pub fn echo_configuration() -> DesiredConfiguration {
    DesiredConfiguration {
        services: vec![Service {
            name: "ns.echo.80".to_string(),
            host: "echo.ns.80.svc".to_string(),
            port: 80,
            protocol: "http".to_string(),
            path: None,
            routes: vec![Route {
                name: "ns.r1.00".to_string(),
                hosts: vec!["echo.example.com".to_string()],
                paths: vec!["/echo".to_string()],
                methods: Vec::new(),
                strip_path: true,
                plugins: Vec::new(),
                tags: vec!["k8s-name:r1".to_string(), "k8s-namespace:ns".to_string()],
            }],
            plugins: Vec::new(),
            tags: Vec::new(),
        }],
        ..Default::default()
    }
}

pub fn resource_error(
    kind: &str,
    namespace: &str,
    name: &str,
    problems: &[(&str, &str)],
) -> ResourceError {
    ResourceError {
        kind: kind.to_string(),
        api_version: "gateway.networking.k8s.io/v1".to_string(),
        namespace: namespace.to_string(),
        name: name.to_string(),
        uid: format!("{}-uid", name),
        problems: problems
            .iter()
            .map(|(f, p)| (f.to_string(), p.to_string()))
            .collect::<BTreeMap<_, _>>(),
    }
}
