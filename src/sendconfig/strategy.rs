//! Update strategies and their selection.
//!
//! A strategy pushes a whole desired configuration over one transport. The
//! synchronizer never depends on a concrete transport; it asks an
//! [`UpdateStrategyResolver`] for one on every run.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::content::DesiredConfiguration;
use crate::failures::{ResourceError, ResourceErrorsParseError};
use crate::sendconfig::client::{DataPlaneMode, UpdateClient};

/// Transport label attached to push metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricsProtocol {
    /// Entity-by-entity sync against a database-backed data plane.
    Deck,
    /// Whole-document upload to a DB-less data plane.
    DbLess,
}

impl MetricsProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricsProtocol::Deck => "deck",
            MetricsProtocol::DbLess => "db-less",
        }
    }
}

impl fmt::Display for MetricsProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a push failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateError {
    #[error("network error: {0}")]
    Network(String),

    #[error("configuration conflict: {0}")]
    Conflict(String),

    #[error("configuration rejected: {0}")]
    Rejected(String),

    #[error("update cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

impl UpdateError {
    /// Metrics label for the failure.
    pub fn failure_reason(&self) -> &'static str {
        match self {
            UpdateError::Network(_) => "network",
            UpdateError::Conflict(_) => "conflict",
            _ => "other",
        }
    }
}

/// A failed push.
///
/// `error` is what failed. The resource errors, or the reason they could not
/// be parsed, only refine how the failure is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateFailure {
    pub error: UpdateError,
    pub resource_errors: Vec<ResourceError>,
    pub parse_error: Option<ResourceErrorsParseError>,
}

impl UpdateFailure {
    pub fn new(error: UpdateError) -> Self {
        Self {
            error,
            resource_errors: Vec::new(),
            parse_error: None,
        }
    }

    pub fn with_resource_errors(mut self, resource_errors: Vec<ResourceError>) -> Self {
        self.resource_errors = resource_errors;
        self
    }

    pub fn with_parse_error(mut self, parse_error: ResourceErrorsParseError) -> Self {
        self.parse_error = Some(parse_error);
        self
    }
}

impl From<UpdateError> for UpdateFailure {
    fn from(error: UpdateError) -> Self {
        Self::new(error)
    }
}

/// Applies a desired configuration to a data plane over some transport.
#[async_trait]
pub trait UpdateStrategy: Send + Sync {
    async fn update(&self, content: &DesiredConfiguration) -> Result<(), UpdateFailure>;

    fn metrics_protocol(&self) -> MetricsProtocol;
}

/// Picks the strategy to use for a target. Cannot fail.
pub trait UpdateStrategyResolver: Send + Sync {
    fn resolve_update_strategy(&self, client: &dyn UpdateClient) -> Arc<dyn UpdateStrategy>;
}

/// Resolver choosing by the target's current [`DataPlaneMode`].
///
/// Holds one strategy per mode, so every target resolves.
#[derive(Clone)]
pub struct DataPlaneModeResolver {
    db_less: Arc<dyn UpdateStrategy>,
    database: Arc<dyn UpdateStrategy>,
}

impl DataPlaneModeResolver {
    pub fn new(db_less: Arc<dyn UpdateStrategy>, database: Arc<dyn UpdateStrategy>) -> Self {
        Self { db_less, database }
    }
}

impl UpdateStrategyResolver for DataPlaneModeResolver {
    fn resolve_update_strategy(&self, client: &dyn UpdateClient) -> Arc<dyn UpdateStrategy> {
        match client.data_plane_mode() {
            DataPlaneMode::DbLess => self.db_less.clone(),
            DataPlaneMode::Database => self.database.clone(),
        }
    }
}

impl fmt::Debug for DataPlaneModeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataPlaneModeResolver")
            .field("db_less", &self.db_less.metrics_protocol())
            .field("database", &self.database.metrics_protocol())
            .finish()
    }
}
