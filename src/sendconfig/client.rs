//! Target data plane handle.
//!
//! # Responsibilities
//! - Hold the last configuration fingerprint the data plane accepted
//! - Expose the admin API status check used for change detection
//! - Track the data plane mode discovered at runtime
//!
//! # Design Decisions
//! - The fingerprint cell belongs to the target, not to the synchronizer
//! - No locking around a push: callers run at most one sync per target

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::content::ConfigFingerprint;

/// How the data plane stores configuration, which decides the push transport.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataPlaneMode {
    /// Declarative, whole-document configuration.
    DbLess = 0,
    /// Entity-by-entity configuration backed by a database.
    Database = 1,
}

impl From<u8> for DataPlaneMode {
    fn from(val: u8) -> Self {
        match val {
            1 => DataPlaneMode::Database,
            _ => DataPlaneMode::DbLess,
        }
    }
}

/// Hash a DB-less data plane reports before any configuration is loaded.
pub const EMPTY_CONFIGURATION_HASH: &str = "00000000000000000000000000000000";

/// Status reported by the data plane admin API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DataPlaneStatus {
    /// Hash of the configuration currently loaded by the data plane.
    ///
    /// Only DB-less data planes report one; it is empty otherwise.
    #[serde(default)]
    pub configuration_hash: String,
}

impl DataPlaneStatus {
    /// True when the data plane reports the initial empty-configuration
    /// hash, which happens after it restarts with an empty state. A missing
    /// hash says nothing about the loaded configuration.
    pub fn has_no_configuration(&self) -> bool {
        self.configuration_hash == EMPTY_CONFIGURATION_HASH
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("admin API status request failed: {0}")]
pub struct StatusError(pub String);

/// Live-state view of a data plane.
#[async_trait]
pub trait AdminApiClient: Send + Sync {
    async fn status(&self) -> Result<DataPlaneStatus, StatusError>;
}

/// Handle on a single data plane as seen by the synchronizer.
pub trait UpdateClient: Send + Sync {
    /// Fingerprint of the last configuration successfully pushed, if any.
    fn last_config_sha(&self) -> Option<ConfigFingerprint>;

    /// Commit a fingerprint after a confirmed successful push.
    fn set_last_config_sha(&self, sha: ConfigFingerprint);

    fn base_root_url(&self) -> &str;

    fn admin_api_client(&self) -> &dyn AdminApiClient;

    fn data_plane_mode(&self) -> DataPlaneMode;
}

#[derive(Debug, Error)]
pub enum TargetClientError {
    #[error("invalid admin API URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported admin API URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),
}

/// Default [`UpdateClient`] implementation.
pub struct TargetClient {
    base_root_url: String,
    admin_api: Arc<dyn AdminApiClient>,
    mode: AtomicU8,
    last_config_sha: ArcSwapOption<ConfigFingerprint>,
}

impl TargetClient {
    /// Create a handle for the admin API at `base_url`.
    pub fn new(
        base_url: &str,
        mode: DataPlaneMode,
        admin_api: Arc<dyn AdminApiClient>,
    ) -> Result<Self, TargetClientError> {
        let url = Url::parse(base_url).map_err(|source| TargetClientError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(TargetClientError::UnsupportedScheme(url.scheme().to_string()));
        }

        Ok(Self {
            base_root_url: url.as_str().trim_end_matches('/').to_string(),
            admin_api,
            mode: AtomicU8::new(mode as u8),
            last_config_sha: ArcSwapOption::empty(),
        })
    }

    /// Record a data plane mode discovered at runtime.
    ///
    /// Takes effect on the next strategy resolution.
    pub fn set_data_plane_mode(&self, mode: DataPlaneMode) {
        let previous = DataPlaneMode::from(self.mode.swap(mode as u8, Ordering::Relaxed));
        if previous != mode {
            tracing::info!(
                url = %self.base_root_url,
                from = ?previous,
                to = ?mode,
                "Data plane mode changed"
            );
        }
    }
}

impl UpdateClient for TargetClient {
    fn last_config_sha(&self) -> Option<ConfigFingerprint> {
        self.last_config_sha.load().as_deref().copied()
    }

    fn set_last_config_sha(&self, sha: ConfigFingerprint) {
        self.last_config_sha.store(Some(Arc::new(sha)));
    }

    fn base_root_url(&self) -> &str {
        &self.base_root_url
    }

    fn admin_api_client(&self) -> &dyn AdminApiClient {
        self.admin_api.as_ref()
    }

    fn data_plane_mode(&self) -> DataPlaneMode {
        DataPlaneMode::from(self.mode.load(Ordering::Relaxed))
    }
}

impl std::fmt::Debug for TargetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetClient")
            .field("base_root_url", &self.base_root_url)
            .field("mode", &self.data_plane_mode())
            .field("last_config_sha", &self.last_config_sha())
            .finish()
    }
}
