//! Configuration change detection.

use async_trait::async_trait;
use thiserror::Error;

use crate::content::ConfigFingerprint;
use crate::sendconfig::client::{DataPlaneMode, StatusError, UpdateClient};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChangeDetectionError {
    #[error(transparent)]
    Status(#[from] StatusError),

    #[error("{0}")]
    Other(String),
}

/// Decides whether a push is needed.
///
/// An optimization only: the synchronizer bypasses it entirely when reverse
/// sync is enabled.
#[async_trait]
pub trait ConfigurationChangeDetector: Send + Sync {
    async fn has_configuration_changed(
        &self,
        old_sha: Option<&ConfigFingerprint>,
        new_sha: &ConfigFingerprint,
        client: &dyn UpdateClient,
    ) -> Result<bool, ChangeDetectionError>;
}

/// Fingerprint comparison, backed by a status check when fingerprints match.
///
/// Matching fingerprints are not enough on their own: a DB-less data plane
/// that restarted has lost its configuration while the stored fingerprint
/// still says it is current. Database-backed data planes keep their
/// configuration across restarts and report no hash, so their status is not
/// checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConfigurationChangeDetector;

#[async_trait]
impl ConfigurationChangeDetector for DefaultConfigurationChangeDetector {
    async fn has_configuration_changed(
        &self,
        old_sha: Option<&ConfigFingerprint>,
        new_sha: &ConfigFingerprint,
        client: &dyn UpdateClient,
    ) -> Result<bool, ChangeDetectionError> {
        if old_sha != Some(new_sha) {
            return Ok(true);
        }

        if client.data_plane_mode() == DataPlaneMode::Database {
            return Ok(false);
        }

        let status = client.admin_api_client().status().await?;
        if status.has_no_configuration() {
            tracing::debug!(
                url = %client.base_root_url(),
                "Data plane reports no configuration, forcing sync"
            );
            return Ok(true);
        }

        Ok(false)
    }
}
