//! Gateway configuration synchronizer.
//!
//! Decides whether a gateway data plane needs a freshly computed desired
//! configuration, pushes it over a transport-appropriate strategy, and turns
//! partial failures into per-resource diagnostics and push metrics.

pub mod config;
pub mod content;
pub mod failures;
pub mod observability;
pub mod sendconfig;

pub use config::SyncConfig;
pub use content::{ConfigFingerprint, DesiredConfiguration};
pub use failures::{ResourceError, ResourceFailure};
pub use sendconfig::{SyncError, SyncOutcome, Synchronizer};
