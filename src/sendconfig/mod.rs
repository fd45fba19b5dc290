//! Configuration push subsystem.
//!
//! # Data Flow
//! ```text
//! DesiredConfiguration + UpdateClient
//!     → update.rs computes the new fingerprint
//!     → detector.rs decides whether to push (bypassed by reverse sync)
//!     → strategy.rs resolves a transport for the target
//!     → UpdateStrategy::update
//!         ok:  success metric, fingerprint committed on client.rs
//!         err: failures translated, failure metric
//! ```
//!
//! # Design Decisions
//! - Strategies and detectors are traits; concrete transports live outside
//! - The synchronizer owns no per-target state
//! - Metrics and logging are side channels and never change the outcome

pub mod client;
pub mod detector;
pub mod strategy;
pub mod update;

pub use client::{
    AdminApiClient, DataPlaneMode, DataPlaneStatus, StatusError, TargetClient, TargetClientError,
    UpdateClient, EMPTY_CONFIGURATION_HASH,
};
pub use detector::{
    ChangeDetectionError, ConfigurationChangeDetector, DefaultConfigurationChangeDetector,
};
pub use strategy::{
    DataPlaneModeResolver, MetricsProtocol, UpdateError, UpdateFailure, UpdateStrategy,
    UpdateStrategyResolver,
};
pub use update::{SyncError, SyncOutcome, Synchronizer};
