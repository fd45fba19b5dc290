//! Desired configuration and its fingerprint.
//!
//! # Data Flow
//! ```text
//! external content producer
//!     → DesiredConfiguration (types.rs)
//!     → fingerprint.rs (canonical JSON → SHA-256)
//!     → ConfigFingerprint, compared against the target's last accepted one
//! ```

pub mod fingerprint;
pub mod types;

pub use fingerprint::{fingerprint, ConfigFingerprint, FingerprintError, ParseFingerprintError};
pub use types::{
    Certificate, Consumer, DesiredConfiguration, Plugin, Route, Service, Target, Upstream,
};
