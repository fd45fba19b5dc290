//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Synchronizer produces:
//!     → tracing events and spans (logging.rs installs the subscriber)
//!     → push outcomes through PushMetrics (metrics.rs)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Every sync run carries a sync ID span field for correlation
//! - Metrics are cheap and never block a push

pub mod logging;
pub mod metrics;

pub use self::metrics::{PrometheusPushMetrics, PushMetrics};
