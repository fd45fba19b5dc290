//! Per-resource failure reporting.
//!
//! # Data Flow
//! ```text
//! UpdateStrategy fails
//!     → Vec<ResourceError> (+ optional parse error)
//!     → translate.rs (one failure per field problem)
//!     → Vec<ResourceFailure>, surfaced to the caller with the update error
//! ```

pub mod resource;
pub mod translate;

pub use resource::{
    ObjectReference, ResourceError, ResourceErrorsParseError, ResourceFailure,
    ResourceFailureError,
};
pub use translate::resource_errors_to_resource_failures;
