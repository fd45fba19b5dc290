//! Resource-level error and failure types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw validation problems reported by a data plane for one source object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResourceError {
    pub kind: String,
    pub api_version: String,
    pub namespace: String,
    pub name: String,
    pub uid: String,
    /// Field name → problem description.
    pub problems: BTreeMap<String, String>,
}

impl ResourceError {
    /// Identity of the object these problems belong to.
    pub fn object_reference(&self) -> ObjectReference {
        ObjectReference {
            kind: self.kind.clone(),
            api_version: self.api_version.clone(),
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            uid: self.uid.clone(),
        }
    }
}

/// The response carrying resource errors could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse resource errors: {0}")]
pub struct ResourceErrorsParseError(pub String);

/// Identity metadata of the object that caused a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct ObjectReference {
    pub kind: String,
    pub api_version: String,
    pub namespace: String,
    pub name: String,
    pub uid: String,
}

impl fmt::Display for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}/{}", self.kind, self.name)
        } else {
            write!(f, "{}/{}/{}", self.kind, self.namespace, self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceFailureError {
    #[error("failure message cannot be empty")]
    EmptyMessage,

    #[error("causing object has no kind (name: {name:?})")]
    MissingKind { name: String },

    #[error("causing object has no name (kind: {kind:?})")]
    MissingName { kind: String },
}

/// User-facing diagnostic tied to the object that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResourceFailure {
    message: String,
    causing_object: ObjectReference,
}

impl ResourceFailure {
    /// Build a failure, rejecting an empty message or an object without a
    /// kind or name.
    pub fn new(
        message: impl Into<String>,
        causing_object: ObjectReference,
    ) -> Result<Self, ResourceFailureError> {
        let message = message.into();
        if message.is_empty() {
            return Err(ResourceFailureError::EmptyMessage);
        }
        if causing_object.kind.is_empty() {
            return Err(ResourceFailureError::MissingKind {
                name: causing_object.name,
            });
        }
        if causing_object.name.is_empty() {
            return Err(ResourceFailureError::MissingName {
                kind: causing_object.kind,
            });
        }

        Ok(Self {
            message,
            causing_object,
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn causing_object(&self) -> &ObjectReference {
        &self.causing_object
    }
}

impl fmt::Display for ResourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.causing_object, self.message)
    }
}
