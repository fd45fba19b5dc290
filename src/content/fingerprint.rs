//! Content fingerprinting.
//!
//! A fingerprint is the SHA-256 digest of the canonical JSON encoding of a
//! document: every object is re-keyed in lexicographic order before being
//! encoded compactly. Two documents that differ only in map key order, or in
//! the iteration order of a hash map, fingerprint identically.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;

pub const FINGERPRINT_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum FingerprintError {
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFingerprintError {
    #[error("expected {expected} hex characters, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("invalid hex character {0:?}")]
    InvalidHex(char),
}

/// Fixed-size content identifier of a desired configuration.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfigFingerprint([u8; FINGERPRINT_LEN]);

impl ConfigFingerprint {
    pub const fn from_bytes(bytes: [u8; FINGERPRINT_LEN]) -> Self {
        Self(bytes)
    }

    /// First 12 hex characters, for log lines.
    pub fn short(&self) -> String {
        let mut out = self.to_string();
        out.truncate(12);
        out
    }
}

impl fmt::Display for ConfigFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for ConfigFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigFingerprint({})", self)
    }
}

impl FromStr for ConfigFingerprint {
    type Err = ParseFingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != FINGERPRINT_LEN * 2 {
            return Err(ParseFingerprintError::Length {
                expected: FINGERPRINT_LEN * 2,
                actual: s.len(),
            });
        }

        let mut bytes = [0u8; FINGERPRINT_LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|e| match e {
            hex::FromHexError::InvalidHexCharacter { c, .. } => {
                ParseFingerprintError::InvalidHex(c)
            }
            _ => ParseFingerprintError::Length {
                expected: FINGERPRINT_LEN * 2,
                actual: s.len(),
            },
        })?;
        Ok(Self(bytes))
    }
}

impl Serialize for ConfigFingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ConfigFingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Compute the fingerprint of a serializable document.
///
/// Fails only when the document cannot be represented as JSON (for example a
/// map with non-string keys).
pub fn fingerprint<T: Serialize + ?Sized>(doc: &T) -> Result<ConfigFingerprint, FingerprintError> {
    let canonical = canonicalize(serde_json::to_value(doc)?);
    let encoded = serde_json::to_vec(&canonical)?;

    let mut hasher = Sha256::new();
    hasher.update(&encoded);

    let mut bytes = [0u8; FINGERPRINT_LEN];
    bytes.copy_from_slice(&hasher.finalize());
    Ok(ConfigFingerprint(bytes))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, canonicalize(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}
