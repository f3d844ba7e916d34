//! The host facade.
//!
//! Everything a zome may ask of the runtime that loaded it goes through
//! [`HostApi`]. Storage, validation and networking stay on the far side.

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zomekit_core::{DecodeError, DiagnosticString, Marshal, Schema, Value};

/// Content identifier returned by the host when an entry is committed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryHash(String);

impl EntryHash {
    /// Wrap a host-issued identifier.
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Get the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Marshal for EntryHash {
    fn schema() -> Schema {
        Schema::String
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.clone())
    }

    fn from_value(value: Value) -> Result<Self, DecodeError> {
        String::from_value(value).map(Self)
    }
}

/// Errors reported by host calls.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HostError {
    /// No entry exists for this hash.
    #[error("entry not found: {0}")]
    NotFound(EntryHash),

    /// The entry type was never declared by this zome.
    #[error("unknown entry type: {0}")]
    UnknownEntryType(String),

    /// Stored bytes did not decode as the requested type.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Host-defined failure.
    #[error("host error {code}: {message}")]
    Backend {
        /// Host-specific error code.
        code: i32,
        /// Human-readable detail.
        message: String,
    },
}

/// Primitive calls offered by the host runtime.
///
/// Calls are synchronous and byte-level; [`Ctx`](crate::Ctx) layers typed
/// access on top.
pub trait HostApi {
    /// Hand a message to the host's logging channel.
    fn debug(&mut self, message: DiagnosticString);

    /// Store an encoded entry and return its identifier.
    fn commit_entry(&mut self, entry_type: &str, content: Bytes) -> Result<EntryHash, HostError>;

    /// Fetch the encoded entry stored under `hash`.
    fn get_entry(&self, hash: &EntryHash) -> Result<Bytes, HostError>;
}

impl<H: HostApi + ?Sized> HostApi for &mut H {
    fn debug(&mut self, message: DiagnosticString) {
        (**self).debug(message)
    }

    fn commit_entry(&mut self, entry_type: &str, content: Bytes) -> Result<EntryHash, HostError> {
        (**self).commit_entry(entry_type, content)
    }

    fn get_entry(&self, hash: &EntryHash) -> Result<Bytes, HostError> {
        (**self).get_entry(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_hash_marshals_as_string() {
        let hash = EntryHash::new("abc");
        assert_eq!(EntryHash::schema(), Schema::String);
        assert_eq!(hash.to_value(), Value::from("abc"));
        assert_eq!(EntryHash::from_value(Value::from("abc")).unwrap(), hash);
        assert!(EntryHash::from_value(Value::from(1)).is_err());
    }

    #[test]
    fn entry_hash_serializes_transparently() {
        let json = serde_json::to_string(&EntryHash::new("abc")).unwrap();
        assert_eq!(json, "\"abc\"");
    }

    #[test]
    fn host_error_display() {
        let err = HostError::NotFound(EntryHash::new("ff"));
        assert_eq!(err.to_string(), "entry not found: ff");
        let err = HostError::Backend {
            code: 7,
            message: "disk full".into(),
        };
        assert_eq!(err.to_string(), "host error 7: disk full");
    }
}
