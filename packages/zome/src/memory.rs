//! In-memory host implementation.
//!
//! This module provides a `HostApi` that keeps entries in a map and debug
//! messages in a list. It performs no validation and forgets everything
//! when dropped. Tests and the CLI run zomes against it.

use std::collections::BTreeMap;

use bytes::Bytes;
use sha2::{Digest, Sha256};
use zomekit_core::DiagnosticString;

use crate::host::{EntryHash, HostApi, HostError};

/// A committed entry.
#[derive(Debug, Clone)]
struct StoredEntry {
    entry_type: String,
    content: Bytes,
}

/// Host with in-memory storage.
///
/// Entry hashes are the hex SHA-256 of `entry_type || 0x00 || content`,
/// so committing the same entry twice yields the same hash.
#[derive(Debug, Default)]
pub struct MemoryHost {
    /// Committed entries by hash.
    entries: BTreeMap<EntryHash, StoredEntry>,
    /// Every message passed to `debug()`, in order.
    debug_log: Vec<String>,
}

impl MemoryHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the hash `commit_entry` assigns.
    pub fn hash_entry(entry_type: &str, content: &[u8]) -> EntryHash {
        let mut hasher = Sha256::new();
        hasher.update(entry_type.as_bytes());
        hasher.update([0u8]);
        hasher.update(content);
        EntryHash::new(hex::encode(hasher.finalize()))
    }

    /// Get all debug messages.
    pub fn debug_log(&self) -> &[String] {
        &self.debug_log
    }

    /// Clear the debug log.
    pub fn clear_debug_log(&mut self) {
        self.debug_log.clear();
    }

    /// Get the number of committed entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Get the entry type an entry was committed under.
    pub fn entry_type(&self, hash: &EntryHash) -> Option<&str> {
        self.entries.get(hash).map(|e| e.entry_type.as_str())
    }
}

impl HostApi for MemoryHost {
    fn debug(&mut self, message: DiagnosticString) {
        tracing::info!(target: "zomekit::host", "{}", message);
        self.debug_log.push(message.into_string());
    }

    fn commit_entry(&mut self, entry_type: &str, content: Bytes) -> Result<EntryHash, HostError> {
        let hash = Self::hash_entry(entry_type, &content);
        tracing::debug!(entry_type, %hash, len = content.len(), "committing entry");
        self.entries.insert(
            hash.clone(),
            StoredEntry {
                entry_type: entry_type.to_string(),
                content,
            },
        );
        Ok(hash)
    }

    fn get_entry(&self, hash: &EntryHash) -> Result<Bytes, HostError> {
        self.entries
            .get(hash)
            .map(|e| e.content.clone())
            .ok_or_else(|| HostError::NotFound(hash.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_then_get() {
        let mut host = MemoryHost::new();
        let hash = host
            .commit_entry("Note", Bytes::from_static(b"abc"))
            .unwrap();
        assert_eq!(host.get_entry(&hash).unwrap(), Bytes::from_static(b"abc"));
        assert_eq!(host.entry_type(&hash), Some("Note"));
        assert_eq!(host.entry_count(), 1);
    }

    #[test]
    fn hashes_are_content_addressed() {
        let mut host = MemoryHost::new();
        let a = host.commit_entry("Note", Bytes::from_static(b"x")).unwrap();
        let b = host.commit_entry("Note", Bytes::from_static(b"x")).unwrap();
        let c = host.commit_entry("Other", Bytes::from_static(b"x")).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(host.entry_count(), 2);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn type_and_content_are_separated() {
        assert_ne!(
            MemoryHost::hash_entry("ab", b"c"),
            MemoryHost::hash_entry("a", b"bc")
        );
    }

    #[test]
    fn missing_entry_is_not_found() {
        let host = MemoryHost::new();
        let hash = EntryHash::new("00");
        assert_eq!(host.get_entry(&hash), Err(HostError::NotFound(hash)));
    }

    #[test]
    fn debug_messages_are_kept_in_order() {
        let mut host = MemoryHost::new();
        host.debug(DiagnosticString::new("one"));
        host.debug(DiagnosticString::new("two"));
        assert_eq!(host.debug_log(), &["one".to_string(), "two".to_string()]);
        host.clear_debug_log();
        assert!(host.debug_log().is_empty());
    }
}
