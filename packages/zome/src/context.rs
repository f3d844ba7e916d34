//! Typed access to the host for application code.

use bytes::Bytes;
use indexmap::IndexMap;
use zomekit_core::{
    Codec, DecodeError, DiagnosticString, Format, Marshal, RecordType, ToDiagnosticString,
    TypedCodec,
};

use crate::entry::EntryTypeDef;
use crate::host::{EntryHash, HostApi, HostError};

/// What an exported function sees of the world during one invocation.
///
/// Wraps the host facade with the zome's codec and entry type table, so
/// application code deals in record types instead of bytes.
pub struct Ctx<'a> {
    host: &'a mut dyn HostApi,
    codec: &'a dyn Codec,
    entry_types: &'a IndexMap<String, EntryTypeDef>,
    function: &'a str,
}

impl<'a> Ctx<'a> {
    pub(crate) fn new(
        host: &'a mut dyn HostApi,
        codec: &'a dyn Codec,
        entry_types: &'a IndexMap<String, EntryTypeDef>,
        function: &'a str,
    ) -> Self {
        Self {
            host,
            codec,
            entry_types,
            function,
        }
    }

    /// Name of the function being invoked (`genesis` during genesis).
    pub fn function(&self) -> &str {
        self.function
    }

    /// The zome's wire format.
    pub fn format(&self) -> Format {
        self.codec.format()
    }

    /// Send a diagnostic rendering of `value` to the host log.
    pub fn debug<T: ToDiagnosticString + ?Sized>(&mut self, value: &T) {
        self.host.debug(value.to_diagnostic_string());
    }

    /// Commit a record as an entry of its declared entry type.
    ///
    /// Fails with [`HostError::UnknownEntryType`] without calling the host
    /// if `T` was never declared with `ZomeBuilder::entry_type`.
    pub fn commit_entry<T: RecordType>(&mut self, entry: &T) -> Result<EntryHash, HostError> {
        let entry_type = T::record_schema().name;
        if !self.entry_types.contains_key(entry_type) {
            return Err(HostError::UnknownEntryType(entry_type.to_string()));
        }
        let content = self.codec.encode_as(entry);
        self.host.commit_entry(entry_type, content)
    }

    /// Fetch and decode the entry stored under `hash`.
    pub fn get_entry<T: RecordType>(&mut self, hash: &EntryHash) -> Result<T, HostError> {
        let content = self.host.get_entry(hash)?;
        Ok(self.codec.decode_as(&content)?)
    }

    /// Encode a value with the zome's codec.
    pub fn serialize<T: Marshal>(&self, value: &T) -> Bytes {
        self.codec.encode_as(value)
    }

    /// Decode a value with the zome's codec.
    pub fn deserialize<T: Marshal>(&self, bytes: &[u8]) -> Result<T, DecodeError> {
        self.codec.decode_as(bytes)
    }

    /// Render a value for diagnostics.
    pub fn stringify<T: ToDiagnosticString + ?Sized>(&self, value: &T) -> DiagnosticString {
        value.to_diagnostic_string()
    }

    /// The underlying host, for calls not covered above.
    pub fn host(&mut self) -> &mut (dyn HostApi + 'a) {
        &mut *self.host
    }
}
