//! Error types for the core layer.

use thiserror::Error;
use zomekit_wire::DecodeError;

use crate::format::Format;

/// Errors at the core layer.
///
/// Decoding failures keep their wire-level detail; codec selection adds
/// its own failure for formats nobody registered.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Bytes could not be decoded against the expected schema.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// No codec is available for the requested format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(Format),
}
