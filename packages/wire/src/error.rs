//! Error types for the wire layer.
//!
//! Only two things can go wrong when reading bytes back: there are not
//! enough of them, or they do not have the expected shape.

use thiserror::Error;

/// Errors produced while decoding a canonical byte sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The input ended before the layout was complete.
    #[error("truncated input: needed {needed} more bytes, {remaining} remaining")]
    Truncated {
        /// Bytes required by the next read.
        needed: usize,
        /// Bytes actually left in the input.
        remaining: usize,
    },

    /// The bytes do not match the expected field sequence or types.
    #[error("malformed input: {0}")]
    Malformed(String),
}

impl DecodeError {
    /// Build a `Malformed` error from anything displayable.
    pub fn malformed(message: impl Into<String>) -> Self {
        DecodeError::Malformed(message.into())
    }

    /// Check if this error reports missing bytes.
    pub fn is_truncated(&self) -> bool {
        matches!(self, DecodeError::Truncated { .. })
    }
}
