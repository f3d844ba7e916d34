//! Error types for the function exporter.

use std::fmt;

use bytes::Bytes;
use thiserror::Error;
use zomekit_core::DecodeError;

use crate::host::HostError;

/// Errors raised while building the export table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    /// A function with this name is already registered.
    #[error("function already registered: {0}")]
    DuplicateName(String),

    /// An entry type with this name is already declared.
    #[error("entry type already declared: {0}")]
    DuplicateEntryType(String),

    /// A link names an entry type that was never declared.
    #[error("unknown entry type: {0}")]
    UnknownEntryType(String),

    /// The same link is declared twice.
    #[error("link {entry_type} -> {target} ({tag}) already declared")]
    DuplicateLink {
        /// Entry type the link starts from.
        entry_type: String,
        /// Entry type the link points to.
        target: String,
        /// Link tag.
        tag: String,
    },

    /// The parameter names do not match the handler's arity.
    #[error("{function} takes {arity} parameters but {given} names were given")]
    ParamNames {
        /// Function being registered.
        function: String,
        /// Parameters the handler takes.
        arity: usize,
        /// Names supplied.
        given: usize,
    },

    /// The configured wire format has no codec.
    #[error("codec error: {0}")]
    Codec(#[from] zomekit_core::Error),
}

/// Errors surfaced to the host by [`Zome::invoke`](crate::Zome::invoke).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvocationError {
    /// No function is registered under this name.
    #[error("function not found: {0}")]
    NotFound(String),

    /// The host passed the wrong number of arguments.
    #[error("{function} expects {expected} arguments, got {given}")]
    ArgumentCount {
        /// Function being invoked.
        function: String,
        /// Declared parameter count.
        expected: usize,
        /// Arguments received.
        given: usize,
    },

    /// An argument did not decode against its declared schema.
    #[error("bad argument {index} for {function}: {source}")]
    BadArgument {
        /// Function being invoked.
        function: String,
        /// Zero-based argument position.
        index: usize,
        /// Why decoding failed.
        source: DecodeError,
    },

    /// The implementation failed. The payload is passed through untouched.
    #[error("application error: {0}")]
    ApplicationError(AppError),
}

/// Errors loading a zome configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid configuration.
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// An opaque failure payload produced by application code.
///
/// The exporter never inspects it; it reaches the host exactly as the
/// implementation built it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppError(Bytes);

impl AppError {
    /// Wrap an arbitrary payload.
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self(payload.into())
    }

    /// A payload holding a UTF-8 message.
    pub fn msg(message: impl fmt::Display) -> Self {
        Self(Bytes::from(message.to_string()))
    }

    /// The raw payload.
    pub fn payload(&self) -> &Bytes {
        &self.0
    }

    /// Take the raw payload.
    pub fn into_payload(self) -> Bytes {
        self.0
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match std::str::from_utf8(&self.0) {
            Ok(text) => f.write_str(text),
            Err(_) => write!(f, "<{} byte payload>", self.0.len()),
        }
    }
}

impl std::error::Error for AppError {}

impl From<&str> for AppError {
    fn from(message: &str) -> Self {
        Self::msg(message)
    }
}

impl From<String> for AppError {
    fn from(message: String) -> Self {
        Self(Bytes::from(message))
    }
}

impl From<HostError> for AppError {
    fn from(err: HostError) -> Self {
        Self::msg(err)
    }
}

impl From<DecodeError> for AppError {
    fn from(err: DecodeError) -> Self {
        Self::msg(err)
    }
}
