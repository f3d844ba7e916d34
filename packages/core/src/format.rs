//! Format identifiers for wire encodings.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Names the wire encoding used for a canonical form.
///
/// This uses MIME-type-like strings for familiarity. A zome picks one
/// format for everything crossing its boundary; codecs report the format
/// they implement.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Format(pub Cow<'static, str>);

impl Format {
    /// The schema-driven binary layout (`application/x-zomekit-canonical`).
    pub const CANONICAL: Format = Format(Cow::Borrowed("application/x-zomekit-canonical"));

    /// JSON (`application/json`).
    pub const JSON: Format = Format(Cow::Borrowed("application/json"));

    /// Create a format from a static string.
    pub const fn from_static(s: &'static str) -> Self {
        Format(Cow::Borrowed(s))
    }

    /// Create a format from an owned string.
    pub fn new(s: impl Into<String>) -> Self {
        Format(Cow::Owned(s.into()))
    }

    /// Get the format string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is the canonical binary format.
    pub fn is_canonical(&self) -> bool {
        self == &Self::CANONICAL
    }

    /// Check if this is JSON format.
    pub fn is_json(&self) -> bool {
        self == &Self::JSON
    }
}

impl Default for Format {
    fn default() -> Self {
        Self::CANONICAL
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&'static str> for Format {
    fn from(s: &'static str) -> Self {
        Format(Cow::Borrowed(s))
    }
}

impl From<String> for Format {
    fn from(s: String) -> Self {
        Format(Cow::Owned(s))
    }
}

impl AsRef<str> for Format {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
