//! Human-readable rendering for diagnostics.
//!
//! Diagnostic strings are lossy and one-way: they are meant for logs and
//! never parsed back.

use std::fmt::{self, Write};

use crate::{Marshal, Schema, Value};

/// A rendered, human-oriented form of a value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DiagnosticString(String);

impl DiagnosticString {
    /// Wrap an already rendered string.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the rendered text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the rendered text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DiagnosticString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DiagnosticString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<DiagnosticString> for String {
    fn from(s: DiagnosticString) -> Self {
        s.0
    }
}

/// Anything that can be handed to a diagnostic channel.
///
/// Implemented for every [`Marshal`] type (records render with their type
/// name), for [`Value`] and for `str`.
pub trait ToDiagnosticString {
    /// Render for humans. Never fails.
    fn to_diagnostic_string(&self) -> DiagnosticString;
}

impl<T: Marshal> ToDiagnosticString for T {
    fn to_diagnostic_string(&self) -> DiagnosticString {
        render(&self.to_value(), Some(&T::schema()))
    }
}

impl ToDiagnosticString for Value {
    fn to_diagnostic_string(&self) -> DiagnosticString {
        render(self, None)
    }
}

impl ToDiagnosticString for str {
    fn to_diagnostic_string(&self) -> DiagnosticString {
        DiagnosticString(self.to_string())
    }
}

impl ToDiagnosticString for DiagnosticString {
    fn to_diagnostic_string(&self) -> DiagnosticString {
        self.clone()
    }
}

/// Render any diagnosable value.
pub fn stringify<T: ToDiagnosticString + ?Sized>(value: &T) -> DiagnosticString {
    value.to_diagnostic_string()
}

fn render(value: &Value, schema: Option<&Schema>) -> DiagnosticString {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_value(&mut out, value, schema);
    DiagnosticString(out)
}

fn write_value(out: &mut String, value: &Value, schema: Option<&Schema>) -> fmt::Result {
    match value {
        Value::Unit => out.write_str("()"),
        Value::Bool(b) => write!(out, "{}", b),
        Value::Int32(i) => write!(out, "{}", i),
        Value::Int64(i) => write!(out, "{}", i),
        Value::Float64(f) => write!(out, "{:?}", f),
        Value::String(s) => write!(out, "{:?}", s),
        Value::Bytes(b) => write!(out, "0x{}", hex::encode(b)),
        Value::Optional(None) => out.write_str("null"),
        Value::Optional(Some(inner)) => {
            let inner_schema = match schema {
                Some(Schema::Optional(s)) => Some(s.as_ref()),
                _ => None,
            };
            write_value(out, inner, inner_schema)
        }
        Value::List(items) => {
            let item_schema = match schema {
                Some(Schema::List(s)) => Some(s.as_ref()),
                _ => None,
            };
            out.write_char('[')?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                write_value(out, item, item_schema)?;
            }
            out.write_char(']')
        }
        Value::Record(fields) => {
            let record = schema.and_then(Schema::as_record);
            if let Some(record) = record {
                write!(out, "{} ", record.name)?;
            }
            out.write_char('{')?;
            for (i, (name, field)) in fields.iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                let field_schema = record.and_then(|r| r.field(name)).map(|f| &f.schema);
                write!(out, "{}: ", name)?;
                write_value(out, field, field_schema)?;
            }
            out.write_char('}')
        }
    }
}
