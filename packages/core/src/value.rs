//! The Value type - a schema-shaped tree.
//!
//! Codecs never see Rust record types directly. They encode and decode
//! `Value`s, and `Marshal` converts between the two.

use bytes::Bytes;
use indexmap::IndexMap;

use crate::schema::Schema;

/// Record fields in declaration order.
pub type Fields = IndexMap<String, Value>;

/// A dynamically-typed value whose shape mirrors a [`Schema`].
///
/// # Design Notes
///
/// - Integer widths are kept distinct so the canonical encoding can use
///   the declared width without consulting a schema
/// - Record fields use `IndexMap` so iteration follows declaration order
/// - `Optional` wraps its payload so presence is explicit on the wire
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// No data.
    #[default]
    Unit,
    /// Boolean value.
    Bool(bool),
    /// Signed 32-bit integer.
    Int32(i32),
    /// Signed 64-bit integer.
    Int64(i64),
    /// 64-bit floating point.
    Float64(f64),
    /// UTF-8 string.
    String(String),
    /// Binary data.
    Bytes(Bytes),
    /// Present or absent value.
    Optional(Option<Box<Value>>),
    /// Ordered sequence of values.
    List(Vec<Value>),
    /// Named fields (the record part).
    Record(Fields),
}

impl Value {
    /// An absent optional.
    pub fn none() -> Self {
        Value::Optional(None)
    }

    /// A present optional.
    pub fn some(value: Value) -> Self {
        Value::Optional(Some(Box::new(value)))
    }

    /// An empty record.
    pub fn record() -> Self {
        Value::Record(Fields::new())
    }

    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::Bool(_) => "bool",
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::Float64(_) => "float64",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Optional(_) => "optional",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }

    /// Check if this value is a record.
    pub fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    /// Get a field of a record value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        match self {
            Value::Record(fields) => fields.get(field),
            _ => None,
        }
    }

    /// Add or replace a field, turning a unit value into a record first.
    ///
    /// Returns `false` (and leaves the value untouched) when `self` is
    /// neither a record nor unit.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> bool {
        if matches!(self, Value::Unit) {
            *self = Value::record();
        }
        match self {
            Value::Record(fields) => {
                fields.insert(field.into(), value);
                true
            }
            _ => false,
        }
    }

    /// Check that this value has exactly the shape `schema` describes.
    ///
    /// Record fields must appear with the declared names in the declared
    /// order, since the canonical encoding relies on that order.
    pub fn conforms_to(&self, schema: &Schema) -> bool {
        match (self, schema) {
            (Value::Unit, Schema::Unit)
            | (Value::Bool(_), Schema::Bool)
            | (Value::Int32(_), Schema::Int32)
            | (Value::Int64(_), Schema::Int64)
            | (Value::Float64(_), Schema::Float64)
            | (Value::String(_), Schema::String)
            | (Value::Bytes(_), Schema::Bytes) => true,
            (Value::Optional(None), Schema::Optional(_)) => true,
            (Value::Optional(Some(inner)), Schema::Optional(schema)) => inner.conforms_to(schema),
            (Value::List(items), Schema::List(schema)) => {
                items.iter().all(|item| item.conforms_to(schema))
            }
            (Value::Record(fields), Schema::Record(record)) => {
                fields.len() == record.fields.len()
                    && fields
                        .iter()
                        .zip(&record.fields)
                        .all(|((name, value), field)| {
                            name == field.name && value.conforms_to(&field.schema)
                        })
            }
            _ => false,
        }
    }
}

// Conversion from common types

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Value::Bytes(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        Value::Optional(v.map(|inner| Box::new(inner.into())))
    }
}
