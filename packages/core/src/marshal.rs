//! Conversions between Rust types and `Value`.

use bytes::Bytes;
use zomekit_wire::DecodeError;

use crate::canonical::CanonicalCodec;
use crate::schema::{RecordSchema, Schema};
use crate::value::{Fields, Value};

/// A type that can cross the module boundary.
///
/// Implemented for the primitive types, `Option<T>`, `Vec<T>` and every
/// record declared with `record_type!`. `to_value` is total, so encoding a
/// well-typed value never fails.
///
/// # Size bound
///
/// Strings, byte blobs and lists are length-prefixed with a `u32`, so no
/// single one of them may exceed `u32::MAX` bytes (or elements). Module
/// memory is 32-bit addressed, so values built inside a module always fit;
/// encoding a larger one on a 64-bit host panics.
pub trait Marshal: Sized {
    /// The wire shape of this type.
    fn schema() -> Schema;

    /// Convert to a value that conforms to [`Marshal::schema`].
    fn to_value(&self) -> Value;

    /// Convert back from a value.
    ///
    /// Fails with [`DecodeError::Malformed`] when the value has a different
    /// shape, a missing field or an unknown field.
    fn from_value(value: Value) -> Result<Self, DecodeError>;
}

/// A marshallable type with a fixed set of named fields.
pub trait RecordType: Marshal {
    /// The record's schema, built once per process.
    fn record_schema() -> &'static RecordSchema;
}

/// Encode a value in the canonical format.
///
/// # Panics
///
/// Panics if a string, blob or list exceeds the `u32` length bound
/// described on [`Marshal`].
pub fn encode<T: Marshal>(value: &T) -> Bytes {
    CanonicalCodec.encode_value(&value.to_value())
}

/// Decode a value from the canonical format.
pub fn decode<T: Marshal>(bytes: &[u8]) -> Result<T, DecodeError> {
    let value = CanonicalCodec.decode_value(bytes, &T::schema())?;
    T::from_value(value)
}

fn mismatch(expected: &Schema, found: &Value) -> DecodeError {
    DecodeError::Malformed(format!("expected {}, found {}", expected, found.kind()))
}

macro_rules! impl_marshal_primitive {
    ($ty:ty, $variant:ident) => {
        impl Marshal for $ty {
            fn schema() -> Schema {
                Schema::$variant
            }

            fn to_value(&self) -> Value {
                Value::$variant(self.clone())
            }

            fn from_value(value: Value) -> Result<Self, DecodeError> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(mismatch(&Schema::$variant, &other)),
                }
            }
        }
    };
}

impl_marshal_primitive!(bool, Bool);
impl_marshal_primitive!(i32, Int32);
impl_marshal_primitive!(i64, Int64);
impl_marshal_primitive!(f64, Float64);
impl_marshal_primitive!(String, String);
impl_marshal_primitive!(Bytes, Bytes);

impl Marshal for () {
    fn schema() -> Schema {
        Schema::Unit
    }

    fn to_value(&self) -> Value {
        Value::Unit
    }

    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Unit => Ok(()),
            other => Err(mismatch(&Schema::Unit, &other)),
        }
    }
}

impl<T: Marshal> Marshal for Option<T> {
    fn schema() -> Schema {
        Schema::optional(T::schema())
    }

    fn to_value(&self) -> Value {
        Value::Optional(self.as_ref().map(|inner| Box::new(inner.to_value())))
    }

    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Optional(None) => Ok(None),
            Value::Optional(Some(inner)) => T::from_value(*inner).map(Some),
            other => Err(mismatch(&Self::schema(), &other)),
        }
    }
}

impl<T: Marshal> Marshal for Vec<T> {
    fn schema() -> Schema {
        Schema::list(T::schema())
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(Marshal::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(mismatch(&Self::schema(), &other)),
        }
    }
}

impl Value {
    /// Unwrap the fields of a record value.
    pub fn into_record(self, record: &str) -> Result<Fields, DecodeError> {
        match self {
            Value::Record(fields) => Ok(fields),
            other => Err(DecodeError::Malformed(format!(
                "expected record {}, found {}",
                record,
                other.kind()
            ))),
        }
    }
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Check at compile time whether two fields share a wire name.
pub const fn has_duplicate_names(names: &[&str]) -> bool {
    let mut i = 0;
    while i < names.len() {
        let mut j = i + 1;
        while j < names.len() {
            if str_eq(names[i], names[j]) {
                return true;
            }
            j += 1;
        }
        i += 1;
    }
    false
}

/// Remove a field from a record being decoded.
pub fn take_field(fields: &mut Fields, record: &str, field: &str) -> Result<Value, DecodeError> {
    fields.shift_remove(field).ok_or_else(|| {
        DecodeError::Malformed(format!("record {} is missing field {}", record, field))
    })
}

/// Reject fields left over after every declared field was taken.
pub fn finish_record(fields: Fields, record: &str) -> Result<(), DecodeError> {
    match fields.keys().next() {
        None => Ok(()),
        Some(extra) => Err(DecodeError::Malformed(format!(
            "record {} has unknown field {}",
            record, extra
        ))),
    }
}
