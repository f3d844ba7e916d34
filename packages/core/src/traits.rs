//! Core traits: Codec and its typed extension.

use std::sync::Arc;

use bytes::Bytes;
use zomekit_wire::DecodeError;

use crate::{Format, Marshal, Schema, Value};

/// Codec for converting between `Value` and bytes.
///
/// The rest of the stack never assumes a concrete byte layout; it only
/// relies on this contract:
/// - `encode` is deterministic and total
/// - `decode(encode(v), schema) == v` whenever `v` conforms to `schema`
/// - `decode` rejects input that does not describe exactly one value
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn Codec>`.
///
/// # Implementing Custom Codecs
///
/// ```rust
/// use zomekit_core::{Bytes, Codec, DecodeError, Format, Schema, Value};
///
/// struct DebugCodec;
///
/// impl Codec for DebugCodec {
///     fn format(&self) -> Format {
///         Format::from_static("text/x-debug")
///     }
///
///     fn encode(&self, value: &Value) -> Bytes {
///         Bytes::from(format!("{:?}", value))
///     }
///
///     fn decode(&self, _bytes: &[u8], schema: &Schema) -> Result<Value, DecodeError> {
///         Err(DecodeError::malformed(format!("cannot parse {} from debug text", schema)))
///     }
/// }
/// ```
pub trait Codec: Send + Sync {
    /// The format this codec produces and accepts.
    fn format(&self) -> Format;

    /// Encode a value into bytes.
    ///
    /// Total for every value within the size bound documented on
    /// [`Marshal`](crate::Marshal).
    fn encode(&self, value: &Value) -> Bytes;

    /// Decode bytes into a value of the given schema.
    fn decode(&self, bytes: &[u8], schema: &Schema) -> Result<Value, DecodeError>;
}

impl<T: Codec + ?Sized> Codec for &T {
    fn format(&self) -> Format {
        (**self).format()
    }

    fn encode(&self, value: &Value) -> Bytes {
        (**self).encode(value)
    }

    fn decode(&self, bytes: &[u8], schema: &Schema) -> Result<Value, DecodeError> {
        (**self).decode(bytes, schema)
    }
}

impl<T: Codec + ?Sized> Codec for Box<T> {
    fn format(&self) -> Format {
        self.as_ref().format()
    }

    fn encode(&self, value: &Value) -> Bytes {
        self.as_ref().encode(value)
    }

    fn decode(&self, bytes: &[u8], schema: &Schema) -> Result<Value, DecodeError> {
        self.as_ref().decode(bytes, schema)
    }
}

impl<T: Codec + ?Sized> Codec for Arc<T> {
    fn format(&self) -> Format {
        self.as_ref().format()
    }

    fn encode(&self, value: &Value) -> Bytes {
        self.as_ref().encode(value)
    }

    fn decode(&self, bytes: &[u8], schema: &Schema) -> Result<Value, DecodeError> {
        self.as_ref().decode(bytes, schema)
    }
}

/// Extension trait for typed encoding.
///
/// Automatically implemented for every `Codec`, including `dyn Codec`.
///
/// # Example
///
/// ```rust
/// use zomekit_core::{CanonicalCodec, Codec, TypedCodec};
///
/// let codec: &dyn Codec = &CanonicalCodec;
/// let bytes = codec.encode_as(&vec![1i32, 2, 3]);
/// let back: Vec<i32> = codec.decode_as(&bytes).unwrap();
/// assert_eq!(back, vec![1, 2, 3]);
/// ```
pub trait TypedCodec: Codec {
    /// Serialize a Rust value.
    fn encode_as<T: Marshal>(&self, data: &T) -> Bytes {
        self.encode(&data.to_value())
    }

    /// Deserialize a Rust value.
    ///
    /// This method:
    /// 1. Decodes the bytes to a Value against `T::schema()`
    /// 2. Converts the Value to the target type
    fn decode_as<T: Marshal>(&self, bytes: &[u8]) -> Result<T, DecodeError> {
        let value = self.decode(bytes, &T::schema())?;
        T::from_value(value)
    }
}

// Blanket implementation for all Codecs
impl<C: Codec + ?Sized> TypedCodec for C {}
