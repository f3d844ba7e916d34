//! JSON codec implementation.

use bytes::Bytes;
use zomekit_core::{CanonicalCodec, Codec, DecodeError, Error, Format, Schema, Value};

use crate::convert::{json_to_value, value_to_json};

/// A codec that handles JSON encoding/decoding.
///
/// Readable alternative to the canonical format. Records become objects
/// keyed by field name; decoding checks the document against the schema.
///
/// # Example
///
/// ```rust
/// use zomekit_serde::JsonCodec;
/// use zomekit_core::{Codec, Schema, Value};
///
/// let codec = JsonCodec;
/// let value = Value::from("hello");
///
/// let bytes = codec.encode(&value);
/// let decoded = codec.decode(&bytes, &Schema::String).unwrap();
///
/// assert_eq!(decoded, value);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn format(&self) -> Format {
        Format::JSON
    }

    fn encode(&self, value: &Value) -> Bytes {
        Bytes::from(value_to_json(value).to_string())
    }

    fn decode(&self, bytes: &[u8], schema: &Schema) -> Result<Value, DecodeError> {
        let json: serde_json::Value = serde_json::from_slice(bytes).map_err(|e| {
            if e.is_eof() {
                DecodeError::Truncated {
                    needed: 1,
                    remaining: 0,
                }
            } else {
                DecodeError::malformed(e.to_string())
            }
        })?;

        json_to_value(json, schema)
    }
}

/// A codec that combines multiple codecs.
///
/// Routes encode/decode to the appropriate codec based on format.
pub struct MultiCodec {
    codecs: Vec<Box<dyn Codec>>,
}

impl MultiCodec {
    /// Create an empty multi-codec.
    pub fn new() -> Self {
        Self { codecs: Vec::new() }
    }

    /// Add a codec. A later codec for the same format shadows earlier ones.
    pub fn add(&mut self, codec: impl Codec + 'static) {
        self.codecs.push(Box::new(codec));
    }

    /// Create a multi-codec with the canonical and JSON codecs included.
    pub fn with_defaults() -> Self {
        let mut mc = Self::new();
        mc.add(CanonicalCodec);
        mc.add(JsonCodec);
        mc
    }

    /// Find the codec for a format.
    pub fn codec_for(&self, format: &Format) -> Result<&dyn Codec, Error> {
        self.codecs
            .iter()
            .rev()
            .find(|c| &c.format() == format)
            .map(|c| c.as_ref())
            .ok_or_else(|| Error::UnsupportedFormat(format.clone()))
    }

    /// Keep only the codec for a format.
    pub fn into_codec(self, format: &Format) -> Result<Box<dyn Codec>, Error> {
        self.codecs
            .into_iter()
            .rev()
            .find(|c| &c.format() == format)
            .ok_or_else(|| Error::UnsupportedFormat(format.clone()))
    }

    /// Check if some codec handles `format`.
    pub fn supports(&self, format: &Format) -> bool {
        self.codec_for(format).is_ok()
    }

    /// The formats available, in registration order.
    pub fn formats(&self) -> Vec<Format> {
        self.codecs.iter().map(|c| c.format()).collect()
    }

    /// Encode with the codec for `format`.
    pub fn encode(&self, value: &Value, format: &Format) -> Result<Bytes, Error> {
        Ok(self.codec_for(format)?.encode(value))
    }

    /// Decode with the codec for `format`.
    pub fn decode(&self, bytes: &[u8], schema: &Schema, format: &Format) -> Result<Value, Error> {
        Ok(self.codec_for(format)?.decode(bytes, schema)?)
    }
}

impl Default for MultiCodec {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zomekit_core::TypedCodec;

    #[test]
    fn json_codec_roundtrip() {
        let codec = JsonCodec;
        let original = vec![Some(30i64), None];

        let bytes = codec.encode_as(&original);
        assert_eq!(&bytes[..], b"[30,null]");
        let decoded: Vec<Option<i64>> = codec.decode_as(&bytes).unwrap();

        assert_eq!(original, decoded);
    }

    #[test]
    fn cut_off_document_is_truncated() {
        let err = JsonCodec.decode(b"[1, 2", &Schema::list(Schema::Int32)).unwrap_err();
        assert!(err.is_truncated());
        assert!(JsonCodec.decode(b"", &Schema::Unit).unwrap_err().is_truncated());
    }

    #[test]
    fn syntax_errors_are_malformed() {
        let err = JsonCodec.decode(b"[1,,2]", &Schema::list(Schema::Int32)).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[test]
    fn multi_codec_routes_correctly() {
        let codec = MultiCodec::with_defaults();

        assert!(codec.supports(&Format::JSON));
        assert!(codec.supports(&Format::CANONICAL));
        assert!(!codec.supports(&Format::new("application/cbor")));
        assert_eq!(codec.formats(), vec![Format::CANONICAL, Format::JSON]);

        let value = Value::from(7);
        let json = codec.encode(&value, &Format::JSON).unwrap();
        assert_eq!(&json[..], b"7");
        let canonical = codec.encode(&value, &Format::CANONICAL).unwrap();
        assert_eq!(&canonical[..], &[7, 0, 0, 0]);

        let decoded = codec.decode(&json, &Schema::Int32, &Format::JSON).unwrap();
        assert_eq!(value, decoded);
    }

    #[test]
    fn multi_codec_rejects_unknown_formats() {
        let codec = MultiCodec::new();
        let result = codec.encode(&Value::Unit, &Format::JSON);
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn later_codecs_shadow_earlier_ones() {
        struct Loud;

        impl Codec for Loud {
            fn format(&self) -> Format {
                Format::JSON
            }

            fn encode(&self, _value: &Value) -> Bytes {
                Bytes::from_static(b"LOUD")
            }

            fn decode(&self, _bytes: &[u8], _schema: &Schema) -> Result<Value, DecodeError> {
                Ok(Value::Unit)
            }
        }

        let mut codecs = MultiCodec::with_defaults();
        codecs.add(Loud);
        let codec = codecs.into_codec(&Format::JSON).unwrap();
        assert_eq!(&codec.encode(&Value::Unit)[..], b"LOUD");
    }

    #[test]
    fn multi_codec_surfaces_decode_errors() {
        let codec = MultiCodec::default();
        let result = codec.decode(&[1, 2], &Schema::Int32, &Format::CANONICAL);
        assert!(matches!(result, Err(Error::Decode(DecodeError::Truncated { .. }))));
    }
}
