//! The canonical binary codec.
//!
//! Layout is driven entirely by the schema: no field names, no type tags
//! except the presence byte of optionals. Numbers use their declared width,
//! variable-length data carries a `u32` length prefix.

use bytes::Bytes;
use zomekit_wire::{DecodeError, WireReader, WireWriter};

use crate::format::Format;
use crate::schema::Schema;
use crate::traits::Codec;
use crate::value::{Fields, Value};

const ABSENT: u8 = 0;
const PRESENT: u8 = 1;

/// The default codec: compact, deterministic, schema-driven.
///
/// # Example
///
/// ```rust
/// use zomekit_core::{CanonicalCodec, Schema, Value};
///
/// let codec = CanonicalCodec;
/// let bytes = codec.encode_value(&Value::from(23));
/// assert_eq!(&bytes[..], &[23, 0, 0, 0]);
///
/// let decoded = codec.decode_value(&bytes, &Schema::Int32).unwrap();
/// assert_eq!(decoded, Value::from(23));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalCodec;

impl CanonicalCodec {
    /// Encode a value. Record fields are written in the value's field order.
    pub fn encode_value(&self, value: &Value) -> Bytes {
        let mut writer = WireWriter::new();
        write_value(&mut writer, value);
        writer.finish()
    }

    /// Decode exactly one value of the given schema, rejecting trailing bytes.
    pub fn decode_value(&self, bytes: &[u8], schema: &Schema) -> Result<Value, DecodeError> {
        let mut reader = WireReader::new(bytes);
        let value = read_value(&mut reader, schema)?;
        reader.finish()?;
        Ok(value)
    }
}

impl Codec for CanonicalCodec {
    fn format(&self) -> Format {
        Format::CANONICAL
    }

    fn encode(&self, value: &Value) -> Bytes {
        self.encode_value(value)
    }

    fn decode(&self, bytes: &[u8], schema: &Schema) -> Result<Value, DecodeError> {
        self.decode_value(bytes, schema)
    }
}

fn write_value(w: &mut WireWriter, value: &Value) {
    match value {
        Value::Unit => {}
        Value::Bool(b) => w.put_bool(*b),
        Value::Int32(i) => w.put_i32(*i),
        Value::Int64(i) => w.put_i64(*i),
        Value::Float64(f) => w.put_f64(*f),
        Value::String(s) => w.put_str(s),
        Value::Bytes(b) => w.put_bytes(b),
        Value::Optional(None) => w.put_tag(ABSENT),
        Value::Optional(Some(inner)) => {
            w.put_tag(PRESENT);
            write_value(w, inner);
        }
        Value::List(items) => {
            w.put_len(items.len());
            for item in items {
                write_value(w, item);
            }
        }
        Value::Record(fields) => {
            for value in fields.values() {
                write_value(w, value);
            }
        }
    }
}

fn read_value(r: &mut WireReader<'_>, schema: &Schema) -> Result<Value, DecodeError> {
    let value = match schema {
        Schema::Unit => Value::Unit,
        Schema::Bool => Value::Bool(r.get_bool()?),
        Schema::Int32 => Value::Int32(r.get_i32()?),
        Schema::Int64 => Value::Int64(r.get_i64()?),
        Schema::Float64 => Value::Float64(r.get_f64()?),
        Schema::String => Value::String(r.get_str()?.to_owned()),
        Schema::Bytes => Value::Bytes(Bytes::copy_from_slice(r.get_bytes()?)),
        Schema::Optional(inner) => match r.get_tag()? {
            ABSENT => Value::Optional(None),
            PRESENT => Value::some(read_value(r, inner)?),
            tag => {
                return Err(DecodeError::Malformed(format!(
                    "invalid presence tag 0x{:02x} at offset {}",
                    tag,
                    r.position() - 1
                )))
            }
        },
        Schema::List(inner) => {
            let count = r.get_len()?;
            // A hostile count must not drive the allocation.
            let mut items = Vec::with_capacity(count.min(r.remaining()));
            for _ in 0..count {
                items.push(read_value(r, inner)?);
            }
            Value::List(items)
        }
        Schema::Record(record) => {
            let mut fields = Fields::with_capacity(record.fields.len());
            for field in &record.fields {
                fields.insert(field.name.to_string(), read_value(r, &field.schema)?);
            }
            Value::Record(fields)
        }
    };
    Ok(value)
}
