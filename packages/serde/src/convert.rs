//! Conversions between Value and serde_json::Value.
//!
//! JSON carries less type information than a `Value`, so the way back is
//! guided by a schema.

use base64::Engine;
use zomekit_core::{DecodeError, Fields, Marshal, Schema, Value};

const NAN: &str = "NaN";
const INFINITY: &str = "Infinity";
const NEG_INFINITY: &str = "-Infinity";

fn non_finite_name(f: f64) -> &'static str {
    if f.is_nan() {
        NAN
    } else if f.is_sign_positive() {
        INFINITY
    } else {
        NEG_INFINITY
    }
}

/// Convert a Rust value to JSON.
pub fn to_json<T: Marshal>(data: &T) -> serde_json::Value {
    value_to_json(&data.to_value())
}

/// Convert JSON to a Rust value, using the type's schema.
pub fn from_json<T: Marshal>(json: serde_json::Value) -> Result<T, DecodeError> {
    let value = json_to_value(json, &T::schema())?;
    T::from_value(value)
}

/// Convert our Value to serde_json::Value.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Unit | Value::Optional(None) => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int32(i) => serde_json::Value::Number((*i).into()),
        Value::Int64(i) => serde_json::Value::Number((*i).into()),
        Value::Float64(f) => match serde_json::Number::from_f64(*f) {
            Some(n) => serde_json::Value::Number(n),
            // JSON has no non-finite numbers; null stays reserved for absent optionals.
            None => serde_json::Value::String(non_finite_name(*f).to_string()),
        },
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Bytes(b) => {
            // JSON doesn't have bytes, so we base64 encode
            let encoded = base64::engine::general_purpose::STANDARD.encode(b);
            serde_json::Value::String(encoded)
        }
        Value::Optional(Some(inner)) => value_to_json(inner),
        Value::List(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
        Value::Record(fields) => serde_json::Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
    }
}

/// Convert serde_json::Value to our Value, checking it against `schema`.
pub fn json_to_value(json: serde_json::Value, schema: &Schema) -> Result<Value, DecodeError> {
    use serde_json::Value as Json;

    let value = match (schema, json) {
        (Schema::Unit, Json::Null) => Value::Unit,
        (Schema::Bool, Json::Bool(b)) => Value::Bool(b),
        (Schema::Int32, Json::Number(n)) => {
            let i = n
                .as_i64()
                .and_then(|i| i32::try_from(i).ok())
                .ok_or_else(|| DecodeError::malformed(format!("{} is not an int32", n)))?;
            Value::Int32(i)
        }
        (Schema::Int64, Json::Number(n)) => {
            let i = n
                .as_i64()
                .ok_or_else(|| DecodeError::malformed(format!("{} is not an int64", n)))?;
            Value::Int64(i)
        }
        (Schema::Float64, Json::Number(n)) => {
            let f = n
                .as_f64()
                .ok_or_else(|| DecodeError::malformed(format!("{} is not a float64", n)))?;
            Value::Float64(f)
        }
        (Schema::Float64, Json::String(s)) => match s.as_str() {
            NAN => Value::Float64(f64::NAN),
            INFINITY => Value::Float64(f64::INFINITY),
            NEG_INFINITY => Value::Float64(f64::NEG_INFINITY),
            other => {
                return Err(DecodeError::malformed(format!(
                    "{:?} is not a float64",
                    other
                )))
            }
        },
        (Schema::String, Json::String(s)) => Value::String(s),
        (Schema::Bytes, Json::String(s)) => {
            let decoded = base64::engine::general_purpose::STANDARD
                .decode(s.as_bytes())
                .map_err(|e| DecodeError::malformed(format!("invalid base64: {}", e)))?;
            Value::Bytes(decoded.into())
        }
        (Schema::Optional(_), Json::Null) => Value::none(),
        (Schema::Optional(inner), json) => Value::some(json_to_value(json, inner)?),
        (Schema::List(inner), Json::Array(items)) => Value::List(
            items
                .into_iter()
                .map(|item| json_to_value(item, inner))
                .collect::<Result<_, _>>()?,
        ),
        (Schema::Record(record), Json::Object(mut object)) => {
            let mut fields = Fields::with_capacity(record.fields.len());
            for field in &record.fields {
                let json = object.remove(field.name).ok_or_else(|| {
                    DecodeError::malformed(format!(
                        "record {} is missing field {}",
                        record.name, field.name
                    ))
                })?;
                fields.insert(field.name.to_string(), json_to_value(json, &field.schema)?);
            }
            if let Some(extra) = object.keys().next() {
                return Err(DecodeError::malformed(format!(
                    "record {} has unknown field {}",
                    record.name, extra
                )));
            }
            Value::Record(fields)
        }
        (schema, json) => {
            return Err(DecodeError::malformed(format!(
                "expected {}, found {}",
                schema,
                json_kind(&json)
            )))
        }
    };
    Ok(value)
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
