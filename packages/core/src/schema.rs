//! Static type descriptors.
//!
//! A `Schema` says how a value is laid out on the wire. Record schemas are
//! built once per record type (see `record_type!`) and shared as
//! `&'static RecordSchema`.

use std::fmt;

use serde::Serialize;

/// Describes the shape of a marshallable value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "lowercase")]
pub enum Schema {
    /// No data at all.
    Unit,
    /// `true` or `false`.
    Bool,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 64-bit float.
    Float64,
    /// UTF-8 string.
    String,
    /// Opaque binary data.
    Bytes,
    /// A value that may be absent.
    Optional(Box<Schema>),
    /// Homogeneous sequence.
    List(Box<Schema>),
    /// Named fields in a fixed order.
    Record(&'static RecordSchema),
}

impl Schema {
    /// Schema for an optional `inner`.
    pub fn optional(inner: Schema) -> Self {
        Schema::Optional(Box::new(inner))
    }

    /// Schema for a list of `inner`.
    pub fn list(inner: Schema) -> Self {
        Schema::List(Box::new(inner))
    }

    /// The record schema, if this is a record.
    pub fn as_record(&self) -> Option<&'static RecordSchema> {
        match self {
            Schema::Record(record) => Some(*record),
            _ => None,
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Unit => write!(f, "unit"),
            Schema::Bool => write!(f, "bool"),
            Schema::Int32 => write!(f, "int32"),
            Schema::Int64 => write!(f, "int64"),
            Schema::Float64 => write!(f, "float64"),
            Schema::String => write!(f, "string"),
            Schema::Bytes => write!(f, "bytes"),
            Schema::Optional(inner) => write!(f, "option<{}>", inner),
            Schema::List(inner) => write!(f, "list<{}>", inner),
            Schema::Record(record) => write!(f, "{}", record.name),
        }
    }
}

/// One named field of a record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldSchema {
    /// Field name as it appears in diagnostics and self-describing formats.
    pub name: &'static str,
    /// Field type.
    pub schema: Schema,
}

impl FieldSchema {
    /// Create a field descriptor.
    pub fn new(name: &'static str, schema: Schema) -> Self {
        Self { name, schema }
    }
}

/// The fixed field list of a record type.
///
/// Field order is the wire order; the canonical encoding carries no names.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecordSchema {
    /// Record type name.
    pub name: &'static str,
    /// Fields in declaration order.
    pub fields: Vec<FieldSchema>,
}

impl RecordSchema {
    /// Create a record descriptor.
    pub fn new(name: &'static str, fields: Vec<FieldSchema>) -> Self {
        Self { name, fields }
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;

    lazy_static! {
        static ref POINT: RecordSchema = RecordSchema::new(
            "Point",
            vec![
                FieldSchema::new("x", Schema::Int32),
                FieldSchema::new("y", Schema::Int32),
            ],
        );
    }

    #[test]
    fn display_names() {
        assert_eq!(Schema::Int32.to_string(), "int32");
        assert_eq!(Schema::optional(Schema::String).to_string(), "option<string>");
        assert_eq!(
            Schema::list(Schema::Record(&POINT)).to_string(),
            "list<Point>"
        );
    }

    #[test]
    fn field_lookup() {
        assert_eq!(POINT.len(), 2);
        assert!(!POINT.is_empty());
        assert_eq!(POINT.field("y").map(|f| &f.schema), Some(&Schema::Int32));
        assert!(POINT.field("z").is_none());
        assert_eq!(Schema::Record(&POINT).as_record().map(|r| r.name), Some("Point"));
        assert!(Schema::Bool.as_record().is_none());
    }

    #[test]
    fn serializes_with_kind_tags() {
        let json = serde_json::to_value(Schema::optional(Schema::Int32)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "optional", "of": {"kind": "int32"}})
        );

        let json = serde_json::to_value(Schema::Record(&POINT)).unwrap();
        assert_eq!(json["kind"], "record");
        assert_eq!(json["of"]["name"], "Point");
        assert_eq!(json["of"]["fields"][1]["name"], "y");
    }
}
