//! Zomekit Core: Record Serializer
//!
//! This layer gives meaning to the raw bytes of `zomekit-wire`:
//! - `Schema`: Static description of a marshallable type
//! - `Value`: Schema-shaped tree that codecs read and write
//! - `Marshal` / `RecordType`: Conversion between Rust types and `Value`
//! - `Codec`: Pluggable wire encoding, with `CanonicalCodec` as the default
//! - `ToDiagnosticString`: Human-readable rendering for logs
//!
//! Record types are declared with [`record_type!`], which builds the schema
//! once and implements the conversions.
//!
//! # Example
//!
//! ```rust
//! use zomekit_core::{decode, encode, record_type, stringify};
//!
//! record_type! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub struct TestClass {
//!         pub key: String,
//!         pub other_key as "otherKey": i32,
//!     }
//! }
//!
//! let value = TestClass { key: "hello".into(), other_key: 23 };
//! let bytes = encode(&value);
//! assert_eq!(decode::<TestClass>(&bytes).unwrap(), value);
//! assert_eq!(
//!     stringify(&value).as_str(),
//!     r#"TestClass {key: "hello", otherKey: 23}"#
//! );
//! ```

pub use bytes::Bytes;
pub use zomekit_wire::DecodeError;

mod canonical;
mod diagnostic;
mod error;
mod format;
mod macros;
mod marshal;
mod schema;
mod traits;
mod value;

pub use canonical::CanonicalCodec;
pub use diagnostic::{stringify, DiagnosticString, ToDiagnosticString};
pub use error::Error;
pub use format::Format;
pub use marshal::{decode, encode, Marshal, RecordType};
pub use schema::{FieldSchema, RecordSchema, Schema};
pub use traits::{Codec, TypedCodec};
pub use value::{Fields, Value};

#[doc(hidden)]
pub mod __private {
    pub use lazy_static::lazy_static;

    pub use crate::marshal::{finish_record, has_duplicate_names, take_field};
}
