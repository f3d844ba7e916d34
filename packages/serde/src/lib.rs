//! Serde Integration for zomekit
//!
//! This layer offers JSON as an alternative wire format. It adds:
//! - `JsonCodec`: A codec for `application/json`
//! - `MultiCodec`: Routes encode/decode by `Format`
//! - Value <-> `serde_json::Value` conversions, guided by a `Schema`
//!
//! # Example
//!
//! ```rust
//! use zomekit_core::{record_type, TypedCodec};
//! use zomekit_serde::JsonCodec;
//!
//! record_type! {
//!     #[derive(Debug, PartialEq)]
//!     pub struct TestClass {
//!         pub key: String,
//!         pub other_key as "otherKey": i32,
//!     }
//! }
//!
//! let value = TestClass { key: "hello".into(), other_key: 23 };
//! let bytes = JsonCodec.encode_as(&value);
//! assert_eq!(&bytes[..], br#"{"key":"hello","otherKey":23}"#);
//! assert_eq!(JsonCodec.decode_as::<TestClass>(&bytes).unwrap(), value);
//! ```

pub use bytes::Bytes;

mod codec;
mod convert;

pub use codec::{JsonCodec, MultiCodec};
pub use convert::{from_json, json_to_value, to_json, value_to_json};

// Re-export core types for convenience
pub use zomekit_core::{Codec, DecodeError, Error, Format, Schema, TypedCodec, Value};
