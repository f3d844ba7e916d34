//! Zomekit Wire: Low-Level Byte Primitives
//!
//! This is the narrow waist of the zomekit stack. Everything at this level is
//! pure bytes - no schemas, no field names, no value semantics.
//!
//! Use this layer for:
//! - Writing fixed-width numbers and length-prefixed strings into a buffer
//! - Reading them back with exact truncation and layout errors
//! - Building codecs that need to cross a module boundary as raw memory
//!
//! All multi-byte numbers are little-endian. Variable-length data (strings,
//! byte blobs, list counts) is prefixed with a `u32` length.
//!
//! # Example
//!
//! ```rust
//! use zomekit_wire::{WireReader, WireWriter};
//!
//! let mut writer = WireWriter::new();
//! writer.put_str("hello");
//! writer.put_i32(23);
//! let bytes = writer.finish();
//!
//! let mut reader = WireReader::new(&bytes);
//! assert_eq!(reader.get_str().unwrap(), "hello");
//! assert_eq!(reader.get_i32().unwrap(), 23);
//! reader.finish().unwrap();
//! ```

pub use bytes::Bytes;

mod error;
mod reader;
mod writer;

pub use error::DecodeError;
pub use reader::WireReader;
pub use writer::WireWriter;

/// Width in bytes of the length prefix used for strings, blobs and lists.
pub const LEN_PREFIX: usize = 4;
