//! Append-only buffer for fixed-width and length-prefixed data.

use bytes::{BufMut, Bytes, BytesMut};

/// Writes primitives into a growable byte buffer.
///
/// Writing never fails: every primitive has exactly one encoding.
#[derive(Debug, Default)]
pub struct WireWriter {
    buf: BytesMut,
}

impl WireWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Write a single raw byte (used for tags).
    pub fn put_tag(&mut self, tag: u8) {
        self.buf.put_u8(tag);
    }

    /// Write a boolean as `0x00` or `0x01`.
    pub fn put_bool(&mut self, value: bool) {
        self.buf.put_u8(u8::from(value));
    }

    /// Write a 32-bit signed integer (4 bytes).
    pub fn put_i32(&mut self, value: i32) {
        self.buf.put_i32_le(value);
    }

    /// Write a 64-bit signed integer (8 bytes).
    pub fn put_i64(&mut self, value: i64) {
        self.buf.put_i64_le(value);
    }

    /// Write a 64-bit float as its IEEE-754 bits (8 bytes).
    pub fn put_f64(&mut self, value: f64) {
        self.buf.put_u64_le(value.to_bits());
    }

    /// Write a length or element count prefix.
    ///
    /// # Panics
    ///
    /// Panics if `len` does not fit in a `u32`. Module memory is 32-bit
    /// addressed, so no single value built inside a module can reach that
    /// size; callers encoding host-side data must respect the same bound.
    pub fn put_len(&mut self, len: usize) {
        let len = u32::try_from(len).expect("length prefix exceeds u32::MAX");
        self.buf.put_u32_le(len);
    }

    /// Write a length-prefixed UTF-8 string.
    pub fn put_str(&mut self, value: &str) {
        self.put_bytes(value.as_bytes());
    }

    /// Write a length-prefixed byte blob.
    pub fn put_bytes(&mut self, value: &[u8]) {
        self.put_len(value.len());
        self.buf.put_slice(value);
    }

    /// Freeze the buffer into immutable bytes.
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}
