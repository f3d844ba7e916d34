//! Cursor over a byte slice with exact error reporting.

use crate::{DecodeError, LEN_PREFIX};

/// Reads primitives back out of a byte slice.
///
/// Every read checks the remaining length first, so running off the end is
/// always reported as [`DecodeError::Truncated`] and never as a layout error.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Start reading at the beginning of `input`.
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(DecodeError::Truncated {
                needed: n,
                remaining,
            });
        }
        let slice = &self.input[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Read a single raw byte.
    pub fn get_tag(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take_array::<1>()?[0])
    }

    /// Read a boolean; only `0x00` and `0x01` are accepted.
    pub fn get_bool(&mut self) -> Result<bool, DecodeError> {
        match self.get_tag()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DecodeError::Malformed(format!(
                "invalid bool byte 0x{:02x} at offset {}",
                other,
                self.pos - 1
            ))),
        }
    }

    /// Read a 32-bit signed integer.
    pub fn get_i32(&mut self) -> Result<i32, DecodeError> {
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    /// Read a 64-bit signed integer.
    pub fn get_i64(&mut self) -> Result<i64, DecodeError> {
        Ok(i64::from_le_bytes(self.take_array()?))
    }

    /// Read a 64-bit float.
    pub fn get_f64(&mut self) -> Result<f64, DecodeError> {
        Ok(f64::from_bits(u64::from_le_bytes(self.take_array()?)))
    }

    /// Read a length or element count prefix.
    pub fn get_len(&mut self) -> Result<usize, DecodeError> {
        let len = u32::from_le_bytes(self.take_array::<LEN_PREFIX>()?);
        usize::try_from(len)
            .map_err(|_| DecodeError::malformed(format!("length {} exceeds address space", len)))
    }

    /// Read a length-prefixed byte blob without copying.
    pub fn get_bytes(&mut self) -> Result<&'a [u8], DecodeError> {
        let len = self.get_len()?;
        self.take(len)
    }

    /// Read a length-prefixed UTF-8 string without copying.
    pub fn get_str(&mut self) -> Result<&'a str, DecodeError> {
        let start = self.pos;
        let raw = self.get_bytes()?;
        std::str::from_utf8(raw).map_err(|e| {
            DecodeError::Malformed(format!("invalid UTF-8 in string at offset {}: {}", start, e))
        })
    }

    /// Require that the whole input was consumed.
    pub fn finish(self) -> Result<(), DecodeError> {
        match self.remaining() {
            0 => Ok(()),
            extra => Err(DecodeError::Malformed(format!(
                "{} trailing bytes after offset {}",
                extra, self.pos
            ))),
        }
    }
}
