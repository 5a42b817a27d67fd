//! Bounds-checked reads over an immutable byte buffer.
//!
//! Every read either succeeds and advances the position by exactly the bytes
//! it consumed, or fails with [`OutOfBounds`] and leaves the position where
//! it was. Callers can therefore abandon a failed read without rewinding.
//!
//! Widths and byte orders follow the wire format: 32-bit integers and floats
//! are little-endian, 64-bit floats are big-endian.

use alloc::borrow::Cow;

use bstr::ByteSlice;

use crate::error::OutOfBounds;

/// A read position over a borrowed byte buffer.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buffer: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor at offset 0.
    #[must_use]
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, pos: 0 }
    }

    /// The whole underlying buffer, independent of the position.
    #[must_use]
    pub const fn buffer(&self) -> &'a [u8] {
        self.buffer
    }

    /// Current read offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns `true` once every byte has been consumed.
    #[must_use]
    pub const fn at_end(&self) -> bool {
        self.pos >= self.buffer.len()
    }

    /// Bytes left to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.pos)
    }

    /// Moves to `offset`, clamped into `0..=len`.
    pub fn seek(&mut self, offset: usize) {
        self.pos = offset.min(self.buffer.len());
    }

    /// Reads one byte.
    ///
    /// # Errors
    ///
    /// [`OutOfBounds`] when the buffer is exhausted.
    pub fn read_u8(&mut self) -> Result<u8, OutOfBounds> {
        let [byte] = self.take_array::<1>()?;
        Ok(byte)
    }

    /// Reads a little-endian `u32`.
    ///
    /// # Errors
    ///
    /// [`OutOfBounds`] when fewer than 4 bytes remain.
    pub fn read_u32_le(&mut self) -> Result<u32, OutOfBounds> {
        self.take_array().map(u32::from_le_bytes)
    }

    /// Reads a little-endian IEEE-754 single.
    ///
    /// # Errors
    ///
    /// [`OutOfBounds`] when fewer than 4 bytes remain.
    pub fn read_f32_le(&mut self) -> Result<f32, OutOfBounds> {
        self.read_u32_le().map(f32::from_bits)
    }

    /// Reads a **big-endian** IEEE-754 double.
    ///
    /// # Errors
    ///
    /// [`OutOfBounds`] when fewer than 8 bytes remain.
    pub fn read_f64_be(&mut self) -> Result<f64, OutOfBounds> {
        self.take_array().map(f64::from_be_bytes)
    }

    /// Reads a little-endian `u32` length followed by that many bytes.
    ///
    /// # Errors
    ///
    /// [`OutOfBounds`] when either the length field or the payload runs past
    /// the end. The length field is not consumed in that case.
    pub fn read_length_prefixed(&mut self) -> Result<&'a [u8], OutOfBounds> {
        let start = self.pos;
        let len = self.read_u32_le()?;
        // A length that does not fit `usize` cannot fit the buffer either.
        let len = usize::try_from(len).unwrap_or(usize::MAX);
        self.take(len).inspect_err(|_| self.pos = start)
    }

    /// Reads a length-prefixed string, replacing invalid UTF-8 with U+FFFD.
    ///
    /// # Errors
    ///
    /// Same as [`read_length_prefixed`](Self::read_length_prefixed).
    pub fn read_length_prefixed_utf8(&mut self) -> Result<Cow<'a, str>, OutOfBounds> {
        self.read_length_prefixed().map(ByteSlice::to_str_lossy)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], OutOfBounds> {
        let remaining = self.remaining();
        if remaining < len {
            return Err(OutOfBounds {
                needed: len,
                remaining,
                offset: self.pos,
            });
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.buffer[start..self.pos])
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], OutOfBounds> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }
}
