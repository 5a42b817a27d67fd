//! Wire-format writer, the inverse of the decoder.
//!
//! Numbers are always written as big-endian `f64` (tag `0x03`), which is exact
//! for integers up to 2^53 in magnitude. `null` is written as the single byte
//! `0x00`, an unknown tag the decoder reads back as `null`.

use alloc::vec::Vec;

use crate::{
    error::EncodeError,
    tag,
    value::{Map, Number, Value},
};

/// Tag for `null`. Any byte without a meaning of its own decodes to `null`;
/// `0x00` is the conventional choice.
const NULL: u8 = 0x00;

/// Builds a payload byte by byte.
///
/// Writers that cannot fail return `&mut Self` for chaining; string writers
/// return a `Result` because the length prefix is 32 bits.
///
/// ```
/// use rokmail::Encoder;
///
/// let mut enc = Encoder::new();
/// enc.key("id").unwrap().bool(true).end();
/// assert_eq!(enc.as_bytes(), [0x04, 2, 0, 0, 0, b'i', b'd', 0x01, 0x01, 0xFF]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    /// Creates an empty encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the encoder, returning its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Appends bytes verbatim.
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Appends a single tag byte.
    pub fn tag(&mut self, tag: u8) -> &mut Self {
        self.buf.push(tag);
        self
    }

    /// Writes a key. Identical on the wire to [`string`](Self::string).
    ///
    /// # Errors
    ///
    /// [`EncodeError::StringTooLong`] past `u32::MAX` bytes.
    pub fn key(&mut self, key: &str) -> Result<&mut Self, EncodeError> {
        self.string(key)
    }

    /// Writes a string value with its tag.
    ///
    /// # Errors
    ///
    /// [`EncodeError::StringTooLong`] past `u32::MAX` bytes.
    pub fn string(&mut self, s: &str) -> Result<&mut Self, EncodeError> {
        let len = u32::try_from(s.len()).map_err(|_| EncodeError::StringTooLong { len: s.len() })?;
        self.buf.push(tag::STRING);
        self.buf.extend_from_slice(&len.to_le_bytes());
        self.buf.extend_from_slice(s.as_bytes());
        Ok(self)
    }

    /// Writes a boolean value with its tag.
    pub fn bool(&mut self, value: bool) -> &mut Self {
        self.buf.extend_from_slice(&[tag::BOOLEAN, u8::from(value)]);
        self
    }

    /// Writes a little-endian `f32` value with its tag.
    pub fn f32(&mut self, value: f32) -> &mut Self {
        self.buf.push(tag::F32);
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Writes a big-endian `f64` value with its tag.
    pub fn f64(&mut self, value: f64) -> &mut Self {
        self.buf.push(tag::F64);
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    /// Writes a `null` value.
    pub fn null(&mut self) -> &mut Self {
        self.tag(NULL)
    }

    /// Opens a nested object; close it with [`end`](Self::end).
    pub fn begin_object(&mut self) -> &mut Self {
        self.tag(tag::OBJECT)
    }

    /// Closes the current section or nested object.
    pub fn end(&mut self) -> &mut Self {
        self.tag(tag::SECTION_END)
    }

    /// Writes any value with its tag.
    ///
    /// # Errors
    ///
    /// [`EncodeError::NonFiniteFloat`] for NaN or infinite floats, and
    /// [`EncodeError::StringTooLong`] for oversized strings or keys.
    #[allow(clippy::cast_precision_loss)]
    pub fn value(&mut self, value: &Value) -> Result<&mut Self, EncodeError> {
        match value {
            Value::Null => self.null(),
            Value::Boolean(b) => self.bool(*b),
            Value::Number(Number::Int(n)) => self.f64(f64::from(*n)),
            Value::Number(Number::Long(n)) => self.f64(*n as f64),
            Value::Number(Number::Float(n)) if n.is_finite() => self.f64(*n),
            Value::Number(Number::Float(_)) => return Err(EncodeError::NonFiniteFloat),
            Value::String(s) => self.string(s)?,
            Value::Object(map) => self.begin_object().entries(map)?.end(),
        };
        Ok(self)
    }

    /// Writes the entries of `map` without opening or closing an object.
    ///
    /// # Errors
    ///
    /// As [`value`](Self::value).
    pub fn entries(&mut self, map: &Map) -> Result<&mut Self, EncodeError> {
        for (key, value) in map {
            self.key(key)?.value(value)?;
        }
        Ok(self)
    }

    /// Writes a whole section: its entries and the terminator.
    ///
    /// # Errors
    ///
    /// As [`value`](Self::value).
    pub fn section(&mut self, map: &Map) -> Result<&mut Self, EncodeError> {
        Ok(self.entries(map)?.end())
    }
}

/// Encodes sections back to back.
///
/// Decoding the result yields the same sections when every section is
/// non-empty and starts with a key the scanner accepts (printable ASCII,
/// 2 to 1023 bytes).
///
/// # Errors
///
/// As [`Encoder::value`].
pub fn encode_sections(sections: &[Map]) -> Result<Vec<u8>, EncodeError> {
    let mut enc = Encoder::new();
    for section in sections {
        enc.section(section)?;
    }
    Ok(enc.into_bytes())
}
