//! Tag-dispatch object parser.
//!
//! An object is a run of `(0x04, key, value-tag, value)` entries closed by
//! `0xFF`. The parser is lenient where the format is noisy:
//! - bytes that are neither a key tag nor the terminator are skipped,
//! - running out of input before a tag returns the object built so far,
//! - running out of input right after a key stores that key as `null`.
//!
//! Anything else that runs out of input is a truncated key or value whose end
//! cannot be located, and fails the decode.
//!
//! Nested objects (`0x05`) recurse into the same loop, bounded by
//! [`DecoderOptions::max_depth`].

pub(crate) mod numbers;
pub(crate) mod scanner;


use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use bstr::ByteSlice;

use crate::{
    cursor::ByteCursor,
    error::{DecodeError, DecodeErrorKind, OutOfBounds},
    options::{DecoderOptions, Utf8Mode},
    tag,
    value::{Map, Value},
};

/// Parses one object at a time from a shared cursor.
pub(crate) struct ObjectParser<'c, 'a> {
    cursor: &'c mut ByteCursor<'a>,
    options: DecoderOptions,
    /// Keys of the enclosing nested objects, outermost first.
    ancestors: Vec<String>,
}

impl<'c, 'a> ObjectParser<'c, 'a> {
    pub(crate) fn new(cursor: &'c mut ByteCursor<'a>, options: DecoderOptions) -> Self {
        Self {
            cursor,
            options,
            ancestors: Vec::new(),
        }
    }

    /// Parses entries until the terminator or the end of input.
    pub(crate) fn parse_object(&mut self) -> Result<Map, DecodeError> {
        let mut object = Map::default();
        while !self.cursor.at_end() {
            let tag = self.read_u8(None)?;
            if tag == tag::SECTION_END {
                return Ok(object);
            }
            if tag != tag::STRING {
                continue;
            }

            let key = self.read_string(None)?;
            if self.cursor.at_end() {
                object.insert(key, Value::Null);
                return Ok(object);
            }

            let head = self.read_u8(Some(&key))?;
            let value = self.parse_value(head, &key)?;
            object.insert(key, value);
        }
        Ok(object)
    }

    fn parse_value(&mut self, head: u8, name: &str) -> Result<Value, DecodeError> {
        let key = Some(name);
        let value = match head {
            tag::BOOLEAN => Value::Boolean(self.read_u8(key)? != 0),
            tag::F32 => {
                let v = self.cursor.read_f32_le().map_err(|e| self.out_of_bounds(e, key))?;
                numbers::normalize_value(f64::from(v))
            }
            tag::F64 => {
                let v = self.cursor.read_f64_be().map_err(|e| self.out_of_bounds(e, key))?;
                numbers::normalize_value(v)
            }
            tag::STRING => Value::String(self.read_string(key)?),
            tag::OBJECT => Value::Object(self.parse_nested(name)?),
            _ => Value::Null,
        };
        Ok(value)
    }

    fn parse_nested(&mut self, key: &str) -> Result<Map, DecodeError> {
        let limit = self.options.max_depth;
        if self.ancestors.len() >= limit {
            return Err(self.error(
                DecodeErrorKind::NestingTooDeep { limit },
                self.cursor.position(),
                Some(key),
            ));
        }
        self.ancestors.push(key.to_string());
        let object = self.parse_object();
        self.ancestors.pop();
        object
    }

    fn read_u8(&mut self, key: Option<&str>) -> Result<u8, DecodeError> {
        self.cursor.read_u8().map_err(|e| self.out_of_bounds(e, key))
    }

    fn read_string(&mut self, key: Option<&str>) -> Result<String, DecodeError> {
        let bytes = self
            .cursor
            .read_length_prefixed()
            .map_err(|e| self.out_of_bounds(e, key))?;
        match self.options.utf8 {
            Utf8Mode::Lossy => Ok(bytes.to_str_lossy().into_owned()),
            Utf8Mode::Strict => match core::str::from_utf8(bytes) {
                Ok(s) => Ok(s.to_string()),
                Err(e) => {
                    let start = self.cursor.position() - bytes.len();
                    let offset = start + e.valid_up_to();
                    Err(self.error(DecodeErrorKind::InvalidUtf8 { offset }, offset, key))
                }
            },
        }
    }

    fn out_of_bounds(&self, err: OutOfBounds, key: Option<&str>) -> DecodeError {
        self.error(err, err.offset, key)
    }

    fn error(
        &self,
        kind: impl Into<DecodeErrorKind>,
        offset: usize,
        key: Option<&str>,
    ) -> DecodeError {
        let mut path = self.ancestors.join(".");
        if let Some(key) = key {
            if !path.is_empty() {
                path.push('.');
            }
            path.push_str(key);
        }
        DecodeError::new(kind, offset, path)
    }
}
