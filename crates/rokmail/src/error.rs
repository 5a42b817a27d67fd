use alloc::string::String;
use core::fmt;

use thiserror::Error;

/// A primitive read asked for more bytes than the buffer has left.
///
/// The cursor does not move when this is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("read of {needed} bytes at offset {offset} runs past the end of the buffer ({remaining} left)")]
pub struct OutOfBounds {
    /// Bytes the read needed.
    pub needed: usize,
    /// Bytes that were left at `offset`.
    pub remaining: usize,
    /// Cursor position when the read was attempted.
    pub offset: usize,
}

/// What went wrong in a failed decode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// A key or value was cut off by the end of the buffer.
    #[error(transparent)]
    OutOfBounds(#[from] OutOfBounds),
    /// Nested objects went deeper than [`DecoderOptions::max_depth`].
    ///
    /// [`DecoderOptions::max_depth`]: crate::DecoderOptions::max_depth
    #[error("objects nested deeper than {limit} levels")]
    NestingTooDeep {
        /// The configured limit.
        limit: usize,
    },
    /// A string held invalid UTF-8 while decoding with [`Utf8Mode::Strict`].
    ///
    /// [`Utf8Mode::Strict`]: crate::Utf8Mode::Strict
    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 {
        /// Offset of the first invalid byte.
        offset: usize,
    },
}

/// A terminal decode failure.
///
/// Carries the offset where decoding stopped and the dotted key path of the
/// value being read, if any.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}{}{}", AtOffset(.kind, .offset), InKey(.path))]
pub struct DecodeError {
    pub(crate) kind: DecodeErrorKind,
    pub(crate) offset: usize,
    pub(crate) path: String,
}

impl DecodeError {
    pub(crate) fn new(kind: impl Into<DecodeErrorKind>, offset: usize, path: String) -> Self {
        Self {
            kind: kind.into(),
            offset,
            path,
        }
    }

    /// The kind of failure.
    #[must_use]
    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }

    /// Buffer offset the failure is reported at.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Dotted key path of the value being decoded, empty at section level.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Kinds that already name an offset are not given a second one.
struct AtOffset<'a>(&'a DecodeErrorKind, &'a usize);

impl fmt::Display for AtOffset<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            DecodeErrorKind::NestingTooDeep { .. } => write!(f, " at offset {}", self.1),
            DecodeErrorKind::OutOfBounds(_) | DecodeErrorKind::InvalidUtf8 { .. } => Ok(()),
        }
    }
}

struct InKey<'a>(&'a str);

impl fmt::Display for InKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            Ok(())
        } else {
            write!(f, " in `{}`", self.0)
        }
    }
}

/// Failures while writing the wire format.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// The string does not fit a 32-bit length prefix.
    #[error("string of {len} bytes does not fit a 32-bit length prefix")]
    StringTooLong {
        /// Length of the rejected string in bytes.
        len: usize,
    },
    /// NaN and infinities have no encoding the decoder reads back.
    #[error("non-finite numbers cannot be encoded")]
    NonFiniteFloat,
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display_includes_key_path_when_present() {
        let err = DecodeError::new(
            OutOfBounds {
                needed: 8,
                remaining: 3,
                offset: 40,
            },
            40,
            "body.damage".into(),
        );
        assert_eq!(
            err.to_string(),
            "read of 8 bytes at offset 40 runs past the end of the buffer (3 left) in `body.damage`"
        );
    }

    #[test]
    fn display_names_the_offset_once() {
        let err = DecodeError::new(DecodeErrorKind::InvalidUtf8 { offset: 14 }, 14, "name".into());
        assert_eq!(err.to_string(), "invalid UTF-8 in string at offset 14 in `name`");
        assert_eq!(err.to_string().matches("offset").count(), 1);
    }

    #[test]
    fn display_omits_empty_path() {
        let err = DecodeError::new(DecodeErrorKind::NestingTooDeep { limit: 4 }, 12, String::new());
        assert_eq!(err.to_string(), "objects nested deeper than 4 levels at offset 12");
    }
}
