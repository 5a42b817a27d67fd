//! Best-effort decoder for Rise of Kingdoms binary mail payloads.
//!
//! A payload is a run of sections. Each section is a sequence of tagged
//! key/value entries closed by `0xFF`:
//!
//! | Tag    | Value                                             |
//! |--------|---------------------------------------------------|
//! | `0x01` | boolean, 1 byte, non-zero is `true`               |
//! | `0x02` | `f32`, little-endian                              |
//! | `0x03` | `f64`, **big-endian**                             |
//! | `0x04` | string, `u32` little-endian length then UTF-8     |
//! | `0x05` | nested object, entries up to `0xFF`               |
//! | other  | `null`                                            |
//!
//! Keys are strings (`0x04`). Floats that hold integral values come back as
//! integers, see [`Number`]. Sections are not delimited, so the decoder
//! locates each one with a forward scan ([`find_next_key`]) and skips whatever
//! noise lies in between.
//!
//! ```
//! use rokmail::{Encoder, Value};
//!
//! let mut enc = Encoder::new();
//! enc.raw(&[0x13, 0x37]); // junk before the first section
//! enc.key("type").unwrap().string("Battle").unwrap();
//! enc.key("time").unwrap().f64(1_700_000_000.0);
//! enc.end();
//!
//! let mail = rokmail::decode(enc.as_bytes()).unwrap();
//! assert_eq!(mail.mail_type(), Some("Battle"));
//! assert_eq!(mail.time(), Some(1_700_000_000));
//! assert_eq!(mail.to_string(), r#"{"sections":[{"type":"Battle","time":1700000000}]}"#);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod cursor;
mod encode;
mod error;
mod mail;
mod options;
mod parser;
#[cfg(any(test, feature = "serde"))]
mod ser;
mod value;

#[cfg(test)]
mod tests;

use alloc::vec::Vec;

use tracing::debug;

pub use cursor::ByteCursor;
pub use encode::{Encoder, encode_sections};
pub use error::{DecodeError, DecodeErrorKind, EncodeError, OutOfBounds};
pub use mail::{EmailType, Mail};
pub use options::{DecoderOptions, Utf8Mode};
pub use parser::scanner::{MAX_KEY_LEN, MIN_KEY_LEN, SectionScanner, find_next_key};
pub use value::{Map, Number, Value};

/// Wire tag bytes.
pub mod tag {
    /// Boolean value.
    pub const BOOLEAN: u8 = 0x01;
    /// Little-endian `f32` value.
    pub const F32: u8 = 0x02;
    /// Big-endian `f64` value.
    pub const F64: u8 = 0x03;
    /// Length-prefixed string, used for keys and values.
    pub const STRING: u8 = 0x04;
    /// Nested object.
    pub const OBJECT: u8 = 0x05;
    /// Closes a section or nested object.
    pub const SECTION_END: u8 = 0xFF;
}

/// Decodes a payload with default options.
///
/// # Errors
///
/// See [`decode_with_options`].
pub fn decode(buffer: &[u8]) -> Result<Mail, DecodeError> {
    decode_with_options(buffer, DecoderOptions::default())
}

/// Decodes a payload into its sections.
///
/// Noise between sections is skipped. An empty buffer, or one without any
/// plausible key, decodes to an empty [`Mail`].
///
/// # Errors
///
/// Fails when a key or value is cut off by the end of the buffer, when objects
/// nest deeper than [`DecoderOptions::max_depth`], or on invalid UTF-8 under
/// [`Utf8Mode::Strict`]. Sections decoded before the failure are discarded.
pub fn decode_with_options(buffer: &[u8], options: DecoderOptions) -> Result<Mail, DecodeError> {
    let sections = SectionScanner::new(buffer, options).collect::<Result<Vec<_>, _>>()?;
    debug!(sections = sections.len(), bytes = buffer.len(), "decoded mail");
    Ok(Mail::new(sections))
}

/// Decodes a payload into the bare section list.
///
/// # Errors
///
/// See [`decode_with_options`].
pub fn decode_sections(buffer: &[u8]) -> Result<Vec<Map>, DecodeError> {
    decode(buffer).map(|mail| mail.sections)
}
