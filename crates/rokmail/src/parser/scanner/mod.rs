//! Section scanner: finds where sections start and drives the object parser.
//!
//! Payloads come from a client that does not frame them cleanly. They can
//! start mid-stream, carry headers or garbage between sections, or hold stray
//! `0x04` bytes inside binary data. Before each section the scanner looks
//! forward for the first offset that plausibly starts a key:
//!
//! - the byte is the string tag `0x04`,
//! - the little-endian length after it is in `MIN_KEY_LEN..MAX_KEY_LEN`,
//! - the key fits in the buffer and is printable ASCII (`0x20..=0x7E`).
//!
//! The thresholds were tuned against real payloads and are kept as-is.
//!
//! Invariants
//! - [`find_next_key`] never moves a cursor; it is a pure function of the
//!   buffer and a start offset.
//! - Every parsed section consumes at least one byte. If one ever does not,
//!   the scan halts, so total work is linear in the buffer length.


use core::iter::FusedIterator;

use tracing::{debug, trace, warn};

use crate::{
    cursor::ByteCursor, error::DecodeError, options::DecoderOptions, parser::ObjectParser, tag,
    value::Map,
};

/// Keys this long or longer are rejected as implausible.
pub const MAX_KEY_LEN: usize = 1024;

/// Keys shorter than this are rejected; one printable byte after a stray
/// `0x04` is too easy to hit by accident.
pub const MIN_KEY_LEN: usize = 2;

/// Tag byte, length field, and the shortest accepted key.
const MIN_CANDIDATE_LEN: usize = 1 + 4 + MIN_KEY_LEN;

/// Returns the first offset at or after `start` that plausibly begins a key.
///
/// ```
/// // Three bytes of noise, then the key "id" holding `true`.
/// let buf = [0x00, 0x04, 0x09, 0x04, 2, 0, 0, 0, b'i', b'd', 0x01, 0x01, 0xFF];
/// assert_eq!(rokmail::find_next_key(&buf, 0), Some(3));
/// assert_eq!(rokmail::find_next_key(&buf, 4), None);
/// ```
#[must_use]
pub fn find_next_key(buffer: &[u8], start: usize) -> Option<usize> {
    let last = buffer.len().checked_sub(MIN_CANDIDATE_LEN)?;
    let mut offset = start;
    while offset <= last {
        offset += memchr::memchr(tag::STRING, &buffer[offset..=last])?;
        if is_plausible_key(&buffer[offset + 1..]) {
            return Some(offset);
        }
        offset += 1;
    }
    None
}

/// Checks the length field and key bytes that follow a candidate tag.
fn is_plausible_key(rest: &[u8]) -> bool {
    let Some((len, body)) = rest.split_first_chunk::<4>() else {
        return false;
    };
    let Ok(len) = usize::try_from(u32::from_le_bytes(*len)) else {
        return false;
    };
    if !(MIN_KEY_LEN..MAX_KEY_LEN).contains(&len) {
        return false;
    }
    body.get(..len)
        .is_some_and(|key| key.iter().all(|b| (0x20..=0x7e).contains(b)))
}

/// Yields decoded sections from a buffer, one per call to `next`.
///
/// Empty sections are skipped. After the first error the iterator is
/// exhausted.
///
/// ```
/// use rokmail::{DecoderOptions, SectionScanner, Value};
///
/// let buf = [0xAA, 0x04, 2, 0, 0, 0, b'i', b'd', 0x01, 0x01, 0xFF];
/// let sections: Vec<_> = SectionScanner::new(&buf, DecoderOptions::default())
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(sections.len(), 1);
/// assert_eq!(sections[0]["id"], Value::Boolean(true));
/// ```
#[derive(Debug, Clone)]
pub struct SectionScanner<'a> {
    cursor: ByteCursor<'a>,
    options: DecoderOptions,
    halted: bool,
}

impl<'a> SectionScanner<'a> {
    /// Starts scanning at the beginning of `buffer`.
    #[must_use]
    pub fn new(buffer: &'a [u8], options: DecoderOptions) -> Self {
        Self {
            cursor: ByteCursor::new(buffer),
            options,
            halted: false,
        }
    }

    /// Offset the next search starts from.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Moves the cursor to the next key candidate, or to the end if none.
    fn resynchronize(&mut self) -> bool {
        let from = self.cursor.position();
        let buffer = self.cursor.buffer();
        if let Some(to) = find_next_key(buffer, from) {
            if to > from {
                debug!(from, to, skipped = to - from, "skipped bytes before section");
            }
            self.cursor.seek(to);
            true
        } else {
            trace!(from, len = buffer.len(), "no further key candidates");
            self.cursor.seek(buffer.len());
            false
        }
    }
}

impl Iterator for SectionScanner<'_> {
    type Item = Result<Map, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.halted && !self.cursor.at_end() {
            if !self.resynchronize() {
                break;
            }

            let before = self.cursor.position();
            let section = match ObjectParser::new(&mut self.cursor, self.options).parse_object() {
                Ok(section) => section,
                Err(err) => {
                    warn!(offset = err.offset(), error = %err, "section decode failed");
                    self.halted = true;
                    return Some(Err(err));
                }
            };

            if self.cursor.position() <= before {
                warn!(offset = before, "section consumed no input, halting scan");
                self.halted = true;
            }
            if !section.is_empty() {
                trace!(offset = before, keys = section.len(), "decoded section");
                return Some(Ok(section));
            }
        }
        None
    }
}

impl FusedIterator for SectionScanner<'_> {}
