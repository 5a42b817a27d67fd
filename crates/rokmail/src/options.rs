/// How string payloads that are not valid UTF-8 are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Utf8Mode {
    /// Replace invalid sequences with U+FFFD.
    #[default]
    Lossy,
    /// Fail the decode with [`DecodeErrorKind::InvalidUtf8`].
    ///
    /// [`DecodeErrorKind::InvalidUtf8`]: crate::DecodeErrorKind::InvalidUtf8
    Strict,
}

/// Configuration for [`decode_with_options`](crate::decode_with_options).
///
/// # Examples
///
/// ```rust
/// use rokmail::{DecoderOptions, Utf8Mode};
///
/// let options = DecoderOptions {
///     utf8: Utf8Mode::Strict,
///     ..Default::default()
/// };
/// let mail = rokmail::decode_with_options(&[], options).unwrap();
/// assert!(mail.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// How many nested objects deep a section may go.
    ///
    /// Deeper input fails with [`DecodeErrorKind::NestingTooDeep`]. Each level
    /// costs a stack frame, so very large limits trade that guard away.
    ///
    /// # Default
    ///
    /// `128`
    ///
    /// [`DecodeErrorKind::NestingTooDeep`]: crate::DecodeErrorKind::NestingTooDeep
    pub max_depth: usize,

    /// String decoding policy for keys and string values.
    ///
    /// # Default
    ///
    /// [`Utf8Mode::Lossy`]
    pub utf8: Utf8Mode,
}

impl DecoderOptions {
    /// Default nesting limit.
    pub const DEFAULT_MAX_DEPTH: usize = 128;
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            utf8: Utf8Mode::Lossy,
        }
    }
}
