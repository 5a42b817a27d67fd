//! Decoded value types.
//!
//! This module defines [`Value`], the closed set of kinds a mail payload can
//! hold, the normalized [`Number`] representation, and the insertion-ordered
//! [`Map`] used for objects and sections. `Display` renders compact JSON.
//!
//! The rendering escapes strings exactly as `serde_json` does but is not
//! byte-identical to it for floats: `Display` writes plain decimal digits
//! (`1000000000000000000000`) where `serde_json` switches to exponent form
//! for very large and very small magnitudes. Both parse back to the same
//! value.

use alloc::string::String;
use core::fmt::{self, Write as _};

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::parser::numbers;

/// An insertion-ordered object. Re-inserting a key replaces its value in
/// place.
pub type Map = IndexMap<String, Value, FxBuildHasher>;

/// A number after normalization.
///
/// Integral floats become [`Int`](Number::Int) when they fit `i32` and
/// [`Long`](Number::Long) when they fit `i64`; everything else stays a
/// [`Float`](Number::Float).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    /// Integral value within `i32`.
    Int(i32),
    /// Integral value within `i64` but outside `i32`.
    Long(i64),
    /// Finite value with a fractional part, or integral beyond `i64`.
    Float(f64),
}

impl Number {
    /// Normalizes a float, returning `None` for NaN and infinities.
    ///
    /// ```
    /// use rokmail::Number;
    ///
    /// assert_eq!(Number::from_f64(7.0), Some(Number::Int(7)));
    /// assert_eq!(Number::from_f64(12_345_678_901.0), Some(Number::Long(12_345_678_901)));
    /// assert_eq!(Number::from_f64(1.5), Some(Number::Float(1.5)));
    /// assert_eq!(Number::from_f64(f64::NAN), None);
    /// ```
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        numbers::normalize(value)
    }

    /// The value as `i64` if it is integral.
    #[must_use]
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(i64::from(n)),
            Self::Long(n) => Some(n),
            Self::Float(_) => None,
        }
    }

    /// The value as `f64`, widening integers.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(n) => f64::from(n),
            Self::Long(n) => n as f64,
            Self::Float(n) => n,
        }
    }

    /// Returns `true` for [`Int`](Number::Int) and [`Long`](Number::Long).
    #[must_use]
    pub fn is_integer(self) -> bool {
        !matches!(self, Self::Float(_))
    }
}

impl From<i32> for Number {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        i32::try_from(v).map_or(Self::Long(v), Self::Int)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Long(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
        }
    }
}

/// A decoded value.
///
/// # Examples
///
/// ```
/// use rokmail::{Map, Value};
///
/// let mut map = Map::default();
/// map.insert("name".into(), Value::from("Kingdom"));
/// map.insert("power".into(), Value::from(7.0));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"name":"Kingdom","power":7}"#);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Unknown value tags and non-finite numbers.
    #[default]
    Null,
    /// Tag `0x01`.
    Boolean(bool),
    /// Tags `0x02` and `0x03`, normalized.
    Number(Number),
    /// Tag `0x04`.
    String(String),
    /// Tag `0x05`.
    Object(Map),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<Number> for Value {
    fn from(v: Number) -> Self {
        Self::Number(v)
    }
}

/// Normalizes like the decoder does, so non-finite input becomes `Null`.
impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Number::from_f64(v).map_or(Self::Null, Self::Number)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Number(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Number(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`](Value::Null).
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The boolean, if this is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The number, if this is one.
    #[must_use]
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The number as `i64`, if this is an integral number.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    /// The string, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The object, if this is one.
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` if this is an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }
}

/// Escapes a string for inclusion in a JSON string literal, with the same
/// escapes `serde_json` emits.
fn write_escaped_string<W: fmt::Write>(src: &str, f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{08}' => f.write_str("\\b")?,
            '\u{0C}' => f.write_str("\\f")?,
            c if c < ' ' => write!(f, "\\u{:04x}", u32::from(c))?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

/// Writes `map` as a compact JSON object, keys in insertion order.
pub(crate) fn write_object(map: &Map, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_char('{')?;
    for (i, (k, v)) in map.iter().enumerate() {
        if i > 0 {
            f.write_char(',')?;
        }
        f.write_char('"')?;
        write_escaped_string(k, f)?;
        write!(f, "\":{v}")?;
    }
    f.write_char('}')
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => {
                f.write_char('"')?;
                write_escaped_string(s, f)?;
                f.write_char('"')
            }
            Value::Object(map) => write_object(map, f),
        }
    }
}
