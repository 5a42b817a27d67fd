//! Numeric normalization.
//!
//! The wire format stores many integral fields as floats. Consumers expect
//! `7`, not `7.0`, so integral values collapse to the narrowest of `i32` and
//! `i64` that holds them.

use crate::value::{Number, Value};

/// `2^63`, the first integral double past `i64::MAX`.
const I64_END: f64 = 9_223_372_036_854_775_808.0;

/// Normalizes a finite float; `None` for NaN and infinities.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
pub(crate) fn normalize(value: f64) -> Option<Number> {
    if !value.is_finite() {
        return None;
    }
    // Inside the i64 range truncation round-trips exactly when there is no
    // fractional part. Integral doubles outside it stay floats.
    if (-I64_END..I64_END).contains(&value) {
        let n = value as i64;
        if n as f64 == value {
            return Some(i32::try_from(n).map_or(Number::Long(n), Number::Int));
        }
    }
    Some(Number::Float(value))
}

/// Normalizes into a [`Value`], mapping non-finite input to `Null`.
pub(crate) fn normalize_value(value: f64) -> Value {
    normalize(value).map_or(Value::Null, Value::Number)
}
