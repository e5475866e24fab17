//! Numeric decoding over byte windows.
//!
//! Integers, fixed-point reals and scientific notation are decoded by hand,
//! without `core::str::parse`, `powi` or any math library, so the decoder
//! links the same way on targets without an FPU runtime.
//!
//! Every function operates on a window of the line and reports failure
//! through [`DecodeError`]; none of them panic.

use crate::types::{ParamKind, Value};

/// Error type for value decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// A byte that must be a decimal digit is not one.
    InvalidDigit,
    /// The value does not fit the target type.
    Overflow,
    /// A letter value is not exactly one character long.
    InvalidLength,
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidDigit => write!(f, "invalid digit"),
            Self::Overflow => write!(f, "value out of range"),
            Self::InvalidLength => write!(f, "invalid length"),
        }
    }
}

/// Sign of a decoded number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sign {
    #[default]
    Positive,
    Negative,
}

impl Sign {
    #[inline]
    fn apply(self, value: f32) -> f32 {
        match self {
            Sign::Positive => value,
            Sign::Negative => -value,
        }
    }
}

/// Decode a value of the given kind.
pub fn decode_value(window: &[u8], kind: ParamKind) -> Result<Value, DecodeError> {
    match kind {
        ParamKind::Letter => decode_letter(window).map(Value::Letter),
        ParamKind::Integer => decode_signed(window).map(Value::Integer),
        ParamKind::Real => decode_real(window).map(Value::Real),
    }
}

/// Decode a single-character value.
#[inline]
pub fn decode_letter(window: &[u8]) -> Result<char, DecodeError> {
    match window {
        [b] => Ok(*b as char),
        _ => Err(DecodeError::InvalidLength),
    }
}

/// Decode a run of decimal digits. An empty window decodes to 0.
pub fn decode_unsigned(window: &[u8]) -> Result<u32, DecodeError> {
    let mut value: u32 = 0;
    for &b in window {
        let d = u32::from(digit(b)?);
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(d))
            .ok_or(DecodeError::Overflow)?;
    }
    Ok(value)
}

/// Extract the sign and locate the first significant byte.
///
/// A leading `+` or `-` is consumed, then leading `'0'` and `' '` bytes are
/// skipped so padded numbers such as `0010` decode normally. If only zeros
/// and spaces follow the sign, the returned index points at the last byte
/// so a lone `0` is still decoded.
pub fn split_sign(window: &[u8]) -> (Sign, usize) {
    let (sign, start) = match window.first() {
        Some(b'-') => (Sign::Negative, 1),
        Some(b'+') => (Sign::Positive, 1),
        _ => (Sign::Positive, 0),
    };

    let mut idx = start;
    while idx < window.len() && matches!(window[idx], b'0' | b' ') {
        idx += 1;
    }
    if idx == window.len() && idx > start {
        idx -= 1;
    }

    (sign, idx)
}

/// Decode an optionally signed decimal integer.
pub fn decode_signed(window: &[u8]) -> Result<i32, DecodeError> {
    let (sign, start) = split_sign(window);
    let magnitude = i64::from(decode_unsigned(&window[start..])?);
    let value = match sign {
        Sign::Positive => magnitude,
        Sign::Negative => -magnitude,
    };
    i32::try_from(value).map_err(|_| DecodeError::Overflow)
}

/// Decode a fixed-point real such as `-12.5`, `3.` or `.25`.
pub fn decode_fractional(window: &[u8]) -> Result<f32, DecodeError> {
    let (sign, start) = split_sign(window);
    let digits = &window[start..];
    if digits.is_empty() {
        return Ok(0.0);
    }

    let (integral, fraction) = match digits.iter().position(|&b| b == b'.') {
        Some(dot) => (&digits[..dot], &digits[dot + 1..]),
        None => (digits, &[][..]),
    };

    let integral = decode_unsigned(integral)? as f32;

    let mut fraction_value = 0.0f32;
    let mut divisor = 10.0f32;
    for &b in fraction {
        fraction_value += f32::from(digit(b)?) / divisor;
        divisor *= 10.0;
    }

    Ok(sign.apply(integral + fraction_value))
}

/// Decode a real with an optional `e`/`E` exponent, e.g. `1E2` or `-2.5e-3`.
///
/// A marker on the last byte is not treated as an exponent. A marker on the
/// first byte implies a mantissa of 1, so `e3` is 1000. An empty window
/// decodes to 0.
pub fn decode_real(window: &[u8]) -> Result<f32, DecodeError> {
    if window.is_empty() {
        return Ok(0.0);
    }

    let marker = window
        .iter()
        .position(|&b| b == b'e' || b == b'E')
        .filter(|&idx| idx + 1 < window.len());

    let Some(marker) = marker else {
        return decode_fractional(window);
    };

    let mantissa = if marker > 0 {
        decode_fractional(&window[..marker])?
    } else {
        1.0
    };
    let exponent = decode_signed(&window[marker + 1..])?;

    let value = scale_by_ten(mantissa, exponent);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DecodeError::Overflow)
    }
}

/// Multiply (or divide) `value` by ten `|exponent|` times.
///
/// Stops as soon as the value saturates to zero or infinity.
fn scale_by_ten(mut value: f32, exponent: i32) -> f32 {
    for _ in 0..exponent.unsigned_abs() {
        if value == 0.0 || value.is_infinite() {
            break;
        }
        if exponent > 0 {
            value *= 10.0;
        } else {
            value /= 10.0;
        }
    }
    value
}

#[inline]
fn digit(b: u8) -> Result<u8, DecodeError> {
    if b.is_ascii_digit() {
        Ok(b - b'0')
    } else {
        Err(DecodeError::InvalidDigit)
    }
}
