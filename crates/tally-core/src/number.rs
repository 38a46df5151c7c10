//! # Number Module
//!
//! Provides the `Number` type: the exact decimal behind every operand.
//!
//! ## Why Decimal?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG on a calculator display!   │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 decimal (rust_decimal)                           │
//! │    0.1 + 0.2 = 0.3                                                      │
//! │    1 ÷ 3     = 0.3333333333   (rounded to a fixed scale, half-up)       │
//! │    × 3       = 0.9999999999   (exact on the rounded value)              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::number::Number;
//!
//! let third = Number::from(1).div_rounded(Number::from(3), 10).unwrap();
//! assert_eq!(third.to_string(), "0.3333333333");
//!
//! let back = third.checked_mul(Number::from(3)).unwrap();
//! assert_eq!(back.to_string(), "0.9999999999");
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

// =============================================================================
// Number Type
// =============================================================================

/// An exact decimal value (up to 28 significant digits).
///
/// ## Design Decisions
/// - **Newtype over `Decimal`**: the controller only sees the operations a
///   four-function calculator needs, each returning [`CalcResult`]
/// - **Never rounds silently**: `Decimal` would round a value that needs
///   more digits than it can hold. Every operation here works on the
///   integer mantissas instead and reports [`CalcError::Overflow`] when the
///   exact result does not fit
/// - **Display is normalized**: no trailing fractional zeros, no `-0`,
///   never scientific notation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Number(Decimal);

impl Number {
    /// Largest number of fractional digits a `Number` can carry.
    pub const MAX_SCALE: u32 = 28;

    /// Zero.
    pub const ZERO: Number = Number(Decimal::ZERO);

    /// Parses display text such as `"12"`, `"-0.5"` or `"3."`.
    ///
    /// A trailing decimal point (the user is still typing) is accepted.
    /// Text with more digits than a `Number` holds is rejected rather than
    /// rounded.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::number::Number;
    ///
    /// assert_eq!(Number::parse("3.").unwrap(), Number::from(3));
    /// assert!(Number::parse("Error").is_err());
    /// assert!(Number::parse("0.00000000000000000000000000001").is_err());
    /// ```
    pub fn parse(text: &str) -> CalcResult<Self> {
        let invalid = || CalcError::InvalidNumber {
            text: text.to_string(),
        };
        let digits = text.strip_suffix('.').unwrap_or(text);
        let value = Decimal::from_str(digits).map_err(|_| invalid())?;

        // from_str rounds away digits past the 28th
        if canonical(digits) != canonical(&value.normalize().to_string()) {
            return Err(invalid());
        }
        Ok(Number(value))
    }

    /// Checks if the value is zero (either sign).
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns the underlying decimal.
    #[inline]
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Exact addition.
    pub fn checked_add(self, rhs: Number) -> CalcResult<Number> {
        let (lhs, rhs) = (self.0.normalize(), rhs.0.normalize());
        let scale = lhs.scale().max(rhs.scale());
        let sum = rescaled(lhs, scale)?
            .checked_add(rescaled(rhs, scale)?)
            .ok_or(CalcError::Overflow)?;
        from_parts(sum, scale)
    }

    /// Exact subtraction.
    pub fn checked_sub(self, rhs: Number) -> CalcResult<Number> {
        self.checked_add(Number(-rhs.0))
    }

    /// Exact multiplication.
    ///
    /// Factors of ten shared by the two mantissas are cancelled against the
    /// combined scale first, so `0.5 × 0.2` never needs more than one digit.
    pub fn checked_mul(self, rhs: Number) -> CalcResult<Number> {
        if self.is_zero() || rhs.is_zero() {
            return Ok(Number::ZERO);
        }

        let (lhs, rhs) = (self.0.normalize(), rhs.0.normalize());
        let negative = lhs.is_sign_negative() != rhs.is_sign_negative();
        let mut left = lhs.mantissa().unsigned_abs();
        let mut right = rhs.mantissa().unsigned_abs();
        let scale = lhs.scale() + rhs.scale();

        let tens = scale
            .min(count_factor(left, 2) + count_factor(right, 2))
            .min(count_factor(left, 5) + count_factor(right, 5));
        for factor in [2, 5] {
            let taken = strip_factor(&mut left, factor, tens);
            strip_factor(&mut right, factor, tens - taken);
        }

        let product = left.checked_mul(right).ok_or(CalcError::Overflow)?;
        from_unsigned(negative, product, scale - tens)
    }

    /// Divides and rounds the quotient to `scale` fractional digits,
    /// midpoints away from zero (round-half-up).
    ///
    /// The quotient is produced digit by digit from the mantissas, so the
    /// rounding digit is always the true one. A rounded quotient that needs
    /// more than 28 significant digits is [`CalcError::Overflow`]. A `scale`
    /// above [`Number::MAX_SCALE`] is treated as `MAX_SCALE`.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::number::Number;
    /// use tally_core::CalcError;
    ///
    /// let q = Number::from(2).div_rounded(Number::from(3), 10).unwrap();
    /// assert_eq!(q.to_string(), "0.6666666667");
    ///
    /// let err = Number::from(8).div_rounded(Number::ZERO, 10).unwrap_err();
    /// assert_eq!(err, CalcError::DivisionByZero);
    /// ```
    pub fn div_rounded(self, rhs: Number, scale: u32) -> CalcResult<Number> {
        if rhs.is_zero() {
            return Err(CalcError::DivisionByZero);
        }

        let scale = scale.min(Number::MAX_SCALE);
        let (lhs, rhs) = (self.0.normalize(), rhs.0.normalize());
        let negative = lhs.is_sign_negative() != rhs.is_sign_negative();
        let dividend = lhs.mantissa().unsigned_abs();
        let divisor = rhs.mantissa().unsigned_abs();

        // lhs / rhs = (dividend / divisor) * 10^(rhs.scale - lhs.scale)
        let places = i64::from(scale) + i64::from(rhs.scale()) - i64::from(lhs.scale());
        let (digits, zeros) = match u32::try_from(places) {
            Ok(places) => long_divide(dividend, divisor, places)?,
            Err(_) => {
                let dropped = u32::try_from(places.unsigned_abs()).unwrap_or(u32::MAX);
                (round_off_digits(dividend / divisor, dropped), 0)
            }
        };

        // `digits` followed by `zeros` zeros is the mantissa at `scale`
        if zeros <= scale {
            from_unsigned(negative, digits, scale - zeros)
        } else {
            from_unsigned(negative, scale_up(digits, zeros - scale)?, 0)
        }
    }

    /// Converts a percentage to its fraction: `50` → `0.5`.
    ///
    /// Uses the same rounding as [`Number::div_rounded`].
    pub fn percent(self, scale: u32) -> CalcResult<Number> {
        self.div_rounded(Number(Decimal::ONE_HUNDRED), scale)
    }

    /// Strips trailing fractional zeros and turns `-0` into `0`.
    #[inline]
    pub fn normalized(self) -> Number {
        Number(self.0.normalize())
    }
}

// =============================================================================
// Mantissa Helpers
// =============================================================================

/// Numeral text reduced to sign, integer digits and significant fraction.
fn canonical(text: &str) -> String {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let integer = integer.trim_start_matches('0');
    let fraction = fraction.trim_end_matches('0');

    if integer.is_empty() && fraction.is_empty() {
        return "0".to_string();
    }

    let mut out = String::with_capacity(text.len());
    if negative {
        out.push('-');
    }
    out.push_str(if integer.is_empty() { "0" } else { integer });
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// The mantissa of `value` expressed at a larger `scale`.
fn rescaled(value: Decimal, scale: u32) -> CalcResult<i128> {
    10i128
        .checked_pow(scale - value.scale())
        .and_then(|factor| value.mantissa().checked_mul(factor))
        .ok_or(CalcError::Overflow)
}

/// Builds a `Number` from an exact mantissa, dropping trailing zeros first.
fn from_parts(mut mantissa: i128, mut scale: u32) -> CalcResult<Number> {
    while scale > 0 && mantissa % 10 == 0 {
        mantissa /= 10;
        scale -= 1;
    }
    Decimal::try_from_i128_with_scale(mantissa, scale)
        .map(Number)
        .map_err(|_| CalcError::Overflow)
}

fn from_unsigned(negative: bool, magnitude: u128, scale: u32) -> CalcResult<Number> {
    let mantissa = i128::try_from(magnitude).map_err(|_| CalcError::Overflow)?;
    from_parts(if negative { -mantissa } else { mantissa }, scale)
}

fn count_factor(mut value: u128, factor: u128) -> u32 {
    strip_factor(&mut value, factor, u32::MAX)
}

/// Divides `factor` out of `value` up to `limit` times; returns how often.
fn strip_factor(value: &mut u128, factor: u128, limit: u32) -> u32 {
    let mut count = 0;
    while count < limit && *value != 0 && *value % factor == 0 {
        *value /= factor;
        count += 1;
    }
    count
}

/// `value * 10^exponent`.
fn scale_up(value: u128, exponent: u32) -> CalcResult<u128> {
    if value == 0 {
        return Ok(0);
    }
    10u128
        .checked_pow(exponent)
        .and_then(|factor| value.checked_mul(factor))
        .ok_or(CalcError::Overflow)
}

/// Appends `zeros` zeros and then `digit` to `digits`.
fn push_digit(digits: u128, zeros: u32, digit: u128) -> CalcResult<u128> {
    scale_up(digits, zeros + 1)?
        .checked_add(digit)
        .ok_or(CalcError::Overflow)
}

/// `dividend / divisor` with `places` fractional digits, rounded half-up.
///
/// Returns the digits with trailing zeros split off as a count, so a long
/// run of zeros never has to fit in the accumulator.
fn long_divide(dividend: u128, divisor: u128, places: u32) -> CalcResult<(u128, u32)> {
    let mut digits = dividend / divisor;
    let mut remainder = dividend % divisor;
    let mut zeros = 0;

    for _ in 0..places {
        remainder *= 10;
        let digit = remainder / divisor;
        remainder %= divisor;
        if digit == 0 {
            zeros += 1;
        } else {
            digits = push_digit(digits, zeros, digit)?;
            zeros = 0;
        }
    }

    if remainder * 10 / divisor >= 5 {
        if zeros == 0 {
            digits = digits.checked_add(1).ok_or(CalcError::Overflow)?;
        } else {
            digits = push_digit(digits, zeros - 1, 1)?;
            zeros = 0;
        }
    }
    Ok((digits, zeros))
}

/// Rounds away the last `dropped` digits of an integer, half-up.
fn round_off_digits(value: u128, dropped: u32) -> u128 {
    let truncated = 10u128
        .checked_pow(dropped - 1)
        .map_or(0, |unit| value / unit);
    truncated / 10 + u128::from(truncated % 10 >= 5)
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal text as it should appear on the display.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Number {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Number::parse(s)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number(Decimal::from(value))
    }
}

impl From<Decimal> for Number {
    fn from(value: Decimal) -> Self {
        Number(value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
