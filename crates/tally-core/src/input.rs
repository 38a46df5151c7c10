//! # Input Alphabet
//!
//! The fixed set of symbols a button grid can send to the controller.
//!
//! ## Alphabet
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Calculator Inputs                               │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Entry         │   │   Operators     │   │   Commands      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Digit 0-9      │   │  Add      +     │   │  Clear     C    │       │
//! │  │  Decimal  .     │   │  Subtract −  -  │   │  Sign      ±    │       │
//! │  │                 │   │  Multiply ×  *  │   │  Percent   %    │       │
//! │  │                 │   │  Divide   ÷  /  │   │  Equals    =    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Labels parse with [`str::parse`]; operators accept both the typographic
//! and the ASCII spelling.
//!
//! ```rust
//! use tally_core::{Input, Operator};
//!
//! let input: Input = "×".parse().unwrap();
//! assert_eq!(input, Input::Operator(Operator::Multiply));
//! assert_eq!("*".parse::<Input>().unwrap(), input);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CalcResult, InputError};
use crate::number::Number;

// =============================================================================
// Digit
// =============================================================================

/// A single decimal digit, 0 through 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digit(u8);

const DIGIT_LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

impl Digit {
    /// The ten digits, `ALL[n]` being `n`.
    pub const ALL: [Digit; 10] = [
        Digit(0),
        Digit(1),
        Digit(2),
        Digit(3),
        Digit(4),
        Digit(5),
        Digit(6),
        Digit(7),
        Digit(8),
        Digit(9),
    ];

    /// Creates a digit, rejecting values above 9.
    pub fn new(value: u8) -> Result<Self, InputError> {
        if value > 9 {
            return Err(InputError::InvalidDigit { value });
        }
        Ok(Digit(value))
    }

    /// Returns the numeric value.
    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the digit as an ASCII character.
    #[inline]
    pub const fn as_char(&self) -> char {
        (b'0' + self.0) as char
    }

    /// Returns the digit as its key label.
    #[inline]
    pub const fn label(&self) -> &'static str {
        DIGIT_LABELS[self.0 as usize]
    }
}

// =============================================================================
// Operator
// =============================================================================

/// A binary operation waiting for its right-hand operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// All operators in keypad order (top to bottom).
    pub const ALL: [Operator; 4] = [
        Operator::Divide,
        Operator::Multiply,
        Operator::Subtract,
        Operator::Add,
    ];

    /// The symbol printed on the key.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "−",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        }
    }

    /// Applies the operation. Division rounds to `scale` fractional digits;
    /// the other three are exact.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::{Number, Operator};
    ///
    /// let sum = Operator::Add.apply(Number::from(6), Number::from(4), 10).unwrap();
    /// assert_eq!(sum, Number::from(10));
    /// ```
    pub fn apply(&self, lhs: Number, rhs: Number, scale: u32) -> CalcResult<Number> {
        match self {
            Operator::Add => lhs.checked_add(rhs),
            Operator::Subtract => lhs.checked_sub(rhs),
            Operator::Multiply => lhs.checked_mul(rhs),
            Operator::Divide => lhs.div_rounded(rhs, scale),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// =============================================================================
// Input
// =============================================================================

/// One button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    /// Append (or start) a digit.
    Digit(Digit),
    /// Insert the decimal point.
    Decimal,
    /// Reset everything.
    Clear,
    /// Flip the sign of the displayed number.
    ToggleSign,
    /// Divide the displayed number by 100.
    Percent,
    /// Queue a binary operation.
    Operator(Operator),
    /// Compute the pending operation.
    Equals,
}

impl Input {
    /// Convenience constructor for digit inputs.
    pub fn digit(value: u8) -> Result<Self, InputError> {
        Digit::new(value).map(Input::Digit)
    }

    /// The canonical key label.
    pub const fn label(&self) -> &'static str {
        match self {
            Input::Digit(d) => d.label(),
            Input::Decimal => ".",
            Input::Clear => "C",
            Input::ToggleSign => "±",
            Input::Percent => "%",
            Input::Operator(op) => op.symbol(),
            Input::Equals => "=",
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Input {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        let input = match label {
            "." => Input::Decimal,
            "C" | "c" => Input::Clear,
            "±" => Input::ToggleSign,
            "%" => Input::Percent,
            "=" => Input::Equals,
            "+" => Input::Operator(Operator::Add),
            "−" | "-" => Input::Operator(Operator::Subtract),
            "×" | "*" => Input::Operator(Operator::Multiply),
            "÷" | "/" => Input::Operator(Operator::Divide),
            _ => {
                let mut chars = label.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Input::digit(c as u8 - b'0')?,
                    _ => {
                        return Err(InputError::UnknownLabel {
                            label: s.to_string(),
                        })
                    }
                }
            }
        };
        Ok(input)
    }
}

impl From<Digit> for Input {
    fn from(digit: Digit) -> Self {
        Input::Digit(digit)
    }
}

impl From<Operator> for Input {
    fn from(op: Operator) -> Self {
        Input::Operator(op)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
