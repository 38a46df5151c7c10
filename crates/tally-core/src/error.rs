//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CalcError   - Arithmetic failures (caught by the Controller)      │
//! │  └── InputError  - Button label / digit mapping failures               │
//! │                                                                         │
//! │  tally-desktop errors (app)                                            │
//! │  ├── ConfigError - Config file / environment problems                  │
//! │  └── ApiError    - What the frontend sees (serialized)                 │
//! │                                                                         │
//! │  CalcError never leaves the Controller: it becomes the error marker.   │
//! │  InputError → ApiError → Frontend                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Calculation Error
// =============================================================================

/// Arithmetic errors raised while computing a result.
///
/// The [`Controller`](crate::Controller) catches every variant at its
/// boundary, shows the error marker and resets to the initial state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// The right-hand operand of a division was zero.
    ///
    /// ## User Workflow
    /// ```text
    /// 8 ÷ 0 =
    ///      │
    ///      ▼
    /// DivisionByZero
    ///      │
    ///      ▼
    /// Display shows the error marker, next key starts clean
    /// ```
    #[error("Division by zero")]
    DivisionByZero,

    /// The exact result needs more digits than the decimal type holds
    /// (28 fractional places, about 28 significant digits).
    ///
    /// Raised instead of rounding, so `9999999999999999999999999999 + 0.5`
    /// never shows a wrong number.
    #[error("Result is out of range")]
    Overflow,

    /// Display text could not be read back as a decimal.
    ///
    /// Only reachable when more digits are typed than the decimal type can
    /// hold: about 28 significant digits, or a 29th fractional place.
    #[error("Number out of range: {text}")]
    InvalidNumber { text: String },
}

// =============================================================================
// Input Error
// =============================================================================

/// Errors mapping raw button data to an [`Input`](crate::Input).
///
/// These never touch calculator state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The label does not belong to any calculator key.
    #[error("Unknown key: '{label}'")]
    UnknownLabel { label: String },

    /// A digit value outside 0-9.
    #[error("Digit must be between 0 and 9, got {value}")]
    InvalidDigit { value: u8 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CalcError.
pub type CalcResult<T> = Result<T, CalcError>;

// =============================================================================
// Unit Tests
// =============================================================================
