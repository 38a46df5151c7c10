//! # tally-core: Pure Calculator Logic for Tally
//!
//! This crate is the **heart** of Tally. It contains the four-function
//! arithmetic state machine as plain data and pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 GUI toolkit (external collaborator)             │   │
//! │  │       Button grid ──► key label        Display ◄── text         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 tally-desktop (shell)                           │   │
//! │  │    press_key, get_display, clear, get_keypad                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  number   │  │   input   │  │  keypad   │  │controller │  │   │
//! │  │   │  Number   │  │   Input   │  │  Keypad   │  │Controller │  │   │
//! │  │   │ (decimal) │  │ Operator  │  │  KeyCap   │  │ Snapshot  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO GUI • PURE STATE TRANSITIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`number`] - Exact decimal type (no floating point!)
//! - [`input`] - The button alphabet (digits, operators, commands)
//! - [`keypad`] - Button grid layout as data
//! - [`controller`] - The arithmetic state machine
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::Controller;
//!
//! let mut calc = Controller::new();
//! for key in ["6", "+", "4", "×", "2", "="] {
//!     calc.press(key).unwrap();
//! }
//!
//! // Operators chain left to right: (6 + 4) × 2
//! assert_eq!(calc.display(), "20");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod controller;
pub mod error;
pub mod input;
pub mod keypad;
pub mod number;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use controller::{Controller, Outcome, Settings, Snapshot};
pub use error::{CalcError, CalcResult, InputError};
pub use input::{Digit, Input, Operator};
pub use keypad::{KeyCap, Keypad};
pub use number::Number;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Text shown on the display after an arithmetic error.
pub const DEFAULT_ERROR_MARKER: &str = "Error";

/// Fractional digits kept by division and percent (round-half-up).
pub const DEFAULT_DIVISION_SCALE: u32 = 10;
