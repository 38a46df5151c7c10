//! # Arithmetic Controller
//!
//! The state machine behind the keypad. One [`Input`] goes in, the display
//! text is read back out.
//!
//! ## State
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Controller State                                 │
//! │                                                                         │
//! │  display            "12.5"     what the output surface renders          │
//! │  accumulator        Number     left operand of the pending operation    │
//! │  pending            Option<Operator>                                    │
//! │  start_new_number   bool       next digit overwrites the display        │
//! │  showing_error      bool       display holds the error marker           │
//! │                                                                         │
//! │  Initial: "0", 0, None, true, false                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Chaining
//! ```text
//!   6   +   4   ×         2   =
//!   │   │   │   │         │   │
//!   │   │   │   └─ 6+4=10 │   └─ 10×2=20
//!   │   │   └─ operand typed (start_new_number = false)
//!   │   └─ accumulator = 6, pending = Add
//!   └─ display = "6"
//! ```
//!
//! ## Errors
//! Arithmetic errors are caught here: the display shows the error marker,
//! everything else returns to the initial state, and the next input starts
//! from a clean slate as if Clear had been pressed first.
//!
//! ```rust
//! use tally_core::Controller;
//!
//! let mut calc = Controller::new();
//! for key in ["8", "÷", "0", "="] {
//!     calc.press(key).unwrap();
//! }
//! assert_eq!(calc.display(), "Error");
//!
//! calc.press("5").unwrap();
//! assert_eq!(calc.display(), "5");
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CalcError, CalcResult, InputError};
use crate::input::{Digit, Input, Operator};
use crate::number::Number;
use crate::{DEFAULT_DIVISION_SCALE, DEFAULT_ERROR_MARKER};

// =============================================================================
// Settings
// =============================================================================

/// Tunables for a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Text shown after an arithmetic error.
    pub error_marker: String,

    /// Fractional digits kept by division and percent.
    pub division_scale: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            error_marker: DEFAULT_ERROR_MARKER.to_string(),
            division_scale: DEFAULT_DIVISION_SCALE,
        }
    }
}

// =============================================================================
// Outcome
// =============================================================================

/// What happened to an input.
///
/// The controller always ends in a consistent state; `Failed` only tells the
/// caller that the error marker is now showing and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    Failed(CalcError),
}

impl Outcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Read-only copy of the controller state, for frontends and debugging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub display: String,
    #[ts(as = "String")]
    pub accumulator: Number,
    pub pending_operator: Option<Operator>,
    pub starts_new_number: bool,
    pub showing_error: bool,
}

// =============================================================================
// Controller
// =============================================================================

/// The four-function calculator state machine.
#[derive(Debug, Clone)]
pub struct Controller {
    display: String,
    accumulator: Number,
    pending: Option<Operator>,
    start_new_number: bool,
    showing_error: bool,
    settings: Settings,
}

impl Controller {
    /// Creates a controller in the initial state with default settings.
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// Creates a controller in the initial state.
    pub fn with_settings(settings: Settings) -> Self {
        Controller {
            display: "0".to_string(),
            accumulator: Number::ZERO,
            pending: None,
            start_new_number: true,
            showing_error: false,
            settings,
        }
    }

    /// Processes one button press.
    ///
    /// If the error marker is showing, the controller is cleared first and
    /// then the input is processed normally.
    pub fn handle_input(&mut self, input: Input) -> Outcome {
        if self.showing_error {
            self.clear();
        }

        match self.apply(input) {
            Ok(()) => Outcome::Updated,
            Err(err) => {
                self.fail();
                Outcome::Failed(err)
            }
        }
    }

    /// Parses a key label and processes it.
    ///
    /// An unknown label is rejected without touching any state.
    pub fn press(&mut self, label: &str) -> Result<Outcome, InputError> {
        let input: Input = label.parse()?;
        Ok(self.handle_input(input))
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The text to render.
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn accumulator(&self) -> Number {
        self.accumulator
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending
    }

    pub fn starts_new_number(&self) -> bool {
        self.start_new_number
    }

    pub fn is_showing_error(&self) -> bool {
        self.showing_error
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display: self.display.clone(),
            accumulator: self.accumulator,
            pending_operator: self.pending,
            starts_new_number: self.start_new_number,
            showing_error: self.showing_error,
        }
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    fn apply(&mut self, input: Input) -> CalcResult<()> {
        match input {
            Input::Digit(digit) => self.push_digit(digit),
            Input::Decimal => self.push_decimal(),
            Input::Clear => self.clear(),
            Input::ToggleSign => self.toggle_sign(),
            Input::Percent => return self.percent(),
            Input::Operator(op) => return self.set_operator(op),
            Input::Equals => return self.compute_result(),
        }
        Ok(())
    }

    fn push_digit(&mut self, digit: Digit) {
        if self.start_new_number {
            self.display = digit.as_char().to_string();
            self.start_new_number = false;
        } else if self.display == "0" {
            self.display = digit.as_char().to_string();
        } else {
            self.display.push(digit.as_char());
        }
    }

    fn push_decimal(&mut self) {
        if self.start_new_number {
            self.display = "0.".to_string();
            self.start_new_number = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    fn clear(&mut self) {
        self.display = "0".to_string();
        self.accumulator = Number::ZERO;
        self.pending = None;
        self.start_new_number = true;
        self.showing_error = false;
    }

    fn toggle_sign(&mut self) {
        if self.display == "0" {
            return;
        }
        match self.display.strip_prefix('-') {
            Some(unsigned) => self.display = unsigned.to_string(),
            None => self.display.insert(0, '-'),
        }
    }

    fn percent(&mut self) -> CalcResult<()> {
        let value = self.current_value()?.percent(self.settings.division_scale)?;
        self.display = value.to_string();
        self.start_new_number = true;
        Ok(())
    }

    fn set_operator(&mut self, op: Operator) -> CalcResult<()> {
        if self.pending.is_some() && !self.start_new_number {
            self.compute_result()?;
        } else {
            self.accumulator = self.current_value()?;
        }
        self.pending = Some(op);
        self.start_new_number = true;
        Ok(())
    }

    /// Applies the pending operator to the accumulator and the display.
    ///
    /// No-op without a pending operator. Errors leave the state untouched;
    /// the caller decides how to recover.
    fn compute_result(&mut self) -> CalcResult<()> {
        let Some(op) = self.pending else {
            return Ok(());
        };

        let current = self.current_value()?;
        let result = op
            .apply(self.accumulator, current, self.settings.division_scale)?
            .normalized();

        self.display = result.to_string();
        self.accumulator = result;
        self.pending = None;
        self.start_new_number = true;
        Ok(())
    }

    fn current_value(&self) -> CalcResult<Number> {
        Number::parse(&self.display)
    }

    fn fail(&mut self) {
        self.clear();
        self.display = self.settings.error_marker.clone();
        self.showing_error = true;
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Presses each key in order and returns the final display.
    fn run(calc: &mut Controller, keys: &[&str]) -> String {
        for key in keys {
            calc.press(key).unwrap();
        }
        calc.display().to_string()
    }

    fn eval(keys: &[&str]) -> String {
        run(&mut Controller::new(), keys)
    }

    #[test]
    fn test_initial_state() {
        let calc = Controller::new();
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.accumulator(), Number::ZERO);
        assert_eq!(calc.pending_operator(), None);
        assert!(calc.starts_new_number());
        assert!(!calc.is_showing_error());
    }

    #[test]
    fn test_digits_concatenate() {
        assert_eq!(eval(&["C", "1", "2", "3"]), "123");
    }

    #[test]
    fn test_leading_zero_suppressed() {
        assert_eq!(eval(&["0", "0", "7"]), "7");
        assert_eq!(eval(&["0", "0"]), "0");
    }

    #[test]
    fn test_decimal_point_is_idempotent() {
        assert_eq!(eval(&["5", ".", "."]), "5.");
        assert_eq!(eval(&["5", ".", "2", ".", "5"]), "5.25");
    }

    #[test]
    fn test_decimal_point_starts_new_number() {
        assert_eq!(eval(&["."]), "0.");
        assert_eq!(eval(&["9", "+", ".", "5"]), "0.5");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut calc = Controller::new();
        run(&mut calc, &["7", "×", "3", "C"]);
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.pending_operator(), None);
        assert_eq!(calc.accumulator(), Number::ZERO);
        assert!(calc.starts_new_number());
    }

    #[test]
    fn test_sign_toggle() {
        assert_eq!(eval(&["C", "±"]), "0");
        assert_eq!(eval(&["4", "2", "±"]), "-42");
        assert_eq!(eval(&["4", "2", "±", "±"]), "42");
        assert_eq!(eval(&["4", "±", "2"]), "-42");
    }

    #[test]
    fn test_sign_toggle_keeps_start_new_number() {
        // Result shown, sign flipped, next digit still starts over
        assert_eq!(eval(&["2", "+", "2", "=", "±"]), "-4");
        assert_eq!(eval(&["2", "+", "2", "=", "±", "7"]), "7");
    }

    #[test]
    fn test_percent() {
        assert_eq!(eval(&["5", "0", "%"]), "0.5");
        assert_eq!(eval(&["2", "0", "0", "%"]), "2");
        // The percent result is replaced by the next digit
        assert_eq!(eval(&["5", "0", "%", "3"]), "3");
    }

    #[test]
    fn test_basic_operations() {
        assert_eq!(eval(&["7", "+", "5", "="]), "12");
        assert_eq!(eval(&["7", "−", "9", "="]), "-2");
        assert_eq!(eval(&["1", ".", "5", "×", "4", "="]), "6");
        assert_eq!(eval(&["9", "÷", "4", "="]), "2.25");
    }

    #[test]
    fn test_integral_results_have_no_decimal_point() {
        assert_eq!(eval(&["2", ".", "5", "+", "1", ".", "5", "="]), "4");
    }

    #[test]
    fn test_chained_operators_are_left_associative() {
        assert_eq!(eval(&["6", "+", "4", "×", "2", "="]), "20");
        assert_eq!(eval(&["2", "+", "3", "×", "4", "−", "5", "="]), "15");
    }

    #[test]
    fn test_chained_operator_shows_intermediate_result() {
        let mut calc = Controller::new();
        run(&mut calc, &["6", "+", "4", "×"]);
        assert_eq!(calc.display(), "10");
        assert_eq!(calc.accumulator(), Number::from(10));
        assert_eq!(calc.pending_operator(), Some(Operator::Multiply));
    }

    #[test]
    fn test_repeated_operator_replaces_pending() {
        let mut calc = Controller::new();
        run(&mut calc, &["6", "+", "×"]);
        assert_eq!(calc.pending_operator(), Some(Operator::Multiply));
        assert_eq!(calc.accumulator(), Number::from(6));
        assert_eq!(run(&mut calc, &["3", "="]), "18");
    }

    #[test]
    fn test_equals_without_pending_is_noop() {
        assert_eq!(eval(&["4", "2", "="]), "42");

        let mut calc = Controller::new();
        run(&mut calc, &["3", "+", "4", "="]);
        let before = calc.snapshot();
        calc.press("=").unwrap();
        assert_eq!(calc.snapshot(), before);
    }

    #[test]
    fn test_equals_right_after_operator_uses_display_twice() {
        assert_eq!(eval(&["5", "+", "="]), "10");
    }

    #[test]
    fn test_division_by_zero_shows_marker() {
        let mut calc = Controller::new();
        for key in ["8", "÷", "0"] {
            calc.press(key).unwrap();
        }
        let outcome = calc.press("=").unwrap();

        assert_eq!(outcome, Outcome::Failed(CalcError::DivisionByZero));
        assert_eq!(calc.display(), "Error");
        assert!(calc.is_showing_error());
        assert_eq!(calc.accumulator(), Number::ZERO);
        assert_eq!(calc.pending_operator(), None);
        assert!(calc.starts_new_number());
    }

    #[test]
    fn test_digit_after_error_starts_clean() {
        assert_eq!(eval(&["8", "÷", "0", "=", "5"]), "5");
    }

    #[test]
    fn test_operator_after_error_uses_zero_accumulator() {
        let mut calc = Controller::new();
        run(&mut calc, &["8", "÷", "0", "=", "+"]);
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.accumulator(), Number::ZERO);
        assert_eq!(calc.pending_operator(), Some(Operator::Add));
        assert_eq!(run(&mut calc, &["3", "="]), "3");
    }

    #[test]
    fn test_other_inputs_after_error() {
        assert_eq!(eval(&["1", "÷", "0", "=", "."]), "0.");
        assert_eq!(eval(&["1", "÷", "0", "=", "±"]), "0");
        assert_eq!(eval(&["1", "÷", "0", "=", "="]), "0");
        assert_eq!(eval(&["1", "÷", "0", "=", "%"]), "0");
    }

    #[test]
    fn test_chained_division_by_zero() {
        let mut calc = Controller::new();
        let keys = ["8", "÷", "0"];
        run(&mut calc, &keys);
        let outcome = calc.press("+").unwrap();
        assert!(outcome.is_failed());
        assert_eq!(calc.display(), "Error");
        assert_eq!(calc.pending_operator(), None);
    }

    #[test]
    fn test_rounded_division_feeds_next_operation() {
        let mut calc = Controller::new();
        assert_eq!(run(&mut calc, &["1", "÷", "3", "="]), "0.3333333333");
        assert_eq!(run(&mut calc, &["×", "3", "="]), "0.9999999999");
    }

    #[test]
    fn test_division_rounds_half_up() {
        assert_eq!(eval(&["2", "÷", "3", "="]), "0.6666666667");
    }

    #[test]
    fn test_overflow_shows_marker() {
        let mut calc = Controller::new();
        for _ in 0..28 {
            calc.press("9").unwrap();
        }
        run(&mut calc, &["×", "1", "0"]);
        assert_eq!(
            calc.press("=").unwrap(),
            Outcome::Failed(CalcError::Overflow)
        );
        assert_eq!(calc.display(), "Error");
    }

    #[test]
    fn test_too_many_digits_shows_marker() {
        let mut calc = Controller::new();
        for _ in 0..30 {
            calc.press("9").unwrap();
        }
        assert_eq!(calc.display().len(), 30);
        assert!(calc.press("+").unwrap().is_failed());
        assert_eq!(calc.display(), "Error");
    }

    /// Types a numeral one key at a time.
    fn type_number(calc: &mut Controller, text: &str) {
        for key in text.chars() {
            calc.press(&key.to_string()).unwrap();
        }
    }

    #[test]
    fn test_percent_rounds_half_up_at_ten_places() {
        assert_eq!(
            eval(&[".", "0", "0", "0", "0", "0", "0", "0", "0", "5", "%"]),
            "0.0000000001"
        );
    }

    #[test]
    fn test_product_below_smallest_place_shows_marker() {
        let mut calc = Controller::new();
        type_number(&mut calc, "0.0000000001");
        calc.press("×").unwrap();
        type_number(&mut calc, "0.0000000001");
        calc.press("×").unwrap();
        assert_eq!(calc.display(), "0.00000000000000000001");

        type_number(&mut calc, "0.0000000001");
        assert_eq!(
            calc.press("=").unwrap(),
            Outcome::Failed(CalcError::Overflow)
        );
        assert_eq!(calc.display(), "Error");
    }

    #[test]
    fn test_sum_past_28_digits_shows_marker() {
        let mut calc = Controller::new();
        type_number(&mut calc, &"9".repeat(28));
        calc.press("+").unwrap();
        type_number(&mut calc, "0.5");
        assert_eq!(
            calc.press("=").unwrap(),
            Outcome::Failed(CalcError::Overflow)
        );
    }

    #[test]
    fn test_quotient_without_room_for_ten_places_shows_marker() {
        let mut calc = Controller::new();
        type_number(&mut calc, "100000000000000000000");
        calc.press("÷").unwrap();
        type_number(&mut calc, "3");
        assert_eq!(
            calc.press("=").unwrap(),
            Outcome::Failed(CalcError::Overflow)
        );

        let mut calc = Controller::new();
        type_number(&mut calc, "10000000000");
        assert_eq!(run(&mut calc, &["÷", "3", "="]), "3333333333.3333333333");
    }

    #[test]
    fn test_typed_fraction_past_28_places_is_not_zero() {
        let tiny = format!("0.{}1", "0".repeat(28));

        let mut calc = Controller::new();
        type_number(&mut calc, &tiny);
        assert!(matches!(
            calc.press("+").unwrap(),
            Outcome::Failed(CalcError::InvalidNumber { .. })
        ));

        // Never reported as a division by zero
        let mut calc = Controller::new();
        run(&mut calc, &["1", "÷"]);
        type_number(&mut calc, &tiny);
        assert!(matches!(
            calc.press("=").unwrap(),
            Outcome::Failed(CalcError::InvalidNumber { .. })
        ));
        assert_eq!(calc.display(), "Error");
    }

    #[test]
    fn test_custom_settings() {
        let mut calc = Controller::with_settings(Settings {
            error_marker: "Erro".to_string(),
            division_scale: 2,
        });
        assert_eq!(run(&mut calc, &["2", "÷", "3", "="]), "0.67");
        assert_eq!(run(&mut calc, &["÷", "0", "="]), "Erro");
    }

    #[test]
    fn test_unknown_label_leaves_state_untouched() {
        let mut calc = Controller::new();
        run(&mut calc, &["1", "2"]);
        let before = calc.snapshot();
        assert!(calc.press("sin").is_err());
        assert_eq!(calc.snapshot(), before);
    }

    #[test]
    fn test_snapshot_serialization() {
        let mut calc = Controller::new();
        run(&mut calc, &["1", "2", "+"]);
        let json = serde_json::to_value(calc.snapshot()).unwrap();
        assert_eq!(json["display"], "12");
        assert_eq!(json["accumulator"], "12");
        assert_eq!(json["pendingOperator"], "add");
        assert_eq!(json["startsNewNumber"], true);
        assert_eq!(json["showingError"], false);
    }
}
