//! # Calculator Commands
//!
//! Key presses in, display text out.

use serde::{Deserialize, Serialize};
use tally_core::{Controller, Input, Outcome, Snapshot};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::CalculatorState;

/// What the display widget should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DisplayResponse {
    /// Text to render verbatim
    pub text: String,

    /// Whether `text` is the error marker
    pub is_error: bool,

    /// Symbol of the queued operator, for an optional indicator
    pub pending_operator: Option<String>,
}

impl From<&Controller> for DisplayResponse {
    fn from(controller: &Controller) -> Self {
        DisplayResponse {
            text: controller.display().to_string(),
            is_error: controller.is_showing_error(),
            pending_operator: controller.pending_operator().map(|op| op.symbol().to_string()),
        }
    }
}

/// Handles a button press identified by its label.
///
/// ## Arguments
/// * `label` - Key label, e.g. `"7"`, `"÷"` or `"/"`
///
/// ## Returns
/// The updated display, or `UNKNOWN_KEY` if the label is not on the keypad
/// (state is left untouched in that case)
pub fn press_key(calculator: &CalculatorState, label: &str) -> Result<DisplayResponse, ApiError> {
    let input: Input = label.parse().map_err(|e| {
        warn!(label, "Rejected unknown key");
        ApiError::from(e)
    })?;
    Ok(press(calculator, input))
}

/// Handles a button press.
pub fn press(calculator: &CalculatorState, input: Input) -> DisplayResponse {
    let (outcome, response) = calculator.with_controller_mut(|c| {
        let outcome = c.handle_input(input);
        (outcome, DisplayResponse::from(&*c))
    });

    if let Outcome::Failed(err) = outcome {
        warn!(key = %input, %err, "Arithmetic error, calculator reset");
    }
    debug!(key = %input, display = %response.text, "Key pressed");

    response
}

/// Gets the current display.
pub fn get_display(calculator: &CalculatorState) -> DisplayResponse {
    calculator.with_controller(|c| DisplayResponse::from(c))
}

/// Resets the calculator (same as pressing `C`).
pub fn clear(calculator: &CalculatorState) -> DisplayResponse {
    press(calculator, Input::Clear)
}

/// Gets the full controller state.
pub fn get_snapshot(calculator: &CalculatorState) -> Snapshot {
    calculator.with_controller(Controller::snapshot)
}
