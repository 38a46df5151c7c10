//! # Keypad Commands
//!
//! Hands the button layout to the GUI toolkit so it can build the grid.

use serde::{Deserialize, Serialize};
use tally_core::{KeyCap, Keypad};
use ts_rs::TS;

/// One button to place on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct KeyResponse {
    /// Text on the button, also the label to send back to `press_key`
    pub label: String,
    pub row: usize,
    pub column: usize,
    /// Columns covered (the `0` key covers two)
    pub span: usize,
}

impl From<&KeyCap> for KeyResponse {
    fn from(key: &KeyCap) -> Self {
        KeyResponse {
            label: key.label.to_string(),
            row: key.row,
            column: key.column,
            span: key.span,
        }
    }
}

/// The full grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct KeypadResponse {
    pub rows: usize,
    pub columns: usize,
    pub keys: Vec<KeyResponse>,
}

impl From<&Keypad> for KeypadResponse {
    fn from(keypad: &Keypad) -> Self {
        KeypadResponse {
            rows: keypad.rows(),
            columns: keypad.columns(),
            keys: keypad.keys().iter().map(KeyResponse::from).collect(),
        }
    }
}

/// Gets the standard keypad layout.
pub fn get_keypad() -> KeypadResponse {
    KeypadResponse::from(&Keypad::standard())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::calculator::press_key;
    use crate::state::CalculatorState;

    #[test]
    fn test_keypad_response_shape() {
        let keypad = get_keypad();
        assert_eq!(keypad.rows, 5);
        assert_eq!(keypad.columns, 4);
        assert_eq!(keypad.keys.len(), 19);
        assert_eq!(keypad.keys[0].label, "C");

        let zero = keypad.keys.iter().find(|k| k.label == "0").unwrap();
        assert_eq!(zero.span, 2);
    }

    /// Every label the grid shows is accepted by `press_key`.
    #[test]
    fn test_every_label_is_pressable() {
        let calculator = CalculatorState::default();
        for key in get_keypad().keys {
            assert!(press_key(&calculator, &key.label).is_ok(), "{}", key.label);
        }
    }
}
