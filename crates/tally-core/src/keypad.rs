//! # Keypad Layout
//!
//! Describes the button grid as data. A GUI toolkit places one button per
//! [`KeyCap`] and forwards its [`Input`] to the controller.
//!
//! ```text
//! ┌─────┬─────┬─────┬─────┐
//! │  C  │  ±  │  %  │  ÷  │   row 0
//! ├─────┼─────┼─────┼─────┤
//! │  7  │  8  │  9  │  ×  │   row 1
//! ├─────┼─────┼─────┼─────┤
//! │  4  │  5  │  6  │  −  │   row 2
//! ├─────┼─────┼─────┼─────┤
//! │  1  │  2  │  3  │  +  │   row 3
//! ├─────┴─────┼─────┼─────┤
//! │     0     │  .  │  =  │   row 4 ('0' spans two columns)
//! └───────────┴─────┴─────┘
//! ```

use crate::error::InputError;
use crate::input::{Digit, Input, Operator};

/// Number of columns in the standard grid.
pub const COLUMNS: usize = 4;

const STANDARD_ROWS: [&[Input]; 5] = [
    &[
        Input::Clear,
        Input::ToggleSign,
        Input::Percent,
        Input::Operator(Operator::Divide),
    ],
    &[digit(7), digit(8), digit(9), Input::Operator(Operator::Multiply)],
    &[digit(4), digit(5), digit(6), Input::Operator(Operator::Subtract)],
    &[digit(1), digit(2), digit(3), Input::Operator(Operator::Add)],
    &[digit(0), Input::Decimal, Input::Equals],
];

const fn digit(value: usize) -> Input {
    Input::Digit(Digit::ALL[value])
}

/// One button on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCap {
    pub label: &'static str,
    pub input: Input,
    pub row: usize,
    pub column: usize,
    /// Columns covered, starting at `column`.
    pub span: usize,
}

impl KeyCap {
    /// Whether this key covers the given cell.
    pub fn covers(&self, row: usize, column: usize) -> bool {
        self.row == row && column >= self.column && column < self.column + self.span
    }
}

/// The full button grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypad {
    keys: Vec<KeyCap>,
}

impl Keypad {
    /// The four-function layout: 19 keys on a 5×4 grid.
    pub fn standard() -> Self {
        let mut keys = Vec::new();

        for (row, inputs) in STANDARD_ROWS.iter().enumerate() {
            let mut column = 0;
            for &input in inputs.iter() {
                let span = if input == digit(0) { 2 } else { 1 };
                keys.push(KeyCap {
                    label: input.label(),
                    input,
                    row,
                    column,
                    span,
                });
                column += span;
            }
        }

        Keypad { keys }
    }

    /// All keys in reading order.
    pub fn keys(&self) -> &[KeyCap] {
        &self.keys
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.keys.iter().map(|k| k.row + 1).max().unwrap_or(0)
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        COLUMNS
    }

    /// The key covering a grid cell, if any.
    pub fn at(&self, row: usize, column: usize) -> Option<&KeyCap> {
        self.keys.iter().find(|k| k.covers(row, column))
    }

    /// The key that sends `input`.
    pub fn find(&self, input: Input) -> Option<&KeyCap> {
        self.keys.iter().find(|k| k.input == input)
    }

    /// The key for a label in any accepted spelling (`"*"` finds `×`).
    pub fn find_label(&self, label: &str) -> Result<Option<&KeyCap>, InputError> {
        let input: Input = label.parse()?;
        Ok(self.find(input))
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Keypad::standard()
    }
}
