//! # Commands Module
//!
//! All commands exposed to the GUI toolkit.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (exports)
//! ├── calculator.rs  ◄─── Key presses, display, clear
//! └── keypad.rs      ◄─── Button layout
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Button "7" clicked                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  press_key(&calculator, "7")                                            │
//! │         │                                                               │
//! │         │  lock Controller, handle one Input, unlock                    │
//! │         ▼                                                               │
//! │  DisplayResponse { text: "7", isError: false, pendingOperator: null }  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Display widget renders `text` verbatim, right-aligned                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod calculator;
pub mod keypad;
