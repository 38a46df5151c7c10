//! # State Module
//!
//! Manages application state for the desktop shell.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────┐      │
//! │  │   CalculatorState        │        │   ConfigState            │      │
//! │  │                          │        │                          │      │
//! │  │  Arc<Mutex<Controller>>  │◄───────│  error_marker            │      │
//! │  │  (one per session)       │settings│  division_scale          │      │
//! │  │                          │        │  log_filter              │      │
//! │  └──────────────────────────┘        └──────────────────────────┘      │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CalculatorState: Mutex serializes key presses                       │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod calculator;
mod config;

pub use calculator::CalculatorState;
pub use config::ConfigState;
