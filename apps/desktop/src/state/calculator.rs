//! # Calculator State
//!
//! Holds the session's [`Controller`].
//!
//! ## Thread Safety
//! GUI toolkits often deliver button callbacks on whichever thread owns the
//! widget, and a frontend may hold several handles to the same session. The
//! controller is wrapped in `Arc<Mutex<T>>` so that:
//! 1. Every handle sees the same calculator
//! 2. Exactly one input is processed at a time, to completion

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tally_core::{Controller, Settings};

/// Shared calculator session.
///
/// Cloning is cheap and yields another handle to the same controller.
#[derive(Debug, Clone)]
pub struct CalculatorState {
    controller: Arc<Mutex<Controller>>,
}

impl CalculatorState {
    /// Creates a session in the initial state.
    pub fn new(settings: Settings) -> Self {
        CalculatorState {
            controller: Arc::new(Mutex::new(Controller::with_settings(settings))),
        }
    }

    /// Executes a function with read access to the controller.
    ///
    /// ## Usage
    /// ```rust
    /// use tally_desktop_lib::state::CalculatorState;
    ///
    /// let state = CalculatorState::default();
    /// let text = state.with_controller(|c| c.display().to_string());
    /// assert_eq!(text, "0");
    /// ```
    pub fn with_controller<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Controller) -> R,
    {
        f(&self.lock())
    }

    /// Executes a function with write access to the controller.
    pub fn with_controller_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Controller) -> R,
    {
        f(&mut self.lock())
    }

    // The controller is consistent between inputs, so a panic in another
    // holder does not invalidate it.
    fn lock(&self) -> MutexGuard<'_, Controller> {
        self.controller
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
