//! # Tally Desktop Library
//!
//! The shell a GUI toolkit embeds to get a working calculator: it loads
//! configuration, sets up logging, owns the session state and exposes one
//! command per user action.
//!
//! ## Module Organization
//! ```text
//! tally_desktop_lib/
//! ├── lib.rs             ◄─── You are here (startup)
//! ├── state/
//! │   ├── mod.rs         ◄─── State type exports
//! │   ├── calculator.rs  ◄─── Shared Controller session
//! │   └── config.rs      ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs         ◄─── Command exports
//! │   ├── calculator.rs  ◄─── press_key, get_display, clear
//! │   └── keypad.rs      ◄─── get_keypad
//! └── error.rs           ◄─── API error type for commands
//! ```
//!
//! ## Embedding
//! ```rust,no_run
//! use tally_desktop_lib::commands::{calculator, keypad};
//!
//! let calculator = tally_desktop_lib::start(None);
//!
//! // Build one button per key...
//! for key in keypad::get_keypad().keys {
//!     println!("{} at ({}, {})", key.label, key.row, key.column);
//! }
//!
//! // ...and forward each click
//! let shown = calculator::press_key(&calculator, "7").unwrap();
//! assert_eq!(shown.text, "7");
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use state::{CalculatorState, ConfigState};

/// Starts a calculator session and returns its state.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Session Startup                                   │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → tally.toml → TALLY_* environment                       │
/// │     • invalid config falls back to defaults                             │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • RUST_LOG if set, else the configured log_filter                   │
/// │                                                                         │
/// │  3. Initialize State Objects ─────────────────────────────────────────► │
/// │     • CalculatorState: Controller in its initial state                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn start(config_path: Option<PathBuf>) -> CalculatorState {
    let config = ConfigState::load_or_default(config_path);

    init_tracing(&config.log_filter);

    info!(
        error_marker = %config.error_marker,
        division_scale = config.division_scale,
        "Starting Tally calculator session"
    );

    CalculatorState::new(config.settings())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every key press
/// - `RUST_LOG=tally=trace` - Trace for tally crates only
/// - Default: `fallback_filter` (from config)
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing(fallback_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_filter));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::calculator::press_key;

    #[test]
    fn test_start_uses_configured_marker() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.toml");
        std::fs::write(&path, "error_marker = \"Erro\"\n").unwrap();

        let calculator = start(Some(path));
        for label in ["1", "÷", "0"] {
            press_key(&calculator, label).unwrap();
        }
        let response = press_key(&calculator, "=").unwrap();
        assert_eq!(response.text, "Erro");
    }

    #[test]
    fn test_start_with_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.toml");
        std::fs::write(&path, "division_scale = 2\n").unwrap();

        let calculator = start(Some(path));
        let shown = ["2", "÷", "3", "="]
            .iter()
            .map(|label| press_key(&calculator, label).unwrap())
            .last()
            .unwrap();
        assert_eq!(shown.text, "0.67");
    }

    #[test]
    fn test_init_tracing_twice_is_harmless() {
        init_tracing("info");
        init_tracing("debug");
    }
}
