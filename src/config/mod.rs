//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (default column names, pool limits, env var names)
//! - Connection settings
//! - Logging option types

mod constants;
mod settings;
mod types;

// Re-export all constants
pub use constants::*;
pub use settings::DbSettings;
pub use types::{LogFormat, LogLevel};
