//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (hop ceiling, timeouts, size limits)
//! - Canonical terminal hop messages
//! - Configuration types shared by the library and the CLI

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, FallbackMode, LogFormat, LogLevel, Opt};
