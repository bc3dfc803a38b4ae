//! Utility functions.
//!
//! This module provides:
//! - String bounding utilities
//! - CSS selector parsing utilities

mod sanitize;
mod selector;

pub use sanitize::truncate_at_char_boundary;
pub use selector::parse_selector_unsafe;
