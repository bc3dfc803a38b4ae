//! Error handling.
//!
//! This module provides:
//! - Typed errors for initialization and for single hop requests
//! - The taxonomy of conditions that terminate a redirect chain
//!
//! Nothing on the tracing path returns these to the caller: hop failures are
//! converted into `Hop.error` values at the boundary where they occur.

mod types;

// Re-export public API
pub use types::{ChainTermination, HopFetchError, InitializationError};
