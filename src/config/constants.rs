//! Configuration constants.
//!
//! This module defines the constants used throughout the crate, including the
//! hop ceiling, default timeouts, size limits and the canonical error strings
//! written into terminal hops.

// Redirect handling
/// Maximum number of traversal steps in one redirect chain.
///
/// A chain holds at most `MAX_HOPS + 1` hops: the extra slot is reserved for
/// the terminal "maximum redirects" marker. Not configurable.
pub const MAX_HOPS: usize = 20;

// Terminal hop messages
/// Error recorded when a URL is visited twice within one traversal.
pub const LOOP_DETECTED_MESSAGE: &str = "Redirect loop detected";
/// Error recorded when the hop ceiling is reached without a terminal response.
pub const MAX_REDIRECTS_MESSAGE: &str = "Maximum redirects reached";
/// Error recorded when a traversal is cancelled before reaching a terminal response.
pub const CANCELLED_MESSAGE: &str = "Redirect resolution cancelled";

// Network operation timeouts
/// Default per-hop request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Response and body size limits
/// Maximum preview body size in bytes (2MB)
/// Larger bodies are truncated before HTML parsing; preview tags live in `<head>`
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Separator used when a response repeats a header name.
pub const HEADER_VALUE_SEPARATOR: &str = ", ";

/// Query parameter prefix for campaign tracking parameters (compared lowercase).
pub const UTM_PREFIX: &str = "utm_";
