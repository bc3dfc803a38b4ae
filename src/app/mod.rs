//! Application helpers for the CLI.

mod url;

pub use url::normalize_start_url;
