//! Derived enrichments of a resolved link.
//!
//! This module extracts:
//! - Campaign tracking (`utm_*`) parameters from a URL
//! - Link-preview metadata (Open Graph title/image, document title) from a page
//!
//! HTML parsing is done using CSS selectors via the `scraper` crate.

mod preview;
mod utm;

// Re-export public API
pub use preview::{fetch_preview, parse_open_graph, OpenGraphPreview};
pub use utm::{extract_utm_params, UtmParams};
