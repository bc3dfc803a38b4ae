//! Redirect chain fetching.
//!
//! This module contains the hop data model, the single-hop fetcher and
//! fallback collaborators, and the resolver that drives them.

mod context;
mod fallback;
mod fetcher;
mod hop;
mod redirects;
mod request;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export public API
pub use context::TraceContext;
pub use fallback::{FallbackResolver, FollowingFallback, NoFallback};
pub use fetcher::{HopFetcher, HopResponse, ReqwestHopFetcher};
pub use hop::{Hop, HopHeaders, RedirectChain};
pub use redirects::RedirectResolver;
pub use request::collect_headers;

pub(crate) use request::RequestHeaders;
