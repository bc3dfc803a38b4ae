//! Shared context for tracing operations.
//!
//! This module defines the `TraceContext` struct that groups the shared
//! resources needed to trace links, so callers build clients once and reuse
//! them across any number of concurrent traces.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, FallbackMode};
use crate::error_handling::InitializationError;
use crate::fetch::fallback::{FallbackResolver, FollowingFallback, NoFallback};
use crate::fetch::fetcher::ReqwestHopFetcher;
use crate::fetch::redirects::RedirectResolver;
use crate::initialization::{init_client, init_redirect_client};

/// Context containing all shared resources needed to trace a link.
#[derive(Clone)]
pub struct TraceContext {
    /// HTTP client for previews and fallback recovery (with redirects enabled)
    pub client: Arc<reqwest::Client>,
    /// Hop-by-hop redirect resolver (built on a client with redirects disabled)
    pub resolver: RedirectResolver,
    /// Wall-clock budget for one trace (traversal and preview)
    pub overall_timeout: Option<Duration>,
    /// Whether to fetch link-preview metadata for the final URL
    pub preview: bool,
}

impl TraceContext {
    /// Creates a new `TraceContext` with the given resources.
    pub fn new(
        client: Arc<reqwest::Client>,
        resolver: RedirectResolver,
        overall_timeout: Option<Duration>,
        preview: bool,
    ) -> Self {
        Self {
            client,
            resolver,
            overall_timeout,
            preview,
        }
    }

    /// Builds the HTTP clients and resolver described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if either client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        let client = init_client(config)?;
        let redirect_client = init_redirect_client(config)?;

        let fallback: Arc<dyn FallbackResolver> = match config.fallback {
            FallbackMode::Follow => Arc::new(FollowingFallback::new(Arc::clone(&client))),
            FallbackMode::Disabled => Arc::new(NoFallback),
        };
        let resolver =
            RedirectResolver::new(Arc::new(ReqwestHopFetcher::new(redirect_client)), fallback);

        Ok(Self::new(
            client,
            resolver,
            config.overall_timeout(),
            config.preview,
        ))
    }
}
