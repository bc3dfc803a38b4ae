//! HTTP client initialization.
//!
//! This module provides functions to initialize HTTP clients with proper
//! configuration for requests and redirect handling.

use std::sync::Arc;

use crate::config::Config;
use reqwest::ClientBuilder;

/// Initializes the HTTP client with default settings.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the configuration
/// - Per-request timeout from the configuration
/// - Redirect following enabled (reqwest's default policy)
///
/// Used for link previews and for fallback recovery, where only the final
/// destination matters.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .timeout(config.request_timeout())
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

/// Initializes a shared HTTP client for redirect resolution.
///
/// Creates a `reqwest::Client` with redirects disabled so the resolver sees
/// every 3xx response and its `Location` header.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_redirect_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(config.request_timeout())
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
