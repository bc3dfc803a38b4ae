//! HTTP request building and header extraction.
//!
//! This module provides utilities for constructing realistic HTTP requests
//! and flattening response headers into hop records.

use reqwest::header::HeaderMap;

use crate::config::HEADER_VALUE_SEPARATOR;
use crate::fetch::hop::HopHeaders;

/// Realistic browser request headers.
///
/// Every request the crate issues (hops, fallback, preview) carries the same
/// browser-like header set. The User-Agent itself is set on the client.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Applies the standard request headers to a `reqwest::RequestBuilder`.
    pub(crate) fn apply_to_request_builder(
        builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        builder
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(
                reqwest::header::HeaderName::from_static("sec-fetch-dest"),
                "document",
            )
            .header(
                reqwest::header::HeaderName::from_static("sec-fetch-mode"),
                "navigate",
            )
            .header(reqwest::header::UPGRADE_INSECURE_REQUESTS, "1")
    }
}

/// Flattens a response header map into hop headers.
///
/// Names are lowercase (as `HeaderMap` stores them) and iterate in sorted
/// order. A header that appears more than once is joined with `", "`. Values
/// that are not valid UTF-8 are converted lossily rather than dropped.
pub fn collect_headers(headers: &HeaderMap) -> HopHeaders {
    let mut collected = HopHeaders::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing: &mut String| {
                existing.push_str(HEADER_VALUE_SEPARATOR);
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }
    collected
}
