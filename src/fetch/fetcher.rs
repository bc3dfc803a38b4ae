//! Single-hop fetching.
//!
//! A `HopFetcher` issues exactly one request for a URL and reports the status
//! and headers without following any redirect. The resolver never sees the
//! transport behind it.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error_handling::HopFetchError;
use crate::fetch::hop::HopHeaders;
use crate::fetch::request::{collect_headers, RequestHeaders};

/// Status and headers observed for one hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HopResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers, keyed by lowercase name
    pub headers: HopHeaders,
}

impl HopResponse {
    /// Creates a response record.
    pub fn new(status: u16, headers: HopHeaders) -> Self {
        Self { status, headers }
    }

    /// The raw `Location` header, if present and non-empty.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get("location")
            .map(String::as_str)
            .filter(|loc| !loc.is_empty())
    }
}

/// Issues one non-following request per call.
///
/// Implementations must not follow redirects: a 3xx response is returned as
/// is so the caller can read its `Location` header.
#[async_trait]
pub trait HopFetcher: Send + Sync {
    /// Requests `url` once.
    async fn fetch_hop(&self, url: &str) -> Result<HopResponse, HopFetchError>;
}

/// `HopFetcher` backed by a reqwest client with redirects disabled.
pub struct ReqwestHopFetcher {
    client: Arc<reqwest::Client>,
}

impl ReqwestHopFetcher {
    /// Wraps a client built by [`crate::initialization::init_redirect_client`].
    ///
    /// A client that follows redirects would collapse each chain into a
    /// single pseudo-hop.
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HopFetcher for ReqwestHopFetcher {
    async fn fetch_hop(&self, url: &str) -> Result<HopResponse, HopFetchError> {
        let resp = RequestHeaders::apply_to_request_builder(self.client.get(url))
            .send()
            .await?;

        // The body is never read; dropping the response releases the connection
        Ok(HopResponse::new(
            resp.status().as_u16(),
            collect_headers(resp.headers()),
        ))
    }
}
