//! Best-effort destination recovery after a transport failure.
//!
//! When a hop cannot be observed directly, the only remaining signal may be
//! the URL an auto-following request ends up at, even though nothing else
//! about that response is readable. Recovery is advisory: it never fails,
//! it only reports "no result".

use std::sync::Arc;

use async_trait::async_trait;

use crate::fetch::request::RequestHeaders;

/// Recovers a resolved destination URL for a hop whose direct request failed.
#[async_trait]
pub trait FallbackResolver: Send + Sync {
    /// Returns the final URL reached from `url`, or `None` if nothing usable was observed.
    ///
    /// Implementations swallow their own errors.
    async fn attempt_final_url(&self, url: &str) -> Option<String>;
}

/// Follows redirects automatically and reports where the request ended up.
pub struct FollowingFallback {
    client: Arc<reqwest::Client>,
}

impl FollowingFallback {
    /// Wraps a client built by [`crate::initialization::init_client`] (redirects enabled).
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FallbackResolver for FollowingFallback {
    async fn attempt_final_url(&self, url: &str) -> Option<String> {
        match RequestHeaders::apply_to_request_builder(self.client.get(url))
            .send()
            .await
        {
            Ok(resp) => {
                let final_url = resp.url().to_string();
                log::debug!("Fallback for {} resolved to {}", url, final_url);
                Some(final_url)
            }
            Err(e) => {
                log::debug!("Fallback for {} failed: {}", url, e);
                None
            }
        }
    }
}

/// Recovery that never produces a result.
///
/// Correct for resolvers that already observe every hop directly, such as a
/// server-side deployment with no cross-origin restrictions.
pub struct NoFallback;

#[async_trait]
impl FallbackResolver for NoFallback {
    async fn attempt_final_url(&self, _url: &str) -> Option<String> {
        None
    }
}
