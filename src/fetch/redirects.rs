//! HTTP redirect chain resolution.
//!
//! This module follows redirect chains manually, one request per hop, to record
//! the full path from the initial URL to the final destination. Every failure
//! mode is encoded into the returned chain; resolution itself never fails.

use std::collections::HashSet;
use std::sync::Arc;

use reqwest::Url;
use tokio_util::sync::CancellationToken;

use crate::config::{CANCELLED_MESSAGE, LOOP_DETECTED_MESSAGE, MAX_HOPS, MAX_REDIRECTS_MESSAGE};
use crate::error_handling::HopFetchError;
use crate::fetch::fallback::FallbackResolver;
use crate::fetch::fetcher::{HopFetcher, HopResponse};
use crate::fetch::hop::{Hop, RedirectChain};

/// What the walker does after recording a hop.
enum Step {
    /// Follow the redirect to this URL.
    Follow(String),
    /// The chain ends on the hop just recorded.
    Stop,
}

/// Walks redirect chains hop by hop.
///
/// Each call to [`resolve`](Self::resolve) owns its own visited set, so one
/// resolver can serve any number of concurrent traversals.
#[derive(Clone)]
pub struct RedirectResolver {
    fetcher: Arc<dyn HopFetcher>,
    fallback: Arc<dyn FallbackResolver>,
}

impl RedirectResolver {
    /// Creates a resolver from a non-following hop fetcher and a fallback.
    pub fn new(fetcher: Arc<dyn HopFetcher>, fallback: Arc<dyn FallbackResolver>) -> Self {
        Self { fetcher, fallback }
    }

    /// Resolves the redirect chain starting at `start_url`.
    ///
    /// Returns at most `MAX_HOPS + 1` hops. The last hop is terminal: a
    /// non-redirect response, a redirect without a usable `Location`, a loop
    /// marker, a max-redirects marker, or a transport error (optionally
    /// followed by one hop recovered by the fallback).
    ///
    /// `start_url` must already be absolute; resolving user input against a
    /// base is the caller's job.
    pub async fn resolve(&self, start_url: &str) -> RedirectChain {
        self.walk(start_url, None).await
    }

    /// Like [`resolve`](Self::resolve), but stops with a cancellation marker hop
    /// as soon as `token` is cancelled. Hops recorded before that are kept, so
    /// a cancelled fallback leaves the transport-error hop followed by the
    /// marker.
    pub async fn resolve_with_cancellation(
        &self,
        start_url: &str,
        token: &CancellationToken,
    ) -> RedirectChain {
        self.walk(start_url, Some(token)).await
    }

    async fn walk(&self, start_url: &str, cancel: Option<&CancellationToken>) -> RedirectChain {
        let mut chain = RedirectChain::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut current = start_url.to_string();

        for _ in 0..MAX_HOPS {
            if cancel.is_some_and(CancellationToken::is_cancelled) {
                log::warn!("Redirect resolution cancelled at {}", current);
                chain.push(Hop::failed(current, CANCELLED_MESSAGE));
                return chain;
            }

            // Exact string match, query string included
            if !visited.insert(current.clone()) {
                log::warn!("Redirect loop detected at {}", current);
                chain.push(Hop::failed(current, LOOP_DETECTED_MESSAGE));
                return chain;
            }

            let Some(outcome) = self.fetch(&current, cancel).await else {
                log::warn!("Redirect resolution cancelled at {}", current);
                chain.push(Hop::failed(current, CANCELLED_MESSAGE));
                return chain;
            };

            match outcome {
                Ok(response) => {
                    let (hop, step) = follow(&current, response);
                    chain.push(hop);
                    match step {
                        Step::Follow(next) => current = next,
                        Step::Stop => return chain,
                    }
                }
                Err(e) => {
                    log::warn!("Request to {} failed: {}", current, e);
                    chain.push(Hop::failed(current.clone(), e.to_string()));
                    match self.recover(&current, cancel).await {
                        Some(Some(final_url)) => chain.push(Hop::resolved(final_url)),
                        Some(None) => {}
                        None => {
                            log::warn!("Fallback for {} cancelled", current);
                            chain.push(Hop::failed(current, CANCELLED_MESSAGE));
                        }
                    }
                    return chain;
                }
            }
        }

        log::warn!(
            "Gave up on {} after {} redirects at {}",
            start_url,
            MAX_HOPS,
            current
        );
        chain.push(Hop::failed(current, MAX_REDIRECTS_MESSAGE));
        chain
    }

    /// Issues the hop request, racing it against cancellation. `None` means cancelled.
    async fn fetch(
        &self,
        url: &str,
        cancel: Option<&CancellationToken>,
    ) -> Option<Result<HopResponse, HopFetchError>> {
        match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => None,
                outcome = self.fetcher.fetch_hop(url) => Some(outcome),
            },
            None => Some(self.fetcher.fetch_hop(url).await),
        }
    }

    /// Asks the fallback once for a destination distinct from `url`.
    ///
    /// The outer `None` means cancelled; `Some(None)` means nothing usable.
    async fn recover(
        &self,
        url: &str,
        cancel: Option<&CancellationToken>,
    ) -> Option<Option<String>> {
        let recovered = match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => return None,
                recovered = self.fallback.attempt_final_url(url) => recovered,
            },
            None => self.fallback.attempt_final_url(url).await,
        };
        Some(recovered.filter(|final_url| !final_url.is_empty() && final_url != url))
    }
}

/// Builds the hop for a response and decides whether to continue.
fn follow(current: &str, response: HopResponse) -> (Hop, Step) {
    let status = response.status;
    log::debug!("{} -> {}", current, status);

    if !(300..400).contains(&status) {
        return (Hop::response(current, status, response.headers), Step::Stop);
    }

    let next = response.location().and_then(|loc| {
        Url::parse(current)
            .and_then(|base| base.join(loc).map(|next| (base, next)))
            .ok()
    });

    match next {
        Some((base, next)) => {
            let mixed_protocol = base.scheme() != next.scheme();
            if mixed_protocol {
                log::warn!(
                    "Redirect from {} changes scheme {} -> {}",
                    current,
                    base.scheme(),
                    next.scheme()
                );
            }
            let mut hop = Hop::response(current, status, response.headers);
            hop.mixed_protocol = Some(mixed_protocol);
            (hop, Step::Follow(next.to_string()))
        }
        None => {
            log::warn!(
                "Redirect status {} for {} but no usable Location header",
                status,
                current
            );
            (Hop::response(current, status, response.headers), Step::Stop)
        }
    }
}
