//! link_chain library: hop-by-hop redirect chain resolution
//!
//! This library discovers the full path of HTTP redirects a client traverses
//! from a starting URL to its final destination. Each hop records its status
//! and headers, and anomalies (redirect loops, scheme changes, transport
//! failures, runaway chains) are encoded into the chain rather than raised as
//! errors. Two enrichments are derived from the final URL: its campaign
//! (`utm_*`) parameters and a small link preview.
//!
//! # Example
//!
//! ```no_run
//! use link_chain::{trace_link, Config, TraceContext};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = TraceContext::from_config(&Config::default())?;
//! let trace = trace_link("https://bit.ly/example", &ctx).await;
//!
//! for hop in trace.hops.hops() {
//!     println!("{:?} {}", hop.status, hop.url);
//! }
//! if let Some(error) = trace.hops.final_error() {
//!     eprintln!("warning: {}", error);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

#![warn(missing_docs)]

pub mod app;
pub mod config;
pub mod error_handling;
mod fetch;
pub mod initialization;
mod parse;
mod utils;

// Re-export public API
pub use config::{Config, FallbackMode, LogFormat, LogLevel, MAX_HOPS};
pub use error_handling::{ChainTermination, HopFetchError, InitializationError};
pub use fetch::{
    collect_headers, FallbackResolver, FollowingFallback, Hop, HopFetcher, HopHeaders,
    HopResponse, NoFallback, RedirectChain, RedirectResolver, ReqwestHopFetcher, TraceContext,
};
pub use parse::{extract_utm_params, fetch_preview, parse_open_graph, OpenGraphPreview, UtmParams};
pub use trace::{trace_link, trace_links, LinkTrace};

// Internal trace module (combines resolution with the final-URL enrichments)
mod trace {
    use futures::stream::FuturesUnordered;
    use futures::StreamExt;
    use serde::{Deserialize, Serialize};
    use tokio::time::Instant;
    use tokio_util::sync::CancellationToken;

    use crate::fetch::{RedirectChain, TraceContext};
    use crate::parse::{extract_utm_params, fetch_preview, OpenGraphPreview, UtmParams};

    /// Result of tracing one link.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct LinkTrace {
        /// URL the trace started from
        pub start_url: String,
        /// Every hop from the start URL to the final reachable point
        pub hops: RedirectChain,
        /// Campaign parameters of the final URL
        pub utm: UtmParams,
        /// Preview of the final URL, when enabled and retrievable
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub preview: Option<OpenGraphPreview>,
    }

    impl LinkTrace {
        /// URL of the final hop, or the start URL for an empty chain.
        pub fn final_url(&self) -> &str {
            self.hops.final_url().unwrap_or(&self.start_url)
        }
    }

    /// Traces one link: resolves its redirect chain, then derives the
    /// campaign parameters and preview of the final hop URL.
    ///
    /// The preview is fetched at most once, for the final URL only, whatever
    /// the chain length. When the context carries an overall budget it covers
    /// the whole trace: a traversal still running when it is spent ends with a
    /// cancellation hop (hops gathered before that are kept), and a preview
    /// still running is abandoned.
    ///
    /// Never fails: every failure is recorded in the returned trace.
    pub async fn trace_link(start_url: &str, ctx: &TraceContext) -> LinkTrace {
        let deadline = ctx.overall_timeout.map(|budget| Instant::now() + budget);
        let hops = match deadline {
            Some(deadline) => {
                let token = CancellationToken::new();
                let timer = {
                    let token = token.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep_until(deadline).await;
                        token.cancel();
                    })
                };
                let hops = ctx
                    .resolver
                    .resolve_with_cancellation(start_url, &token)
                    .await;
                timer.abort();
                hops
            }
            None => ctx.resolver.resolve(start_url).await,
        };

        let final_url = hops.final_url().unwrap_or(start_url).to_string();
        log::info!(
            "Resolved {} -> {} in {} hop{}",
            start_url,
            final_url,
            hops.len(),
            if hops.len() == 1 { "" } else { "s" }
        );
        if let Some(error) = hops.final_error() {
            log::warn!("Trace of {} ended with: {}", start_url, error);
        }

        let utm = extract_utm_params(&final_url);
        let preview = match (ctx.preview, deadline) {
            (false, _) => None,
            (true, None) => fetch_preview(&ctx.client, &final_url).await,
            (true, Some(deadline)) => {
                match tokio::time::timeout_at(deadline, fetch_preview(&ctx.client, &final_url))
                    .await
                {
                    Ok(preview) => preview,
                    Err(_) => {
                        log::warn!("Preview of {} abandoned: trace budget spent", final_url);
                        None
                    }
                }
            }
        };

        LinkTrace {
            start_url: start_url.to_string(),
            hops,
            utm,
            preview,
        }
    }

    /// Traces several links concurrently and returns the traces in input order.
    ///
    /// Each trace is independent: nothing is shared between them except the
    /// clients in `ctx`.
    pub async fn trace_links(urls: &[String], ctx: &TraceContext) -> Vec<LinkTrace> {
        let mut tasks: FuturesUnordered<_> = urls
            .iter()
            .enumerate()
            .map(|(index, url)| async move { (index, trace_link(url, ctx).await) })
            .collect();

        let mut traces: Vec<(usize, LinkTrace)> = Vec::with_capacity(urls.len());
        while let Some(done) = tasks.next().await {
            traces.push(done);
        }
        traces.sort_by_key(|(index, _)| *index);
        traces.into_iter().map(|(_, trace)| trace).collect()
    }

}
