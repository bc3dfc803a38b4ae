//! Hop and redirect chain data structures.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{CANCELLED_MESSAGE, LOOP_DETECTED_MESSAGE, MAX_REDIRECTS_MESSAGE};
use crate::error_handling::ChainTermination;

/// Response headers of one hop, keyed by lowercase header name.
pub type HopHeaders = BTreeMap<String, String>;

/// One observed HTTP response (or failure) during redirect traversal.
///
/// Absent optional fields are omitted when serialized, so a hop recovered by
/// the fallback serializes as `{"url": "..."}` only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hop {
    /// URL requested at this step
    pub url: String,
    /// HTTP status code of the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Response headers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HopHeaders>,
    /// Failure recorded at this step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Set on a redirecting hop when the redirect target uses a different scheme
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixed_protocol: Option<bool>,
}

impl Hop {
    /// A hop that received an HTTP response.
    pub fn response(url: impl Into<String>, status: u16, headers: HopHeaders) -> Self {
        Self {
            url: url.into(),
            status: Some(status),
            headers: Some(headers),
            ..Default::default()
        }
    }

    /// A hop that ended in an error.
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// A destination recovered without header visibility (no status, no headers).
    pub fn resolved(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Whether the hop carries a 3xx status.
    pub fn is_redirect(&self) -> bool {
        matches!(self.status, Some(code) if (300..400).contains(&code))
    }

    /// Looks up a response header by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .as_ref()?
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// The ordered sequence of hops from a start URL to the final reachable point.
///
/// The last element is always terminal: a non-redirect response, a redirect
/// without a usable `Location`, a loop or max-redirects marker, a cancellation
/// marker, or a transport-error hop optionally followed by one recovered hop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RedirectChain(Vec<Hop>);

impl RedirectChain {
    pub(crate) fn new() -> Self {
        Self(Vec::new())
    }

    pub(crate) fn push(&mut self, hop: Hop) {
        self.0.push(hop);
    }

    /// All hops in traversal order.
    pub fn hops(&self) -> &[Hop] {
        &self.0
    }

    /// Number of hops.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the chain has no hops. A resolved chain always has at least one.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The terminal hop.
    pub fn final_hop(&self) -> Option<&Hop> {
        self.0.last()
    }

    /// URL of the terminal hop.
    pub fn final_url(&self) -> Option<&str> {
        self.final_hop().map(|hop| hop.url.as_str())
    }

    /// Error of the terminal hop, if it has one.
    pub fn final_error(&self) -> Option<&str> {
        self.final_hop()?.error.as_deref()
    }

    /// Whether any transition in the chain switched scheme.
    pub fn has_mixed_protocol(&self) -> bool {
        self.0.iter().any(|hop| hop.mixed_protocol == Some(true))
    }

    /// Number of redirect responses in the chain.
    pub fn redirect_count(&self) -> usize {
        self.0.iter().filter(|hop| hop.is_redirect()).count()
    }

    /// Classifies how the traversal ended.
    pub fn termination(&self) -> Option<ChainTermination> {
        let last = self.final_hop()?;
        let termination = match (last.error.as_deref(), last.status) {
            (Some(LOOP_DETECTED_MESSAGE), _) => ChainTermination::LoopDetected,
            (Some(MAX_REDIRECTS_MESSAGE), _) => ChainTermination::MaxRedirectsExceeded,
            (Some(CANCELLED_MESSAGE), _) => ChainTermination::Cancelled,
            (Some(_), _) => ChainTermination::TransportError,
            // Only a fallback-recovered hop has neither status nor error
            (None, None) => ChainTermination::TransportError,
            (None, Some(_)) if last.is_redirect() => ChainTermination::MalformedRedirect,
            (None, Some(_)) => ChainTermination::Completed,
        };
        Some(termination)
    }

    /// Consumes the chain, returning the hops.
    pub fn into_hops(self) -> Vec<Hop> {
        self.0
    }
}

impl From<Vec<Hop>> for RedirectChain {
    fn from(hops: Vec<Hop>) -> Self {
        Self(hops)
    }
}

impl<'a> IntoIterator for &'a RedirectChain {
    type Item = &'a Hop;
    type IntoIter = std::slice::Iter<'a, Hop>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HopHeaders {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_recovered_hop_serializes_url_only() {
        let json = serde_json::to_string(&Hop::resolved("https://final.com")).unwrap();
        assert_eq!(json, r#"{"url":"https://final.com"}"#);
    }

    #[test]
    fn test_mixed_protocol_uses_camel_case() {
        let mut hop = Hop::response("http://a.com", 301, headers(&[("location", "https://a.com")]));
        hop.mixed_protocol = Some(true);
        let value = serde_json::to_value(&hop).unwrap();
        assert_eq!(value["mixedProtocol"], serde_json::json!(true));
        assert_eq!(value["status"], serde_json::json!(301));
        assert_eq!(value["headers"]["location"], serde_json::json!("https://a.com"));
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_chain_serializes_as_array() {
        let chain = RedirectChain::from(vec![
            Hop::failed("https://a.com", "blocked"),
            Hop::resolved("https://final.com"),
        ]);
        let json = serde_json::to_string(&chain).unwrap();
        assert_eq!(
            json,
            r#"[{"url":"https://a.com","error":"blocked"},{"url":"https://final.com"}]"#
        );
        let back: RedirectChain = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chain);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let hop = Hop::response("https://a.com", 302, headers(&[("location", "/next")]));
        assert_eq!(hop.header("Location"), Some("/next"));
        assert_eq!(hop.header("content-type"), None);
        assert_eq!(Hop::failed("https://a.com", "x").header("location"), None);
    }

    #[test]
    fn test_termination_classification() {
        let ok = RedirectChain::from(vec![Hop::response("https://a.com", 200, HopHeaders::new())]);
        assert_eq!(ok.termination(), Some(ChainTermination::Completed));

        let not_found =
            RedirectChain::from(vec![Hop::response("https://a.com", 404, HopHeaders::new())]);
        assert_eq!(not_found.termination(), Some(ChainTermination::Completed));

        let malformed =
            RedirectChain::from(vec![Hop::response("https://a.com", 302, HopHeaders::new())]);
        assert_eq!(
            malformed.termination(),
            Some(ChainTermination::MalformedRedirect)
        );

        let looped = RedirectChain::from(vec![Hop::failed("https://a.com", LOOP_DETECTED_MESSAGE)]);
        assert_eq!(looped.termination(), Some(ChainTermination::LoopDetected));

        let maxed = RedirectChain::from(vec![Hop::failed("https://a.com", MAX_REDIRECTS_MESSAGE)]);
        assert_eq!(
            maxed.termination(),
            Some(ChainTermination::MaxRedirectsExceeded)
        );

        let recovered = RedirectChain::from(vec![
            Hop::failed("https://a.com", "dns error"),
            Hop::resolved("https://final.com"),
        ]);
        assert_eq!(
            recovered.termination(),
            Some(ChainTermination::TransportError)
        );
        assert_eq!(recovered.final_error(), None);

        assert_eq!(RedirectChain::new().termination(), None);
    }

    #[test]
    fn test_chain_accessors() {
        let mut first = Hop::response("http://a.com/", 301, headers(&[("location", "https://a.com/")]));
        first.mixed_protocol = Some(true);
        let chain = RedirectChain::from(vec![
            first,
            Hop::response("https://a.com/", 200, HopHeaders::new()),
        ]);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.final_url(), Some("https://a.com/"));
        assert_eq!(chain.redirect_count(), 1);
        assert!(chain.has_mixed_protocol());
        assert_eq!((&chain).into_iter().count(), 2);
    }
}
