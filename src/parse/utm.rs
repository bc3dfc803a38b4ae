//! Campaign parameter extraction.

use std::collections::BTreeMap;

use url::Url;

use crate::config::UTM_PREFIX;

/// Campaign (`utm_*`) query parameters, keyed by their original spelling.
pub type UtmParams = BTreeMap<String, String>;

/// Extracts campaign tracking parameters from a URL.
///
/// Every query entry whose key starts with `utm_` (compared case-insensitively)
/// is copied with its key casing preserved and its value percent-decoded. When
/// a key repeats, the last value wins. Input that is not an absolute URL
/// yields an empty map.
///
/// # Examples
///
/// ```
/// use link_chain::extract_utm_params;
///
/// let params = extract_utm_params("https://ex.com/?utm_source=google&foo=bar");
/// assert_eq!(params.get("utm_source").map(String::as_str), Some("google"));
/// assert!(extract_utm_params("not a url").is_empty());
/// ```
pub fn extract_utm_params(url: &str) -> UtmParams {
    let Ok(parsed) = Url::parse(url) else {
        return UtmParams::new();
    };

    parsed
        .query_pairs()
        .filter(|(key, _)| key.to_lowercase().starts_with(UTM_PREFIX))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}
