//! Start URL validation and normalization.
//!
//! The resolver only accepts absolute URLs; turning what a user typed into
//! one happens here, before tracing starts.

use log::warn;

/// Maximum URL length (2048 characters), matching common browser and server limits.
const MAX_URL_LENGTH: usize = 2048;

/// Whether `input` starts with `scheme://`.
///
/// Only the leading segment counts: a schemeless link can still carry a full
/// URL in its path or query (`bit.ly/go?to=https://example.com`).
fn has_scheme(input: &str) -> bool {
    input.split_once("://").is_some_and(|(scheme, _)| {
        scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Validates and normalizes a user-supplied start URL.
///
/// Trims surrounding whitespace and adds an `https://` prefix when no scheme
/// is given, then checks that the result parses and uses http or https.
/// Logs a warning and returns `None` if the URL is unusable.
pub fn normalize_start_url(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let normalized = if has_scheme(input) {
        input.to_string()
    } else {
        format!("https://{input}")
    };

    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping URL exceeding maximum length ({} > {})",
            normalized.len(),
            MAX_URL_LENGTH
        );
        return None;
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            // The caller's spelling is kept; only the resolver normalizes
            "http" | "https" if parsed.host_str().is_some() => Some(normalized),
            "http" | "https" => {
                warn!("Skipping URL without host: {input}");
                None
            }
            _ => {
                warn!("Skipping unsupported scheme for URL: {input}");
                None
            }
        },
        Err(_) => {
            warn!("Skipping invalid URL: {input}");
            None
        }
    }
}
