//! Link-preview metadata extraction.
//!
//! Builds a minimal preview (title, image, domain) of a destination page from
//! its Open Graph tags, falling back to the document title.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::MAX_RESPONSE_BODY_SIZE;
use crate::fetch::RequestHeaders;
use crate::utils::{parse_selector_unsafe, truncate_at_char_boundary};

// CSS selector strings
const OG_TITLE_SELECTOR_STR: &str = r#"meta[property="og:title"]"#;
const OG_IMAGE_SELECTOR_STR: &str = r#"meta[property="og:image"]"#;
const TITLE_SELECTOR_STR: &str = "title";

static OG_TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(OG_TITLE_SELECTOR_STR, "OG_TITLE_SELECTOR"));
static OG_IMAGE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(OG_IMAGE_SELECTOR_STR, "OG_IMAGE_SELECTOR"));
static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(TITLE_SELECTOR_STR, "TITLE_SELECTOR"));

/// Preview metadata for a destination page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenGraphPreview {
    /// `og:title` content, or the document `<title>` when that is missing or empty
    pub title: String,
    /// `og:image` content, verbatim (may be relative)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Hostname of the previewed URL
    pub domain: String,
}

/// Content attribute of the first element matching `selector`, if non-empty.
fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .filter(|content| !content.is_empty())
        .map(str::to_string)
}

/// Text of the first `<title>` element with whitespace runs collapsed.
fn document_title(document: &Html) -> String {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| {
            element
                .text()
                .collect::<String>()
                .split_ascii_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

/// Extracts preview metadata from an HTML body fetched from `url`.
///
/// Returns `None` only when `url` cannot be parsed; a page without any
/// metadata yields an empty title and no image.
pub fn parse_open_graph(html: &str, url: &str) -> Option<OpenGraphPreview> {
    let domain = Url::parse(url).ok()?.host_str().unwrap_or_default().to_string();
    let document = Html::parse_document(html);

    let title = meta_content(&document, &OG_TITLE_SELECTOR)
        .unwrap_or_else(|| document_title(&document));
    let image = meta_content(&document, &OG_IMAGE_SELECTOR);

    Some(OpenGraphPreview {
        title,
        image,
        domain,
    })
}

/// Fetches `url` and extracts its preview metadata.
///
/// Issues one ordinary (redirect-following) GET. The response status is not
/// checked: error pages carry titles too. Bodies over `MAX_RESPONSE_BODY_SIZE`
/// are truncated before parsing. Any network or parse failure yields `None`.
///
/// Call this once per trace, against the final hop URL only.
pub async fn fetch_preview(client: &reqwest::Client, url: &str) -> Option<OpenGraphPreview> {
    let resp = match RequestHeaders::apply_to_request_builder(client.get(url))
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(e) => {
            log::debug!("Preview request for {} failed: {}", url, e);
            return None;
        }
    };

    let body = match resp.text().await {
        Ok(body) => body,
        Err(e) => {
            log::debug!("Preview body for {} unreadable: {}", url, e);
            return None;
        }
    };

    if body.len() > MAX_RESPONSE_BODY_SIZE {
        log::debug!(
            "Preview body for {} is {} bytes, parsing the first {}",
            url,
            body.len(),
            MAX_RESPONSE_BODY_SIZE
        );
    }
    parse_open_graph(truncate_at_char_boundary(&body, MAX_RESPONSE_BODY_SIZE), url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_falls_back_to_document_title() {
        let html = r#"<html><head><title>t</title><meta property="og:image" content="img.png"/></head></html>"#;
        let preview = parse_open_graph(html, "https://a.com").unwrap();
        assert_eq!(
            preview,
            OpenGraphPreview {
                title: "t".to_string(),
                image: Some("img.png".to_string()),
                domain: "a.com".to_string(),
            }
        );
    }

    #[test]
    fn test_og_title_preferred() {
        let html = r#"<html><head>
            <title>Document</title>
            <meta property="og:title" content="Shared Title">
        </head><body></body></html>"#;
        let preview = parse_open_graph(html, "https://www.example.org/page?x=1").unwrap();
        assert_eq!(preview.title, "Shared Title");
        assert_eq!(preview.image, None);
        assert_eq!(preview.domain, "www.example.org");
    }

    #[test]
    fn test_empty_og_values_count_as_absent() {
        let html = r#"<head><title>Fallback</title>
            <meta property="og:title" content="">
            <meta property="og:image" content=""></head>"#;
        let preview = parse_open_graph(html, "https://a.com").unwrap();
        assert_eq!(preview.title, "Fallback");
        assert_eq!(preview.image, None);
    }

    #[test]
    fn test_first_matching_tag_wins() {
        let html = r#"<head>
            <meta property="og:image" content="first.png">
            <meta property="og:image" content="second.png"></head>"#;
        let preview = parse_open_graph(html, "https://a.com").unwrap();
        assert_eq!(preview.image.as_deref(), Some("first.png"));
    }

    #[test]
    fn test_document_title_whitespace_collapsed() {
        let html = "<title>\n   Hello \t  World \n</title>";
        let preview = parse_open_graph(html, "https://a.com").unwrap();
        assert_eq!(preview.title, "Hello World");
    }

    #[test]
    fn test_page_without_metadata() {
        let preview = parse_open_graph("<p>nothing here</p>", "http://10.0.0.1:8080/x").unwrap();
        assert_eq!(preview.title, "");
        assert_eq!(preview.image, None);
        assert_eq!(preview.domain, "10.0.0.1");
    }

    #[test]
    fn test_unparsable_url_yields_none() {
        assert_eq!(parse_open_graph("<title>t</title>", "not a url"), None);
    }

    #[test]
    fn test_name_attribute_is_not_property() {
        let html = r#"<head><title>t</title><meta name="og:title" content="wrong"></head>"#;
        let preview = parse_open_graph(html, "https://a.com").unwrap();
        assert_eq!(preview.title, "t");
    }

    #[tokio::test]
    async fn test_fetch_failure_yields_none() {
        let client = reqwest::Client::new();
        assert_eq!(fetch_preview(&client, "not a url").await, None);
    }
}
