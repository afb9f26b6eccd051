// src/page/html.rs
// =============================================================================
// Extracting outbound links from an HTML document.
//
// We use the `scraper` crate to parse the document and select anchor tags,
// and the `url` crate to resolve relative hrefs against the page URL the
// way a browser would. Only navigable http/https links survive; anchors,
// mailto:, tel:, javascript: and friends are dropped.
// =============================================================================

use scraper::{Html, Selector};
use tracing::warn;
use url::Url;

/// Produces the absolute outbound URLs of one document. Sync by design:
/// parsing happens between suspension points, so implementations never hold
/// a DOM across an await.
pub trait LinkExtractor: Send + Sync {
    fn extract_links(&self, base_url: &str, html: &str) -> Vec<String>;
}

/// scraper-backed extractor over `a[href]` elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_links(&self, base_url: &str, html: &str) -> Vec<String> {
        let base = match Url::parse(base_url) {
            Ok(url) => url,
            Err(e) => {
                // Without a valid base there is nothing to resolve against.
                warn!(%base_url, error = %e, "invalid base URL, no links extracted");
                return Vec::new();
            }
        };

        let document = Html::parse_document(html);
        // The selector is a constant and known to be valid.
        let selector = Selector::parse("a[href]").expect("valid selector");

        let mut links = Vec::new();
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(link) = resolve_link(&base, href) {
                    links.push(link);
                }
            }
        }
        links
    }
}

// Resolves a possibly-relative href to an absolute, navigable URL.
// Returns None for fragments and for non-http(s) schemes.
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    // A bare fragment points back at the page we are already on.
    if href.starts_with('#') {
        return None;
    }

    let resolved = base.join(href).ok()?;
    match resolved.scheme() {
        "http" | "https" => Some(resolved.to_string()),
        _ => None,
    }
}
