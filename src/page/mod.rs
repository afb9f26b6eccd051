// src/page/mod.rs
// =============================================================================
// Page-level collaborators: fetching a document and extracting its links.
//
// Both are traits so the crawl can run against mock implementations in
// tests. The production pair is HttpFetcher (reqwest) and HtmlLinkExtractor
// (scraper + url).
//
// Submodules:
// - http: the Fetcher trait and its reqwest implementation
// - html: the LinkExtractor trait and its scraper implementation
// =============================================================================

mod html;
mod http;

pub use html::{HtmlLinkExtractor, LinkExtractor};
pub use http::{Fetcher, HttpFetcher};
