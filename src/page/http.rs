// src/page/http.rs
// =============================================================================
// Fetching one page over HTTP.
//
// The contract is deliberately forgiving: fetch() returns the body only when
// the response succeeded AND claims to be an HTML document; every failure
// mode (network error, timeout, bad status, wrong content type) collapses to
// None after a log line. A single page must never bring a worker down.
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, warn};

/// Retrieves one document per call. Implemented over HTTP in production and
/// by in-memory mocks in tests.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Returns the document body for a successful HTML response, None for
    /// anything else.
    async fn fetch(&self, url: &str) -> Option<String>;
}

/// reqwest-backed fetcher with a per-request timeout. A timed-out request is
/// just another failed fetch.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("crawl-tally/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(%url, error = %e, "fetch failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "fetch returned non-success status");
            return None;
        }

        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("text/html"))
            .unwrap_or(false);
        if !is_html {
            debug!(%url, "skipping non-HTML document");
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(%url, error = %e, "failed to read response body");
                None
            }
        }
    }
}
