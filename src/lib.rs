// src/lib.rs
// =============================================================================
// Library root for crawl-tally.
//
// The crawler is split into small modules:
// - cli:      command-line parsing (clap)
// - frontier: the shared work queue of pending Jobs, with completion tracking
// - ledger:   concurrent URL -> visit-count tally
// - page:     Fetcher/LinkExtractor collaborators (reqwest + scraper)
// - crawl:    the worker loop and the coordinator that ties it all together
//
// The binary in src/main.rs is a thin shell over crawl(); integration tests
// drive the same entry point with mock collaborators.
// =============================================================================

pub mod cli;
pub mod crawl;
pub mod error;
pub mod frontier;
pub mod ledger;
pub mod page;

pub use crawl::{crawl, CrawlConfig};
pub use error::CrawlError;
pub use frontier::{Frontier, Job, QueueOrder};
pub use ledger::{VisitCount, VisitLedger};
pub use page::{Fetcher, HtmlLinkExtractor, HttpFetcher, LinkExtractor};
