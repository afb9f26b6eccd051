// src/error.rs
// =============================================================================
// Typed errors for the library surface.
//
// Per-page problems (network errors, wrong content type, bad markup) are NOT
// errors at this level - the worker loop recovers from them locally and they
// only show up in the logs. These variants cover the cases that genuinely
// abort a crawl: bad input, misuse of a torn-down frontier, and a worker
// pool that refuses to shut down.
// =============================================================================

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// The seed URL did not parse; fatal before any network activity.
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A Job was submitted after the frontier was torn down. This is a
    /// programming error, never silently dropped.
    #[error("frontier is closed; rejected job for '{0}'")]
    FrontierClosed(String),

    /// The crawl was asked to run with an empty worker pool.
    #[error("at least one worker is required")]
    NoWorkers,

    /// A worker task panicked or was aborted out from under us.
    #[error("worker task failed: {0}")]
    WorkerFailed(String),

    /// Workers did not acknowledge cancellation within the grace period.
    /// Indicates a stuck task, so the whole process should go down.
    #[error("worker pool failed to stop within {0:?}")]
    StuckWorkers(Duration),
}
