// src/crawl/mod.rs
// =============================================================================
// The crawl coordinator.
//
// crawl() owns the whole lifecycle: it validates the seed URL, builds the
// frontier and the ledger, starts the worker pool, submits the seed Job,
// waits for the frontier to drain, shuts the pool down, and hands back the
// visit tally. Per-page failures never surface here - the errors crawl()
// can return are startup problems and a worker pool that will not stop.
// =============================================================================

mod worker;

use std::sync::Arc;
use std::time::Duration;

use futures::future;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::error::CrawlError;
use crate::frontier::{Frontier, Job, QueueOrder};
use crate::ledger::{VisitCount, VisitLedger};
use crate::page::{Fetcher, LinkExtractor};

use worker::{run_worker, WorkerContext};

/// Tunables for one crawl.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Jobs deeper than this are counted but not expanded. The seed is
    /// depth 1.
    pub max_depth: u32,
    /// Size of the worker pool.
    pub num_workers: usize,
    /// Dequeue order of the frontier.
    pub order: QueueOrder,
    /// How long shutdown waits for workers to acknowledge cancellation
    /// before declaring them stuck.
    pub shutdown_grace: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            num_workers: 3,
            order: QueueOrder::Priority,
            shutdown_grace: Duration::from_secs(5),
        }
    }
}

/// Crawl from `root_url` and return the visit tally, most-visited first.
///
/// The frontier and ledger live exactly as long as this call; nothing is
/// shared across crawls and nothing persists.
pub async fn crawl(
    root_url: &str,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn LinkExtractor>,
    config: &CrawlConfig,
) -> Result<Vec<VisitCount>, CrawlError> {
    // Startup errors are fatal before any network activity.
    Url::parse(root_url).map_err(|source| CrawlError::InvalidUrl {
        url: root_url.to_string(),
        source,
    })?;
    if config.num_workers == 0 {
        return Err(CrawlError::NoWorkers);
    }

    let frontier = Arc::new(Frontier::new(config.order));
    let ledger = Arc::new(VisitLedger::new());
    let cancel = CancellationToken::new();

    // The pool starts before the seed goes in; whichever worker wakes first
    // picks it up.
    let mut workers = Vec::with_capacity(config.num_workers);
    for id in 0..config.num_workers {
        let ctx = WorkerContext {
            frontier: Arc::clone(&frontier),
            ledger: Arc::clone(&ledger),
            fetcher: Arc::clone(&fetcher),
            extractor: Arc::clone(&extractor),
            max_depth: config.max_depth,
            cancel: cancel.clone(),
        };
        workers.push(tokio::spawn(run_worker(id, ctx)));
    }

    frontier.submit(Job::seed(root_url))?;
    frontier.await_drain().await;
    debug!("frontier drained, stopping workers");

    // Closing the frontier unparks workers waiting in take(); the token
    // covers workers that have not parked yet.
    frontier.close();
    cancel.cancel();

    let joined = tokio::time::timeout(config.shutdown_grace, future::join_all(workers)).await;
    match joined {
        Ok(results) => {
            for result in results {
                if let Err(e) = result {
                    return Err(CrawlError::WorkerFailed(e.to_string()));
                }
            }
        }
        // A worker that ignores cancellation is a stuck task; callers treat
        // this as fatal for the process.
        Err(_) => return Err(CrawlError::StuckWorkers(config.shutdown_grace)),
    }

    Ok(ledger.snapshot())
}
