// src/crawl/worker.rs
// =============================================================================
// The worker loop: Idle -> Processing -> Idle -> ... -> Cancelled.
//
// Each worker repeatedly takes a Job from the frontier, records the visit,
// expands the page if it is within the depth bound, and submits the child
// Jobs it discovers. Cancellation is cooperative and only observed between
// Jobs - a Job that has been taken is always processed to completion, and
// mark_done() fires on every exit path via the frontier's CompletionGuard.
// =============================================================================

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::frontier::{Frontier, Job};
use crate::ledger::VisitLedger;
use crate::page::{Fetcher, LinkExtractor};

/// Everything a worker shares with the rest of the crawl. Workers hold no
/// state of their own beyond the id used in log lines.
pub(crate) struct WorkerContext {
    pub frontier: Arc<Frontier>,
    pub ledger: Arc<VisitLedger>,
    pub fetcher: Arc<dyn Fetcher>,
    pub extractor: Arc<dyn LinkExtractor>,
    pub max_depth: u32,
    pub cancel: CancellationToken,
}

pub(crate) async fn run_worker(id: usize, ctx: WorkerContext) {
    debug!(worker = id, "worker started");
    loop {
        // Cancellation races only against the WAIT for a Job, never against
        // a Job that was actually handed out.
        let job = tokio::select! {
            _ = ctx.cancel.cancelled() => break,
            taken = ctx.frontier.take() => match taken {
                Some(job) => job,
                // Frontier closed and emptied.
                None => break,
            },
        };
        process_job(id, &ctx, job).await;
    }
    debug!(worker = id, "worker stopped");
}

async fn process_job(id: usize, ctx: &WorkerContext, job: Job) {
    // From here on, every return path marks the Job done.
    let _done = ctx.frontier.completion_guard();

    // Visit-attempt counter: increments whether or not the fetch works out.
    ctx.ledger.record_visit(&job.url);

    if job.depth > ctx.max_depth {
        debug!(worker = id, url = %job.url, depth = job.depth, "beyond max depth, not expanding");
        return;
    }

    debug!(worker = id, url = %job.url, depth = job.depth, "fetching");
    let Some(body) = ctx.fetcher.fetch(&job.url).await else {
        // The fetcher already logged why; the visit still counts.
        return;
    };

    for link in ctx.extractor.extract_links(&job.url, &body) {
        if let Err(e) = ctx.frontier.submit(Job::new(link, job.depth + 1)) {
            // Only reachable if something submits after teardown; surfaced
            // loudly because it means the lifecycle was violated.
            warn!(worker = id, error = %e, "link discarded");
        }
    }
}
