// src/frontier/mod.rs
// =============================================================================
// The frontier is the shared work queue of the crawl.
//
// Submodules:
// - job:   the Job value type (URL + depth) and the queue-order strategies
// - queue: the Frontier itself - a thread-safe work queue with blocking
//          dequeue and drain tracking
// =============================================================================

mod job;
mod queue;

pub use job::{Job, QueueOrder};
pub use queue::{CompletionGuard, Frontier};
