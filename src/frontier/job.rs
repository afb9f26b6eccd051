// src/frontier/job.rs
// =============================================================================
// A Job is one unit of crawl work: a URL plus how many link-hops it took to
// discover it. Jobs are immutable once created.
//
// The priority comparison is deliberately simple: shorter URL wins. That is
// the ordering the crawler has always used, and it is kept as one strategy
// among several rather than baked into the queue (see QueueOrder).
// =============================================================================

use std::cmp::Ordering;

/// A unit of crawl work. The seed is depth 1; every link found on a page at
/// depth N produces Jobs at depth N + 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub url: String,
    pub depth: u32,
}

impl Job {
    pub fn new(url: impl Into<String>, depth: u32) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }

    /// The root Job of a crawl, always at depth 1.
    pub fn seed(url: impl Into<String>) -> Self {
        Self::new(url, 1)
    }
}

// Priority: shortest URL first. Equal lengths fall back to the URL string
// itself so the order is total and a single-worker crawl is deterministic.
impl Ord for Job {
    fn cmp(&self, other: &Self) -> Ordering {
        self.url
            .len()
            .cmp(&other.url.len())
            .then_with(|| self.url.cmp(&other.url))
    }
}

impl PartialOrd for Job {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dequeue order for pending Jobs, selected once at frontier construction.
///
/// One queue, three behaviors - a variant choice instead of a class
/// hierarchy of queue types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueueOrder {
    /// First in, first out: breadth-first flavor.
    Fifo,
    /// Last in, first out: depth-first flavor.
    Lifo,
    /// Smallest Job first, per the Job comparison above.
    #[default]
    Priority,
}
