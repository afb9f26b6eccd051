// src/ledger.rs
// =============================================================================
// The visit ledger: a concurrent tally of how many times each URL was pulled
// off the frontier. It counts visit ATTEMPTS - a page whose fetch later
// fails still shows up here.
// =============================================================================

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

/// One row of the final tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitCount {
    pub url: String,
    pub count: u64,
}

#[derive(Debug)]
struct Entry {
    count: u64,
    /// Position in discovery order, for deterministic tie-breaking.
    first_seen: u64,
}

#[derive(Debug, Default)]
struct LedgerState {
    visits: HashMap<String, Entry>,
    next_seq: u64,
}

/// Concurrent URL -> visit-count multiset, shared by all workers for the
/// lifetime of one crawl and read once after drain.
#[derive(Debug, Default)]
pub struct VisitLedger {
    state: Mutex<LedgerState>,
}

impl VisitLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().expect("ledger lock poisoned")
    }

    /// Increment the count for `url`, creating the entry at 1 if absent.
    /// Serialized through the lock, so concurrent workers never lose updates.
    pub fn record_visit(&self, url: &str) {
        let mut state = self.lock();
        if let Some(entry) = state.visits.get_mut(url) {
            entry.count += 1;
        } else {
            let first_seen = state.next_seq;
            state.next_seq += 1;
            state
                .visits
                .insert(url.to_string(), Entry { count: 1, first_seen });
        }
    }

    /// A consistent view of the tally, sorted by descending count with ties
    /// in first-seen order.
    pub fn snapshot(&self) -> Vec<VisitCount> {
        let state = self.lock();
        let mut rows: Vec<(&String, &Entry)> = state.visits.iter().collect();
        rows.sort_by(|(_, a), (_, b)| {
            b.count.cmp(&a.count).then(a.first_seen.cmp(&b.first_seen))
        });
        rows.into_iter()
            .map(|(url, entry)| VisitCount {
                url: url.clone(),
                count: entry.count,
            })
            .collect()
    }
}
