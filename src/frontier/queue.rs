// src/frontier/queue.rs
// =============================================================================
// The Frontier: a thread-safe work queue with completion tracking.
//
// Three operations matter to workers:
// - submit():    non-blocking enqueue of a discovered Job
// - take():      async dequeue; suspends (no busy-wait) until work arrives
// - mark_done(): bookkeeping call, exactly once per successful take()
//
// and one to the coordinator:
// - await_drain(): suspends until no Job is pending AND none is in flight.
//
// The in-flight counter is what makes drain detection race-free: a worker
// that has taken a Job but not yet marked it done still counts as work, so
// children it submits in between can never let await_drain() return early.
//
// Waiting uses tokio::sync::Notify with the enable-before-check pattern:
// register as a waiter first, then check the condition under the lock, then
// await. A notification sent between the check and the await is not lost.
// =============================================================================

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use tokio::sync::Notify;

use crate::error::CrawlError;

use super::job::{Job, QueueOrder};

/// Backing store for pending Jobs. One enum, three dequeue behaviors.
#[derive(Debug)]
enum JobStore {
    Fifo(VecDeque<Job>),
    Lifo(Vec<Job>),
    // BinaryHeap is a max-heap; Reverse makes the smallest Job pop first.
    Priority(BinaryHeap<Reverse<Job>>),
}

impl JobStore {
    fn new(order: QueueOrder) -> Self {
        match order {
            QueueOrder::Fifo => Self::Fifo(VecDeque::new()),
            QueueOrder::Lifo => Self::Lifo(Vec::new()),
            QueueOrder::Priority => Self::Priority(BinaryHeap::new()),
        }
    }

    fn push(&mut self, job: Job) {
        match self {
            Self::Fifo(q) => q.push_back(job),
            Self::Lifo(s) => s.push(job),
            Self::Priority(h) => h.push(Reverse(job)),
        }
    }

    fn pop(&mut self) -> Option<Job> {
        match self {
            Self::Fifo(q) => q.pop_front(),
            Self::Lifo(s) => s.pop(),
            Self::Priority(h) => h.pop().map(|Reverse(job)| job),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Fifo(q) => q.len(),
            Self::Lifo(s) => s.len(),
            Self::Priority(h) => h.len(),
        }
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug)]
struct FrontierState {
    store: JobStore,
    /// Jobs taken but not yet marked done.
    in_flight: usize,
    /// Set at teardown; submit() becomes an error and take() returns None.
    closed: bool,
}

/// The shared priority work queue of a single crawl.
///
/// Created once per crawl, shared by reference across all workers and the
/// coordinator, and torn down (closed) when the coordinator finishes.
#[derive(Debug)]
pub struct Frontier {
    state: Mutex<FrontierState>,
    /// Woken on submit() and close(); take() waits on it.
    work: Notify,
    /// Woken when the drain condition becomes true.
    drained: Notify,
}

impl Frontier {
    pub fn new(order: QueueOrder) -> Self {
        Self {
            state: Mutex::new(FrontierState {
                store: JobStore::new(order),
                in_flight: 0,
                closed: false,
            }),
            work: Notify::new(),
            drained: Notify::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FrontierState> {
        // The lock is only held for short, non-panicking sections.
        self.state.lock().expect("frontier lock poisoned")
    }

    /// Enqueue a Job. Never blocks. Fails only on a closed frontier, which
    /// is a caller bug rather than a runtime condition.
    pub fn submit(&self, job: Job) -> Result<(), CrawlError> {
        {
            let mut state = self.lock();
            if state.closed {
                return Err(CrawlError::FrontierClosed(job.url));
            }
            state.store.push(job);
        }
        // Wake every parked take(); losers re-check and park again.
        self.work.notify_waiters();
        Ok(())
    }

    /// Dequeue the next Job, suspending while the queue is empty.
    ///
    /// Returns None once the frontier has been closed and emptied, so a
    /// worker waiting here during shutdown unparks instead of hanging.
    /// The in-flight increment happens under the same lock as the pop:
    /// there is no instant where a taken Job is invisible to drain tracking.
    pub async fn take(&self) -> Option<Job> {
        loop {
            let notified = self.work.notified();
            tokio::pin!(notified);
            // Register as a waiter BEFORE checking, so a submit() that lands
            // after the check below still wakes us.
            notified.as_mut().enable();
            {
                let mut state = self.lock();
                if let Some(job) = state.store.pop() {
                    state.in_flight += 1;
                    return Some(job);
                }
                if state.closed {
                    return None;
                }
            }
            notified.await;
        }
    }

    /// Record that processing for one taken Job has finished, including any
    /// child submissions. Must be called exactly once per successful take().
    pub fn mark_done(&self) {
        let now_drained = {
            let mut state = self.lock();
            debug_assert!(state.in_flight > 0, "mark_done without a matching take");
            state.in_flight = state.in_flight.saturating_sub(1);
            state.in_flight == 0 && state.store.is_empty()
        };
        if now_drained {
            self.drained.notify_waiters();
        }
    }

    /// A guard that calls mark_done() when dropped. Taking one right after
    /// take() guarantees the bookkeeping fires on every exit path of the
    /// processing code, the failure paths included.
    pub fn completion_guard(&self) -> CompletionGuard<'_> {
        CompletionGuard { frontier: self }
    }

    /// Suspend until no Job is pending and none is in flight.
    pub async fn await_drain(&self) {
        loop {
            let notified = self.drained.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            {
                let state = self.lock();
                if state.in_flight == 0 && state.store.is_empty() {
                    return;
                }
            }
            notified.await;
        }
    }

    /// Tear the frontier down: further submits fail and parked take() calls
    /// return None.
    pub fn close(&self) {
        self.lock().closed = true;
        self.work.notify_waiters();
    }

    /// Number of Jobs waiting to be taken.
    pub fn pending(&self) -> usize {
        self.lock().store.len()
    }

    /// Number of Jobs taken but not yet marked done.
    pub fn in_flight(&self) -> usize {
        self.lock().in_flight
    }
}

/// See [`Frontier::completion_guard`].
#[derive(Debug)]
pub struct CompletionGuard<'a> {
    frontier: &'a Frontier,
}

impl Drop for CompletionGuard<'_> {
    fn drop(&mut self) {
        self.frontier.mark_done();
    }
}
