// src/crawl/work.rs
// =============================================================================
// This module defines the unit of crawl work and the bounded queue that
// carries it between producers (workers discovering links) and the single
// consumer (the orchestrator loop).
//
// Key design points:
// - WorkItem is a closed enum with exactly two variants. The dispatch site
//   matches on it exhaustively, so adding a third kind of work is a compile
//   error until every match is updated.
// - The queue is capacity-bounded. Enqueue takes a wait budget; with a zero
//   budget a full queue means the item is dropped (backpressure by
//   shedding). Dequeue takes an idle timeout; expiry is how the crawl
//   detects "no more work will ever arrive".
//
// Rust concepts:
// - Enums with fields: Tagged unions, matched with `match`
// - tokio::sync::mpsc: An async multi-producer, single-consumer channel
// - tokio::time::timeout: Wraps a future with a deadline
// =============================================================================

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::Mutex;

// One unit of dispatchable work
//
// Identity is (variant, url); items are immutable once created and are
// consumed by whichever worker ends up processing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkItem {
    /// A page to fetch and scan for images and same-domain sublinks
    CrawlPage { url: String },
    /// An image to download into the destination directory
    FetchImage { url: String },
}

impl WorkItem {
    /// The URL this item refers to, whichever variant it is
    pub fn url(&self) -> &str {
        match self {
            WorkItem::CrawlPage { url } => url,
            WorkItem::FetchImage { url } => url,
        }
    }
}

// A bounded, thread-safe queue of work items
//
// Many workers enqueue concurrently; only the orchestrator dequeues. The
// queue is backed by a bounded tokio mpsc channel: the sender half is
// cloned freely inside enqueue(), the receiver half lives behind a Mutex
// so the queue itself can be shared as one object (Arc<WorkQueue>).
pub struct WorkQueue {
    tx: mpsc::Sender<WorkItem>,
    rx: Mutex<mpsc::Receiver<WorkItem>>,
}

impl WorkQueue {
    /// Creates a queue that holds at most `capacity` items
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        Self {
            tx,
            rx: Mutex::new(rx),
        }
    }

    // Attempts to enqueue an item, waiting at most `wait` for a free slot
    //
    // Returns true if the item was accepted, false if it was dropped.
    // A zero `wait` never suspends: the item is either accepted immediately
    // or abandoned. Dropping is silent on purpose (see the config docs) —
    // under heavy fan-out we prefer losing a few long-tail URLs over
    // blocking a worker or growing memory without bound.
    pub async fn enqueue(&self, item: WorkItem, wait: Duration) -> bool {
        if wait.is_zero() {
            match self.tx.try_send(item) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) | Err(TrySendError::Closed(_)) => false,
            }
        } else {
            match tokio::time::timeout(wait, self.tx.send(item)).await {
                Ok(sent) => sent.is_ok(),
                Err(_elapsed) => false,
            }
        }
    }

    // Waits up to `idle_timeout` for the next item
    //
    // Returns None when nothing arrived in time. The orchestrator treats
    // that as the liveness signal that the crawl may be finished — it is
    // not an error.
    pub async fn dequeue(&self, idle_timeout: Duration) -> Option<WorkItem> {
        let mut rx = self.rx.lock().await;
        match tokio::time::timeout(idle_timeout, rx.recv()).await {
            Ok(item) => item,      // Some(work) or None if all senders dropped
            Err(_elapsed) => None, // idle timeout expired
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why mpsc and not a Vec behind a Mutex?
//    - The channel gives us blocking-with-wakeup for free: a consumer
//      suspended in recv() wakes the moment an item arrives
//    - Capacity enforcement is built in (try_send fails when full)
//
// 2. Why is the receiver behind a Mutex?
//    - mpsc receivers can't be cloned (single-consumer by design)
//    - Wrapping it lets the whole queue live in one Arc and keeps the
//      "one queue object" shape of the design
//    - Only the orchestrator calls dequeue, so the lock is uncontended
//
// 3. What does timeout() return?
//    - Ok(inner_result) if the future finished in time
//    - Err(Elapsed) if the deadline passed first
//    - We fold both failure shapes into "no item" / "not sent"
// -----------------------------------------------------------------------------
