// src/crawl/dedup.rs
// =============================================================================
// This module is the single source of "exactly once" in the crawler.
//
// Two independent sets are tracked: pages we have committed to visiting and
// images we have committed to downloading. The only operation is an atomic
// claim: check membership and insert in one step, under one lock. Every
// producer must claim a URL *before* enqueuing it, and only the caller that
// got `true` may enqueue. Splitting this into contains() + insert() would
// open a check-then-act race where two workers both see "absent" and both
// enqueue the same URL.
//
// The sets only ever grow during a run. That is fine: the number of URLs is
// bounded by the size of the site, and the registry dies with the session.
//
// Rust concepts:
// - Mutex: Mutual exclusion around shared mutable state
// - HashSet::insert: Returns whether the value was newly inserted — the
//   atomic check-and-insert comes for free
// =============================================================================

use std::collections::HashSet;
use std::sync::Mutex;

// Tracks which URLs this run has already committed to processing
//
// Shared across all workers (behind an Arc in the session). The std Mutex
// is the right tool here: the critical section is a hash insert, nothing
// ever awaits while holding the lock.
#[derive(Debug, Default)]
pub struct DedupRegistry {
    visited_pages: Mutex<HashSet<String>>,
    downloaded_images: Mutex<HashSet<String>>,
}

impl DedupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claims a page URL for crawling
    ///
    /// Returns true iff this call was the first to claim the URL; the
    /// caller then owns enqueuing it. Every later claim returns false.
    pub fn claim_page(&self, url: &str) -> bool {
        self.visited_pages
            .lock()
            .expect("visited-pages lock poisoned")
            .insert(url.to_string())
    }

    /// Atomically claims an image URL for downloading
    pub fn claim_image(&self, url: &str) -> bool {
        self.downloaded_images
            .lock()
            .expect("downloaded-images lock poisoned")
            .insert(url.to_string())
    }

    /// How many distinct pages have been claimed so far
    ///
    /// Used only for progress output ("Count so far ~N")
    pub fn pages_claimed(&self) -> usize {
        self.visited_pages
            .lock()
            .expect("visited-pages lock poisoned")
            .len()
    }

    /// How many distinct images have been claimed so far
    pub fn images_claimed(&self) -> usize {
        self.downloaded_images
            .lock()
            .expect("downloaded-images lock poisoned")
            .len()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why expect() on lock()?
//    - lock() only fails if another thread panicked while holding the lock
//      (a "poisoned" mutex)
//    - At that point the crawl state is unreliable anyway, so panicking
//      with a clear message is the honest response
//
// 2. Why two separate sets instead of one?
//    - A URL can legitimately be both a page and an image (a page whose
//      content type turns out to be image/*)
//    - Claiming it as a page must not block claiming it as an image
//
// 3. Why &str in, String stored?
//    - Callers usually have a borrowed URL; the set needs to own its copy
//    - insert() returning bool is HashSet telling us "was this new?"
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_first_claim_wins_later_claims_lose() {
        let registry = DedupRegistry::new();
        assert!(registry.claim_page("http://example.com"));
        assert!(!registry.claim_page("http://example.com"));
        assert!(!registry.claim_page("http://example.com"));
    }

    #[test]
    fn test_page_and_image_sets_are_independent() {
        let registry = DedupRegistry::new();
        assert!(registry.claim_page("http://example.com/x"));
        // Same URL, other set: still claimable
        assert!(registry.claim_image("http://example.com/x"));
        assert!(!registry.claim_image("http://example.com/x"));
    }

    #[test]
    fn test_claim_counts() {
        let registry = DedupRegistry::new();
        registry.claim_page("http://example.com/a");
        registry.claim_page("http://example.com/b");
        registry.claim_page("http://example.com/a"); // duplicate, no effect
        registry.claim_image("http://example.com/i.png");
        assert_eq!(registry.pages_claimed(), 2);
        assert_eq!(registry.images_claimed(), 1);
    }

    #[test]
    fn test_concurrent_claims_yield_exactly_one_winner() {
        let registry = Arc::new(DedupRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.claim_page("http://example.com/contended"))
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().expect("claim thread panicked"))
            .filter(|&won| won)
            .count();

        // However the threads interleave, exactly one may win the claim
        assert_eq!(wins, 1);
        assert_eq!(registry.pages_claimed(), 1);
    }
}
