// src/crawl/config.rs
// =============================================================================
// This module holds the crawl configuration.
//
// Instead of scattering magic numbers through the code, every tunable lives
// in one struct that gets passed into the crawl session at construction.
// The defaults are deliberately conservative: they bound memory (queue
// capacity), bound outbound load (worker count), and give slow servers a
// fair chance (request timeout) without hanging the crawl forever.
//
// Rust concepts:
// - Default trait: Provides a standard way to construct "the usual" value
// - Duration: Type-safe time spans (no raw integer seconds floating around)
// =============================================================================

use std::time::Duration;

// All tunables for one crawl run
//
// Construct with CrawlConfig::default() and override fields as needed:
//
//   let config = CrawlConfig {
//       workers: 16,
//       ..CrawlConfig::default()
//   };
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Timeout applied to every HTTP request (pages and images alike)
    pub request_timeout: Duration,

    /// How long the orchestrator waits on an empty queue before concluding
    /// that the crawl is finished. This is the termination signal, not a
    /// polling interval: once the queue has been idle this long and no
    /// worker is still running, there is no more work coming.
    pub idle_timeout: Duration,

    /// How long a producer may wait for a free queue slot before giving up.
    ///
    /// Zero means "drop on full": when the queue is at capacity, freshly
    /// discovered links and images are abandoned rather than blocking a
    /// worker or growing memory without bound. Losing a few long-tail URLs
    /// under burst load is the accepted trade-off.
    pub enqueue_wait: Duration,

    /// Maximum number of work items the queue may hold at once
    pub queue_capacity: usize,

    /// Fixed size of the worker pool (max fetches in flight)
    pub workers: usize,

    /// User-Agent header sent with every request
    ///
    /// Some sites serve empty pages to unknown clients, so we present a
    /// mainstream browser string.
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(20),
            enqueue_wait: Duration::ZERO,
            queue_capacity: 160,
            workers: 8,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_11_6) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/53.0.2785.143 Safari/537.36"
                .to_string(),
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a config struct instead of constants?
//    - Tests can run with tiny timeouts instead of waiting 20 real seconds
//    - Callers can tune the crawl without editing source
//    - The defaults document themselves in one place
//
// 2. What is Duration::ZERO?
//    - A zero-length time span
//    - Here it encodes the "don't wait at all" enqueue policy
//
// 3. What is ..CrawlConfig::default()?
//    - Struct update syntax: "fill the rest of the fields from this value"
//    - Handy for overriding just one or two tunables
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = CrawlConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.idle_timeout, Duration::from_secs(20));
        assert_eq!(config.enqueue_wait, Duration::ZERO);
        assert_eq!(config.queue_capacity, 160);
        assert_eq!(config.workers, 8);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }
}
