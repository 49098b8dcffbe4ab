// src/crawl/mod.rs
// =============================================================================
// This module is the concurrent crawl engine.
//
// Submodules:
// - config: All tunables (timeouts, queue capacity, worker count)
// - work: The work item type and the bounded work queue
// - dedup: Atomic claim sets guaranteeing exactly-once processing
// - session: The orchestrator that ties queue, registry and workers together
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod config;
mod dedup;
mod session;
mod work;

// Re-export public items from submodules
// This lets users write `crawl::CrawlSession` instead of
// `crawl::session::CrawlSession`
pub use config::CrawlConfig;
pub use dedup::DedupRegistry;
pub use session::{CrawlSession, CrawlSummary};
pub use work::{WorkItem, WorkQueue};

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is mod.rs?
//    - When you have a directory as a module (like src/crawl/), the
//      mod.rs file inside it is the module root
//    - It's like index.js in JavaScript or __init__.py in Python
//
// 2. Why use 'pub use'?
//    - It re-exports items from submodules
//    - Makes the API cleaner for users of this module
//    - They don't need to know about our internal organization
// -----------------------------------------------------------------------------
