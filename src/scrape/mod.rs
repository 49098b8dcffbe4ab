// src/scrape/mod.rs
// =============================================================================
// This module contains the scraping helpers the crawl engine calls into.
//
// Submodules:
// - html: Extracts image references and hyperlinks from HTML pages
// - urls: Normalizes raw links to absolute URLs and applies the
//         same-site filter
// - image: Downloads a single image to disk, streaming and idempotent
//
// These are the "external collaborators" of the engine: each one is a
// plain function over its inputs plus at most one network or filesystem
// effect, with no shared state of its own.
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

// Declare submodules (tells Rust to include these files)
pub mod html;
pub mod image;
pub mod urls;

// Re-export the items the session uses most
pub use html::{extract_page_refs, PageRefs};
pub use image::{download_image, DownloadOutcome};

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why keep these separate from src/crawl/?
//    - The engine cares about queues, claims and termination; these
//      modules care about HTML, URLs and files
//    - Either side can be tested without the other
//
// 2. pub mod vs mod?
//    - pub mod exposes the whole submodule path (scrape::urls::same_site)
//    - The extra pub use lines just shorten the common imports
// -----------------------------------------------------------------------------
