// src/scrape/html.rs
// =============================================================================
// This module extracts image references and hyperlinks from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Extraction is pure: raw attribute values in, raw attribute values out.
// Normalization and same-site filtering happen in scrape::urls, and the
// claim/enqueue policy lives with the session. Keeping this function free
// of I/O also matters for the worker tasks: the parsed DOM is created and
// dropped inside one synchronous call, so it is never held across an await
// point (scraper's Html is not Send).
//
// Rust concepts:
// - Iterators: For processing collections
// - Structs as return values: Bundling two lists into one result
// =============================================================================

use scraper::{Html, Selector};

// Everything a page references that we care about
//
// Both lists hold raw attribute values exactly as written in the markup;
// empty attributes are already filtered out.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PageRefs {
    /// Raw `src` values of every <img> tag
    pub image_sources: Vec<String>,
    /// Raw `href` values of every <a> tag
    pub hyperlinks: Vec<String>,
}

// Extracts all image sources and hyperlinks from HTML content
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//
// Returns: PageRefs with the raw attribute values found
//
// Example:
//   html = "<img src='/i.png'><a href='/docs'>Docs</a>"
//   result.image_sources = ["/i.png"]
//   result.hyperlinks = ["/docs"]
pub fn extract_page_refs(html: &str) -> PageRefs {
    let mut refs = PageRefs::default();

    // Parse the HTML into a document (one parse serves both selectors)
    let document = Html::parse_document(html);

    // Selector::parse returns Result, so we use .unwrap() which panics on
    // error. This is OK here because our selectors are constants and known
    // to be valid.
    let image_selector = Selector::parse("img[src]").unwrap();
    let link_selector = Selector::parse("a[href]").unwrap();

    for element in document.select(&image_selector) {
        if let Some(src) = element.value().attr("src") {
            if !src.is_empty() {
                refs.image_sources.push(src.to_string());
            }
        }
    }

    for element in document.select(&link_selector) {
        if let Some(href) = element.value().attr("href") {
            if !href.is_empty() {
                refs.hyperlinks.push(href.to_string());
            }
        }
    }

    refs
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is scraper and how does it work?
//    - scraper parses HTML into a tree structure (DOM)
//    - You can then query it using CSS selectors (like querySelector)
//    - "img[src]" means "all <img> tags that have a src attribute"
//
// 2. What does .value() do?
//    - element is an ElementRef (reference to an HTML element)
//    - .value() gets the underlying Element
//    - .attr("src") gets the value of the src attribute
//
// 3. Why return raw values instead of absolute URLs?
//    - Separation of concerns: this module knows HTML, urls.rs knows the
//      normalization rules, the session knows the dedup policy
//    - It also makes extraction trivially testable with string fixtures
// -----------------------------------------------------------------------------
