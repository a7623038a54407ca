// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Level-by-level (breadth-first) crawling starting from a URL
// - Same-origin restriction (doesn't crawl external sites)
// - Configurable depth limit
// - Broken pages are skipped (or abort the crawl, if asked)
//
// Submodules:
// - origin: href -> absolute same-origin URL rules
// - fetch: GET one page and return its same-origin links
// - frontier: the depth-bounded crawl loop
// =============================================================================

mod fetch;
mod frontier;
mod origin;

#[cfg(test)]
mod testing;

pub use frontier::{CrawlConfig, Crawler, ErrorPolicy};
pub use origin::SlashPolicy;
