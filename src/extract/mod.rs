// src/extract/mod.rs
// =============================================================================
// This module turns page bodies into structured links.
//
// Submodules:
// - html: Walks an HTML document and collects <a> elements
//
// The crawler only needs `extract_links` and the `Link` type, so that is all
// we re-export here.
// =============================================================================

mod html;

pub use html::{extract_links, Link};
