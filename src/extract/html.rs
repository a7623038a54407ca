// src/extract/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Is built on html5ever (Mozilla's HTML parser)
// - Recovers from broken markup the same way browsers do
//
// Unlike a CSS selector query, we walk the tree ourselves so that an <a>
// nested inside another <a> is never reported: once we hit an anchor we
// stop looking for more anchors below it.
//
// Rust concepts:
// - Explicit stacks instead of recursion (deep documents can't blow the stack)
// - Borrowing: tree nodes borrow from the parsed document
// =============================================================================

use scraper::node::Node;
use scraper::{ElementRef, Html};

use crate::error::{CrawlError, Result};

/// A hyperlink found in a document
///
/// `target` is the raw href exactly as written in the markup, it may be
/// relative, absolute, a fragment or empty. `text` is the visible content
/// with whitespace collapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub target: String,
    pub text: String,
}

// The only tag that produces a hyperlink for crawling purposes
const LINK_TAG: &str = "a";

// Extracts all links from an HTML body
//
// Parameters:
//   body: the raw bytes of the page
//
// Returns: Vec<Link> in document order (empty if the page has no links)
//
// Errors: CrawlError::Parse if the bytes are not text we can parse
//
// Example:
//   body = "<a href='/docs'>  Read   the docs </a>"
//   result = [Link { target: "/docs", text: "Read the docs" }]
pub fn extract_links(body: &[u8]) -> Result<Vec<Link>> {
    let html = std::str::from_utf8(body)
        .map_err(|e| CrawlError::Parse(format!("body is not valid UTF-8: {}", e)))?;

    let document = Html::parse_document(html);

    let mut links = Vec::new();

    // Depth-first, pre-order walk using an explicit stack
    // Children are pushed in reverse so the first child is visited first
    let mut stack = vec![document.tree.root()];

    while let Some(node) = stack.pop() {
        if let Node::Element(element) = node.value() {
            if element.name() == LINK_TAG {
                let text = ElementRef::wrap(node).map(flatten_text).unwrap_or_default();
                links.push(Link {
                    target: element.attr("href").unwrap_or("").to_string(),
                    text,
                });
                // Don't descend: nested anchors are not separate links
                continue;
            }
        }

        let children: Vec<_> = node.children().collect();
        stack.extend(children.into_iter().rev());
    }

    Ok(links)
}

// Collects the visible text below an element
//
// Text fragments are joined with a space and then every run of whitespace
// is squeezed down to a single space, so "  Go   Home \n" becomes "Go Home".
// Comments contribute nothing.
fn flatten_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why not Selector::parse("a[href]")?
//    - select() returns every match, including anchors nested in anchors
//    - It also skips <a> tags without href; we want those as empty targets
//      so the URL filter is the single place that decides what to drop
//
// 2. Why can't parsing fail on bad HTML?
//    - html5ever always produces a tree, just like a browser does
//    - The only thing we refuse is a body that isn't text at all
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn link(target: &str, text: &str) -> Link {
        Link {
            target: target.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_extract_single_link() {
        let html = br#"<a href="https://www.rust-lang.org">Rust</a>"#;
        let links = extract_links(html).unwrap();
        assert_eq!(links, vec![link("https://www.rust-lang.org", "Rust")]);
    }

    #[test]
    fn test_text_whitespace_is_collapsed() {
        let html = b"<html><body><a href=\"/\">  Go   Home \n</a></body></html>";
        let links = extract_links(html).unwrap();
        assert_eq!(links, vec![link("/", "Go Home")]);
    }

    #[test]
    fn test_text_from_nested_elements() {
        let html = br#"
            <a href="/dog-cat">
                dog cat <strong>and mouse</strong>
                <!-- commented text SHOULD NOT be included! -->
                <span>!</span>
            </a>
        "#;
        let links = extract_links(html).unwrap();
        assert_eq!(links, vec![link("/dog-cat", "dog cat and mouse !")]);
    }

    #[test]
    fn test_document_order() {
        let html = br#"
            <div><a href="/first">1</a></div>
            <p><span><a href="/second">2</a></span></p>
            <a href="/third">3</a>
        "#;
        let targets: Vec<String> = extract_links(html)
            .unwrap()
            .into_iter()
            .map(|l| l.target)
            .collect();
        assert_eq!(targets, vec!["/first", "/second", "/third"]);
    }

    #[test]
    fn test_missing_href_is_empty_target() {
        let html = br#"<a name="top">Top</a>"#;
        let links = extract_links(html).unwrap();
        assert_eq!(links, vec![link("", "Top")]);
    }

    #[test]
    fn test_only_anchor_tags() {
        let html = br#"
            <link href="/style.css" rel="stylesheet">
            <img src="/logo.png">
            <area href="/map">
            <a href="/real">Real</a>
        "#;
        let links = extract_links(html).unwrap();
        assert_eq!(links, vec![link("/real", "Real")]);
    }

    #[test]
    fn test_no_links_is_not_an_error() {
        let links = extract_links(b"<html><body><p>Nothing here</p></body></html>").unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let result = extract_links(&[0x3c, 0x61, 0xff, 0xfe, 0x3e]);
        assert!(matches!(result, Err(CrawlError::Parse(_))));
    }

    #[test]
    fn test_nested_anchor_reports_outer_only() {
        // html5ever keeps nested <a> inside foreign (SVG) content
        let html = br#"<svg><a href="/outer">o<a href="/inner">i</a></a></svg>"#;
        let links = extract_links(html).unwrap();
        assert_eq!(links, vec![link("/outer", "o i")]);
    }

    #[test]
    fn test_deep_document_does_not_overflow() {
        let depth = 2_000;
        let mut html = "<div>".repeat(depth);
        html.push_str(r#"<a href="/deep">deep</a>"#);
        html.push_str(&"</div>".repeat(depth));

        let links = extract_links(html.as_bytes()).unwrap();
        assert_eq!(links, vec![link("/deep", "deep")]);
    }
}
