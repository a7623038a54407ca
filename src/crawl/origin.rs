// src/crawl/origin.rs
// =============================================================================
// This module turns raw hrefs into absolute URLs on the crawl's origin.
//
// The rules are deliberately simple string rules:
// 1. "/about"            -> "http://example.com/about" (root-relative, trusted)
// 2. "http://..."        -> kept as written, then checked against the origin
// 3. anything else       -> dropped ("#top", "mailto:...", "page.html", "")
//
// After that, only URLs that start with "scheme://host" survive. Equality is
// plain string equality: "http://x/a" and "http://x/a/" are different pages
// unless the caller asks for trailing slashes to be trimmed.
// =============================================================================

use url::Url;

use crate::error::{CrawlError, Result};
use crate::extract::Link;

/// The (scheme, host) pair every crawled URL must live under
///
/// `host` keeps an explicit port when the URL has a non-default one, so
/// `http://localhost:8080` stays distinct from `http://localhost`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub scheme: String,
    pub host: String,
}

impl Origin {
    /// Builds the origin of a URL we actually fetched
    pub fn from_url(url: &Url) -> Result<Self> {
        let host = url.host_str().ok_or_else(|| CrawlError::InvalidUrl {
            url: url.to_string(),
            reason: "URL has no host".to_string(),
        })?;

        let host = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        Ok(Origin {
            scheme: url.scheme().to_string(),
            host,
        })
    }

    /// "scheme://host", the prefix every same-origin URL starts with
    pub fn prefix(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}

/// What to do with a trailing "/" on discovered URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlashPolicy {
    /// Keep URLs exactly as found ("/a" and "/a/" are two entries)
    #[default]
    Preserve,
    /// Drop trailing slashes so "/a" and "/a/" collapse into one entry
    Trim,
}

impl SlashPolicy {
    fn apply(self, url: String) -> String {
        match self {
            SlashPolicy::Preserve => url,
            SlashPolicy::Trim => url.trim_end_matches('/').to_string(),
        }
    }
}

// Converts extracted links into absolute URLs on `origin`
//
// Parameters:
//   links: links straight from the extractor
//   origin: the crawl's origin
//   policy: trailing slash handling
//
// Returns: Vec<String> in the same order as `links`, duplicates included
//
// Example (origin = http://example.com):
//   "/about"               -> "http://example.com/about"
//   "http://example.com/x" -> "http://example.com/x"
//   "https://other.com/x"  -> dropped
//   "#section"             -> dropped
pub fn to_absolute_origin_links(links: &[Link], origin: &Origin, policy: SlashPolicy) -> Vec<String> {
    let prefix = origin.prefix();

    links
        .iter()
        .filter_map(|link| absolute_url(&link.target, &prefix))
        .filter(|url| url.starts_with(&prefix))
        .map(|url| policy.apply(url))
        .collect()
}

// Makes a single href absolute, or drops it
fn absolute_url(target: &str, prefix: &str) -> Option<String> {
    if target.starts_with('/') {
        Some(format!("{}{}", prefix, target))
    } else if target.starts_with("http") {
        Some(target.to_string())
    } else {
        None
    }
}
