// src/crawl/frontier.rs
// =============================================================================
// This module implements the level-by-level (breadth-first) crawl.
//
// How it works:
// 1. Fetch the root page; the URL it is served from fixes the crawl origin
// 2. Its same-origin links become the visited set and the first frontier
// 3. For each further level, fetch every page in the frontier and collect
//    their links into a fresh scratch list
// 4. Merge the scratch list into the visited set; whatever was new becomes
//    the next frontier
// 5. Stop after `max_depth + 1` fetch rounds, or earlier if nothing new
//    turned up
//
// The visited set remembers first-seen order, so the same site always
// produces the same sitemap.
//
// Rust concepts:
// - HashSet: fast "have we seen this URL?" checks
// - Vec: keeps the order URLs were discovered in
// - Generics: Crawler<T> works with any Transport
// =============================================================================

use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, info, warn};
use url::Url;

use super::fetch::{HttpTransport, PageFetcher, Transport};
use super::origin::SlashPolicy;
use crate::error::{CrawlError, Result};

/// What to do when a single page fails to load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Log it and carry on; the page just contributes no links
    #[default]
    Skip,
    /// Stop the whole crawl with the error
    Abort,
}

/// Crawl settings, built from the command line
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Per-request timeout
    pub timeout: Duration,
    pub error_policy: ErrorPolicy,
    pub slash_policy: SlashPolicy,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        CrawlConfig {
            timeout: Duration::from_secs(10),
            error_policy: ErrorPolicy::default(),
            slash_policy: SlashPolicy::default(),
        }
    }
}

/// Every same-origin URL found so far, in the order it was first seen
#[derive(Debug, Default)]
pub struct VisitedSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    // Adds every URL not already present and returns just the new ones,
    // in the order they were added
    pub fn merge(&mut self, urls: Vec<String>) -> Vec<String> {
        let mut added = Vec::new();
        for url in urls {
            if self.seen.insert(url.clone()) {
                self.order.push(url.clone());
                added.push(url);
            }
        }
        added
    }

    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}

/// The crawl engine
pub struct Crawler<T> {
    fetcher: PageFetcher<T>,
    error_policy: ErrorPolicy,
}

impl Crawler<HttpTransport> {
    /// A crawler that talks to real web servers
    pub fn http(config: &CrawlConfig) -> std::result::Result<Self, reqwest::Error> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Crawler::new(transport, config))
    }
}

impl<T: Transport> Crawler<T> {
    pub fn new(transport: T, config: &CrawlConfig) -> Self {
        Crawler {
            fetcher: PageFetcher::new(transport, config.slash_policy),
            error_policy: config.error_policy,
        }
    }

    // Crawls a site starting from `root_url`
    //
    // Parameters:
    //   root_url: where to start
    //   max_depth: how many link hops beyond the root's own links to follow
    //
    // Returns: the visited set, in first-seen order
    //
    // Example:
    //   max_depth=0: only the root is fetched; its links are the result
    //   max_depth=1: ... + links found on those pages
    //   max_depth=2: ... + links found on the pages found at depth 1
    //
    // The root page must load: without it there is no origin to crawl.
    // Later pages follow the error policy.
    pub async fn crawl(&self, root_url: &str, max_depth: usize) -> Result<Vec<String>> {
        // Validate the starting URL before making any request
        Url::parse(root_url).map_err(|e| CrawlError::InvalidUrl {
            url: root_url.to_string(),
            reason: e.to_string(),
        })?;

        info!("Crawling {} (max depth {})", root_url, max_depth);

        // The root page fixes the origin for the whole crawl
        let root = self.fetcher.fetch_origin_links(root_url).await?;
        let origin = root.origin;
        info!("Crawl origin is {}", origin.prefix());

        // Track every URL found and every page already requested
        let mut visited = VisitedSet::new();
        let mut fetched = HashSet::from([root_url.to_string()]);
        let mut frontier = visited.merge(root.links);
        debug!("Level 0: {} new URL(s)", frontier.len());

        for level in 1..=max_depth {
            if frontier.is_empty() {
                debug!("Nothing new at level {}, stopping early", level - 1);
                break;
            }

            // Fresh buffer per level; links from earlier levels are already
            // in `visited`
            let mut scratch = Vec::new();

            for url in frontier {
                // Skip pages we've already requested (e.g. the root)
                if !fetched.insert(url.clone()) {
                    continue;
                }

                debug!("  Crawling [depth {}]: {}", level, url);

                match self.fetcher.fetch_links_within(&url, &origin).await {
                    Ok(links) => scratch.extend(links),
                    // A broken page just contributes no links
                    Err(e) if self.error_policy == ErrorPolicy::Skip && e.is_page_failure() => {
                        warn!("Skipping {}: {}", url, e);
                    }
                    Err(e) => return Err(e),
                }
            }

            // Only URLs we haven't seen before go on to the next level
            frontier = visited.merge(scratch);
            debug!(
                "Level {}: {} new URL(s), {} total",
                level,
                frontier.len(),
                visited.len()
            );
        }

        info!("Crawl complete. Found {} URL(s)", visited.len());

        Ok(visited.into_vec())
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why not re-fetch every page on every level?
//    - A page's links don't change between levels, so fetching it twice can
//      never add anything to the visited set
//    - Only the URLs that were new on the previous level get fetched
//
// 2. Why does the root always abort on failure?
//    - The origin comes from the URL the root was served from
//    - No root page, no origin, nothing to filter against
// -----------------------------------------------------------------------------
