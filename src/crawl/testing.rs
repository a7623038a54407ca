// src/crawl/testing.rs
// =============================================================================
// An in-memory website for driving the crawler in tests.
//
// Pages are keyed by the exact URL string the crawler asks for. Every GET is
// recorded so tests can check how many requests a crawl made, and in what
// order. Unknown URLs answer like a 404.
// =============================================================================

use std::cell::RefCell;
use std::collections::HashMap;

use url::Url;

use super::fetch::{FetchedPage, Transport};
use crate::error::{CrawlError, Result};

#[derive(Default)]
pub struct MemorySite {
    pages: HashMap<String, FetchedPage>,
    requests: RefCell<Vec<String>>,
}

impl MemorySite {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page served from the URL it was requested with
    pub fn page(self, url: &str, html: &str) -> Self {
        self.redirect(url, url, html)
    }

    /// A page that is served from `final_url` when `url` is requested
    pub fn redirect(mut self, url: &str, final_url: &str, html: &str) -> Self {
        let final_url = Url::parse(final_url).expect("test URLs are valid");
        self.pages.insert(
            url.to_string(),
            FetchedPage {
                final_url,
                body: html.as_bytes().to_vec(),
            },
        );
        self
    }

    /// A page with an arbitrary (possibly non-HTML) body
    pub fn raw_page(mut self, url: &str, body: Vec<u8>) -> Self {
        let final_url = Url::parse(url).expect("test URLs are valid");
        self.pages.insert(url.to_string(), FetchedPage { final_url, body });
        self
    }

    /// Every URL requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Transport for MemorySite {
    async fn get(&self, url: &str) -> Result<FetchedPage> {
        self.requests.borrow_mut().push(url.to_string());

        self.pages.get(url).cloned().ok_or_else(|| CrawlError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

// Lets a test keep a handle on the site after handing it to the crawler
impl<T: Transport> Transport for &T {
    async fn get(&self, url: &str) -> Result<FetchedPage> {
        (**self).get(url).await
    }
}
