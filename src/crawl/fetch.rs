// src/crawl/fetch.rs
// =============================================================================
// This module fetches one page and returns the same-origin links on it.
//
// How it works:
// 1. GET the page (following redirects)
// 2. Work out the origin from the URL we actually ended up on
// 3. Extract the <a> links from the body
// 4. Make them absolute and keep only the ones on the origin
//
// The HTTP part sits behind the `Transport` trait so the crawler can be
// driven by an in-memory site in tests, and by reqwest for real.
//
// Rust concepts:
// - Traits with async fn: a seam between "how to GET" and "what to do with it"
// - Generics: PageFetcher<T> works with any Transport
// =============================================================================

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, trace, warn};
use url::Url;

use super::origin::{to_absolute_origin_links, Origin, SlashPolicy};
use crate::error::{CrawlError, Result};
use crate::extract::extract_links;

// Redirect hops followed before giving up on a page
const MAX_REDIRECTS: usize = 10;

/// A page body together with the URL it was served from
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Where we ended up after redirects
    pub final_url: Url,
    pub body: Vec<u8>,
}

/// Something that can GET a URL
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get(&self, url: &str) -> Result<FetchedPage>;
}

/// The real transport: reqwest with a per-request timeout
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    // Creates the HTTP client once; it is reused for every page
    // (connection pooling)
    pub fn new(timeout: Duration) -> std::result::Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<FetchedPage> {
        let transport_error = |source| CrawlError::Transport {
            url: url.to_string(),
            source,
        };

        // Send the GET; reqwest follows redirects for us
        let response = self.client.get(url).send().await.map_err(transport_error)?;

        // Anything outside 2xx counts as a failed page
        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // The URL we landed on after redirects, not the one we asked for
        let final_url = response.url().clone();
        if final_url.as_str() != url {
            debug!("{} was served from {}", url, final_url);
        }

        // bytes() consumes the response, so the connection is released here
        // whether or not the body turns out to be parseable
        let body = response.bytes().await.map_err(transport_error)?;

        Ok(FetchedPage {
            final_url,
            body: body.to_vec(),
        })
    }
}

/// Links found on one page, plus the origin they were filtered against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginLinks {
    pub origin: Origin,
    pub links: Vec<String>,
}

/// Fetch + extract + normalize for a single page
pub struct PageFetcher<T> {
    transport: T,
    slash_policy: SlashPolicy,
}

impl<T: Transport> PageFetcher<T> {
    pub fn new(transport: T, slash_policy: SlashPolicy) -> Self {
        PageFetcher {
            transport,
            slash_policy,
        }
    }

    /// Fetches a page and filters its links against the origin of the URL it
    /// was served from (so a redirect to another host moves the origin)
    pub async fn fetch_origin_links(&self, page_url: &str) -> Result<OriginLinks> {
        let page = self.transport.get(page_url).await?;

        // Origin of the page we actually got
        let origin = Origin::from_url(&page.final_url)?;
        let links = self.links_within(page_url, &page.body, &origin);

        Ok(OriginLinks { origin, links })
    }

    /// Fetches a page and filters its links against an origin fixed by the caller
    pub async fn fetch_links_within(&self, page_url: &str, origin: &Origin) -> Result<Vec<String>> {
        let page = self.transport.get(page_url).await?;
        Ok(self.links_within(page_url, &page.body, origin))
    }

    // A body we can't parse simply has no links
    fn links_within(&self, page_url: &str, body: &[u8], origin: &Origin) -> Vec<String> {
        match extract_links(body) {
            Ok(links) => {
                for link in &links {
                    trace!("{}: <a href={:?}> {:?}", page_url, link.target, link.text);
                }
                let urls = to_absolute_origin_links(&links, origin, self.slash_policy);
                debug!(
                    "{}: {} link(s), {} on {}",
                    page_url,
                    links.len(),
                    urls.len(),
                    origin.prefix()
                );
                urls
            }
            Err(e) => {
                warn!("Ignoring links on {}: {}", page_url, e);
                Vec::new()
            }
        }
    }
}
