// src/error.rs
// =============================================================================
// Error types for the crawl engine.
//
// Every failure the crawler can hit falls into one of these buckets:
// - Parse: a page body could not be read as an HTML document
// - Transport / Status: the GET request failed or returned a non-2xx status
// - InvalidUrl: a URL we were handed (or landed on) cannot be used
// - Serialization: the sitemap document could not be written
//
// The binary wraps these in anyhow for printing; the library code keeps
// them typed so the crawler can decide which ones to skip.
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CrawlError {
    /// True for failures that belong to a single page rather than the whole crawl
    pub fn is_page_failure(&self) -> bool {
        matches!(
            self,
            CrawlError::Parse(_) | CrawlError::Transport { .. } | CrawlError::Status { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CrawlError>;
