// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Usage:
//   sitemapper --url https://example.com --depth 2 > sitemap.xml
// =============================================================================

use std::time::Duration;

use clap::Parser;

use crate::crawl::{CrawlConfig, ErrorPolicy, SlashPolicy};

#[derive(Parser, Debug)]
#[command(
    name = "sitemapper",
    version,
    about = "Crawl a website and print its pages as a sitemap",
    long_about = "sitemapper follows same-domain links from a starting URL, level by level, \
                  and prints every page it finds as a sitemap.xml document on stdout."
)]
pub struct Cli {
    /// The URL that you want to build a sitemap for
    #[arg(long, default_value = "http://gophercises.com")]
    pub url: String,

    /// Maximum depth of the link traversal
    ///
    /// Depth 0 = just the links on the starting page
    /// Depth 1 = ... + links on those pages
    /// etc.
    #[arg(long, default_value_t = 3)]
    pub depth: usize,

    /// Output the URL list as JSON instead of sitemap XML
    #[arg(long)]
    pub json: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Stop the whole crawl on the first page that fails to load
    #[arg(long)]
    pub fail_fast: bool,

    /// Treat "/page" and "/page/" as the same URL
    #[arg(long)]
    pub trim_trailing_slash: bool,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Turns the flags into crawl settings
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            timeout: Duration::from_secs(self.timeout),
            error_policy: if self.fail_fast {
                ErrorPolicy::Abort
            } else {
                ErrorPolicy::Skip
            },
            slash_policy: if self.trim_trailing_slash {
                SlashPolicy::Trim
            } else {
                SlashPolicy::Preserve
            },
        }
    }

    /// Log filter used when RUST_LOG isn't set
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
