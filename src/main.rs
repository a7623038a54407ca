// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr only, stdout is reserved for the sitemap)
// 3. Crawl the site
// 4. Print the sitemap (XML, or JSON with --json)
// 5. Exit with proper code (0 = success, 2 = error)
// =============================================================================

mod cli;      // src/cli.rs - command-line parsing
mod crawl;    // src/crawl/ - fetching pages and walking the site
mod error;    // src/error.rs - crawl error types
mod extract;  // src/extract/ - finding links in HTML
mod sitemap;  // src/sitemap.rs - rendering the result

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use crawl::Crawler;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG wins over -v when both are given
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sitemapper={}", cli.log_level())));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.crawl_config();
    let crawler = Crawler::http(&config).context("failed to create HTTP client")?;

    let urls = crawler
        .crawl(&cli.url, cli.depth)
        .await
        .with_context(|| format!("crawl of {} failed", cli.url))?;

    let document = if cli.json {
        sitemap::render_json(&urls)?
    } else {
        sitemap::render(&urls)?
    };

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(document.as_bytes())
        .context("failed to write sitemap to stdout")?;
    stdout.flush()?;

    Ok(())
}
