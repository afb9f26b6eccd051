// src/main.rs
// =============================================================================
// Entry point of the CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Build the HTTP fetcher and HTML extractor
// 3. Run the crawl and print the visit tally
// 4. Exit with proper code (0 = success, 2 = error)
//
// Diagnostics go to stderr via tracing (RUST_LOG controls verbosity); the
// tally itself goes to stdout.
// =============================================================================

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crawl_tally::cli::Cli;
use crawl_tally::{crawl, CrawlConfig, Fetcher, HtmlLinkExtractor, HttpFetcher, LinkExtractor};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let fetcher: Arc<dyn Fetcher> =
        Arc::new(HttpFetcher::new(Duration::from_secs(cli.timeout))?);
    let extractor: Arc<dyn LinkExtractor> = Arc::new(HtmlLinkExtractor);

    let config = CrawlConfig {
        max_depth: cli.max_depth,
        num_workers: cli.num_workers,
        order: cli.order.into(),
        ..CrawlConfig::default()
    };

    let tally = crawl(&cli.url, fetcher, extractor, &config).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&tally)?);
    } else {
        for row in &tally {
            println!("{:>3} {}", row.count, row.url);
        }
    }

    Ok(0)
}
