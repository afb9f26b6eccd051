// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
// The surface is a single positional URL plus a handful of flags; there is
// no config file, no environment variables, and no persisted state.
// =============================================================================

use clap::{Parser, ValueEnum};

use crate::frontier::QueueOrder;

#[derive(Parser, Debug)]
#[command(
    name = "crawl-tally",
    version,
    about = "Crawl a site to a bounded depth and tally visits per URL",
    long_about = "crawl-tally walks outbound links from a seed URL with a pool of \
                  concurrent workers, stopping at a configurable depth, and prints \
                  how many times each URL was visited."
)]
pub struct Cli {
    /// URL to start crawling from
    pub url: String,

    /// Maximum traversal depth; the seed is depth 1, and pages beyond the
    /// limit are counted but not expanded
    #[arg(short = 'd', long, default_value_t = 2)]
    pub max_depth: u32,

    /// Number of concurrent worker tasks
    #[arg(short = 'w', long, default_value_t = 3)]
    pub num_workers: usize,

    /// Dequeue order for pending pages
    #[arg(short = 'q', long, value_enum, default_value_t = OrderKind::Priority)]
    pub order: OrderKind,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Print the tally as JSON instead of "<count> <url>" lines
    #[arg(long)]
    pub json: bool,
}

/// CLI-facing names for the frontier's queue orders.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    Fifo,
    Lifo,
    Priority,
}

impl From<OrderKind> for QueueOrder {
    fn from(kind: OrderKind) -> Self {
        match kind {
            OrderKind::Fifo => QueueOrder::Fifo,
            OrderKind::Lifo => QueueOrder::Lifo,
            OrderKind::Priority => QueueOrder::Priority,
        }
    }
}
