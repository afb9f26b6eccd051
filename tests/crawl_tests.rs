// tests/crawl_tests.rs
// =============================================================================
// End-to-end crawl tests over a static, in-memory link graph.
//
// GraphFetcher plays the Fetcher: it serves each known URL a "body" that is
// just its outbound links, one per line, and records every fetch it sees.
// LineExtractor plays the LinkExtractor by splitting that body back into
// links. Unknown URLs behave like failed fetches (None), which exercises
// the visit-still-counts path.
// =============================================================================

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;

use crawl_tally::{crawl, CrawlConfig, CrawlError, Fetcher, LinkExtractor, QueueOrder};

struct GraphFetcher {
    graph: HashMap<String, Vec<String>>,
    fetched: Mutex<Vec<String>>,
}

impl GraphFetcher {
    fn new(edges: &[(&str, &[&str])]) -> Arc<Self> {
        let graph = edges
            .iter()
            .map(|(url, links)| {
                (
                    url.to_string(),
                    links.iter().map(|l| l.to_string()).collect(),
                )
            })
            .collect();
        Arc::new(Self {
            graph,
            fetched: Mutex::new(Vec::new()),
        })
    }

    fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for GraphFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        self.fetched.lock().unwrap().push(url.to_string());
        self.graph.get(url).map(|links| links.join("\n"))
    }
}

struct LineExtractor;

impl LinkExtractor for LineExtractor {
    fn extract_links(&self, _base_url: &str, body: &str) -> Vec<String> {
        body.lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn config(max_depth: u32, num_workers: usize, order: QueueOrder) -> CrawlConfig {
    CrawlConfig {
        max_depth,
        num_workers,
        order,
        shutdown_grace: Duration::from_secs(2),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn cyclic_graph_terminates_with_expected_tally() {
    // a -> {b, c}, b -> {d}, c -> {}, d -> {a}: the d -> a edge closes a
    // cycle, but d sits at depth 3 > max_depth and is never expanded.
    let fetcher = GraphFetcher::new(&[
        ("https://example.test/a", &["https://example.test/b", "https://example.test/c"][..]),
        ("https://example.test/b", &["https://example.test/d"][..]),
        ("https://example.test/c", &[][..]),
        ("https://example.test/d", &["https://example.test/a"][..]),
    ]);

    let tally = timeout(
        Duration::from_secs(5),
        crawl(
            "https://example.test/a",
            fetcher.clone(),
            Arc::new(LineExtractor),
            &config(2, 3, QueueOrder::Priority),
        ),
    )
    .await
    .expect("crawl must terminate despite the cycle")
    .unwrap();

    let mut counts: Vec<(String, u64)> =
        tally.into_iter().map(|row| (row.url, row.count)).collect();
    counts.sort();
    assert_eq!(
        counts,
        vec![
            ("https://example.test/a".to_string(), 1),
            ("https://example.test/b".to_string(), 1),
            ("https://example.test/c".to_string(), 1),
            ("https://example.test/d".to_string(), 1),
        ]
    );

    // d was visited but never fetched: it lies beyond the depth bound.
    let mut fetched = fetcher.fetched();
    fetched.sort();
    assert_eq!(
        fetched,
        vec![
            "https://example.test/a".to_string(),
            "https://example.test/b".to_string(),
            "https://example.test/c".to_string(),
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn no_lost_visits_under_concurrent_workers() {
    // One page linking to the same URL 100 times: every dequeue must land
    // in the tally even with several workers hammering the ledger.
    let repeats: Vec<&str> = std::iter::repeat("https://example.test/x").take(100).collect();
    let fetcher = GraphFetcher::new(&[("https://example.test/", &repeats[..])]);

    let tally = crawl(
        "https://example.test/",
        fetcher.clone(),
        Arc::new(LineExtractor),
        // max_depth 1: the root is expanded, the copies of x are not.
        &config(1, 4, QueueOrder::Fifo),
    )
    .await
    .unwrap();

    assert_eq!(tally.len(), 2);
    assert_eq!(tally[0].url, "https://example.test/x");
    assert_eq!(tally[0].count, 100);
    assert_eq!(tally[1].url, "https://example.test/");
    assert_eq!(tally[1].count, 1);

    // Only the root was within the expansion bound.
    assert_eq!(fetched_urls(&fetcher), vec!["https://example.test/".to_string()]);
}

fn fetched_urls(fetcher: &GraphFetcher) -> Vec<String> {
    let mut fetched = fetcher.fetched();
    fetched.sort();
    fetched.dedup();
    fetched
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn crawl_is_idempotent_over_a_static_graph() {
    let edges: &[(&str, &[&str])] = &[
        ("https://example.test/", &["https://example.test/one", "https://example.test/two"][..]),
        ("https://example.test/one", &["https://example.test/two"][..]),
        ("https://example.test/two", &[][..]),
    ];

    let first = crawl(
        "https://example.test/",
        GraphFetcher::new(edges),
        Arc::new(LineExtractor),
        &config(3, 3, QueueOrder::Priority),
    )
    .await
    .unwrap();

    let second = crawl(
        "https://example.test/",
        GraphFetcher::new(edges),
        Arc::new(LineExtractor),
        &config(3, 3, QueueOrder::Priority),
    )
    .await
    .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn single_worker_priority_crawl_is_deterministic() {
    // With one worker and the shortest-URL-first order, the visit order is
    // exactly the manual traversal: seed, then children by URL length.
    let fetcher = GraphFetcher::new(&[(
        "https://s.test/r",
        &[
            "https://s.test/llllll",
            "https://s.test/aa",
            "https://s.test/mmmm",
        ][..],
    )]);

    let tally = crawl(
        "https://s.test/r",
        fetcher.clone(),
        Arc::new(LineExtractor),
        &config(2, 1, QueueOrder::Priority),
    )
    .await
    .unwrap();

    assert_eq!(
        fetcher.fetched(),
        vec![
            "https://s.test/r".to_string(),
            "https://s.test/aa".to_string(),
            "https://s.test/mmmm".to_string(),
            "https://s.test/llllll".to_string(),
        ]
    );

    // All counts tie at 1, so the snapshot falls back to first-seen order,
    // which matches the visit order above.
    let urls: Vec<&str> = tally.iter().map(|row| row.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://s.test/r",
            "https://s.test/aa",
            "https://s.test/mmmm",
            "https://s.test/llllll",
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn idle_workers_shut_down_within_the_grace_period() {
    // A one-page crawl with a large pool: most workers never see a Job and
    // sit parked in take(). Shutdown must still complete promptly.
    let fetcher = GraphFetcher::new(&[("https://example.test/", &[][..])]);

    let result = timeout(
        Duration::from_secs(5),
        crawl(
            "https://example.test/",
            fetcher,
            Arc::new(LineExtractor),
            &config(2, 8, QueueOrder::Priority),
        ),
    )
    .await;

    assert!(result.is_ok(), "shutdown hung with parked workers");
    assert!(result.unwrap().is_ok());
}

#[tokio::test]
async fn invalid_seed_url_fails_before_any_fetch() {
    let fetcher = GraphFetcher::new(&[]);
    let err = crawl(
        "not a url",
        fetcher.clone(),
        Arc::new(LineExtractor),
        &CrawlConfig::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CrawlError::InvalidUrl { .. }));
    assert!(fetcher.fetched().is_empty());
}

#[tokio::test]
async fn empty_worker_pool_is_a_startup_error() {
    let err = crawl(
        "https://example.test/",
        GraphFetcher::new(&[]),
        Arc::new(LineExtractor),
        &config(2, 0, QueueOrder::Fifo),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CrawlError::NoWorkers));
}
