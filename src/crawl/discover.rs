// src/crawl/discover.rs
// =============================================================================
// This module implements same-site page discovery with a breadth-first
// approach.
//
// How it works:
// 1. Start with the seed URL in the frontier
// 2. Fetch the whole frontier concurrently (one "wave")
// 3. Extract all anchor hrefs from each fetched page
// 4. Keep hrefs that start with http AND contain the domain filter
// 5. Add unseen keepers to the next frontier
// 6. Repeat until the frontier is empty (or a cap/deadline hits)
//
// The one invariant everything hangs on: a URL enters the visited set
// BEFORE it enters a fetch wave. The check-and-insert happens in this
// single scheduler loop (never inside the concurrent fetches), so each
// URL is fetched at most once no matter how many pages link to it.
//
// Rust concepts:
// - HashSet: To track visited URLs (O(1) lookup)
// - Streams + buffer_unordered: Bounded concurrent fetching
// - Instant: For the overall crawl deadline
// =============================================================================

use anyhow::{anyhow, Result};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::time::Instant;
use url::Url;

use crate::crawl::CrawlConfig;
use crate::extract::AnchorParser;
use crate::fetch::PageFetcher;
use crate::report::SkippedPage;

// The outcome of one discovery run
#[derive(Debug, Clone)]
pub struct DiscoveryReport {
    /// Every successfully fetched same-site URL, deduplicated
    pub pages: HashSet<String>,
    /// Pages that were attempted but skipped, with the reason why
    pub skipped: Vec<SkippedPage>,
}

// Discovers all pages of one website reachable from the seed URL
//
// Parameters:
//   fetcher: the HTTP transport (mockable in tests)
//   parser: the anchor extractor (mockable in tests)
//   seed: the URL to start from (must be a well-formed absolute URL)
//   filter: substring a href must contain to count as same-site
//   config: concurrency / page-count / deadline caps
//
// Returns: DiscoveryReport on success, or an error for invalid input only.
// Per-page failures never propagate - they land in the skipped manifest
// and the crawl keeps going, so one broken page can't sink the site.
pub async fn discover_site(
    fetcher: &impl PageFetcher,
    parser: &impl AnchorParser,
    seed: &str,
    filter: &str,
    config: &CrawlConfig,
) -> Result<DiscoveryReport> {
    // Validate the inputs up front - these are the only fatal errors
    Url::parse(seed).map_err(|e| anyhow!("Invalid seed URL '{}': {}", seed, e))?;

    if filter.trim().is_empty() {
        return Err(anyhow!("Domain filter must not be empty"));
    }

    // buffer_unordered(0) would never start a single fetch, leaving the
    // loop waiting forever on a non-empty frontier
    if config.concurrency == 0 {
        return Err(anyhow!("Concurrency must be at least 1"));
    }

    let started = Instant::now();

    // Every URL ever enqueued. Never shrinks, even on fetch failure:
    // that is what guarantees at-most-once fetching. Failed pages are
    // simply never copied into `pages`, so they can't masquerade as
    // discovered either.
    let mut visited: HashSet<String> = HashSet::new();
    visited.insert(seed.to_string());

    let mut frontier = vec![seed.to_string()];

    let mut pages: HashSet<String> = HashSet::new();
    let mut skipped: Vec<SkippedPage> = Vec::new();

    // Process wave after wave until there's nothing left to expand
    while !frontier.is_empty() {
        // Deadline check between waves keeps the crawl bounded in time
        if let Some(deadline) = config.deadline {
            if started.elapsed() >= deadline {
                eprintln!("  Warning: crawl deadline reached, stopping discovery");
                break;
            }
        }

        let wave = std::mem::take(&mut frontier);

        for url in &wave {
            println!("  Crawling: {}", url);
        }

        // Fetch the whole wave with at most `concurrency` requests in
        // flight. buffer_unordered returns results as they complete.
        let fetched: Vec<_> = stream::iter(wave)
            .map(|url| async move {
                let result = fetcher.fetch(&url).await;
                (url, result)
            })
            .buffer_unordered(config.concurrency)
            .collect()
            .await;

        for (url, result) in fetched {
            let page = match result {
                Ok(page) => page,
                Err(e) => {
                    // Transport failure: this page was never actually
                    // retrieved, so it must not appear in the results
                    eprintln!("  Warning: failed to fetch {}: {}", url, e);
                    skipped.push(SkippedPage::transport(url, e));
                    continue;
                }
            };

            // Any HTTP response counts as fetched - error pages still
            // carry HTML worth parsing, so non-2xx is tolerated here
            if page.status >= 400 {
                println!("  Note: {} returned HTTP {}", url, page.status);
            }
            pages.insert(url.clone());

            let anchors = match parser.anchors(&page.body) {
                Ok(anchors) => anchors,
                Err(e) => {
                    // Undecodable body: zero children from this page,
                    // but the rest of the site is still explored
                    eprintln!("  Warning: could not parse {}: {}", url, e);
                    skipped.push(SkippedPage::parse(url, e));
                    continue;
                }
            };

            for anchor in anchors {
                if !passes_filter(&anchor.href, filter) {
                    continue;
                }

                // Page cap: stop taking on new work once we've seen enough
                if visited.len() >= config.max_pages {
                    break;
                }

                // The atomic check-and-set: insert returns false if the
                // URL was already known, so each URL is enqueued once
                if visited.insert(anchor.href.clone()) {
                    frontier.push(anchor.href);
                }
            }
        }
    }

    Ok(DiscoveryReport { pages, skipped })
}

// Decides whether a discovered href belongs to the target site
//
// A href is followed only if it is an absolute http(s) link AND contains
// the filter as a substring. Substring matching, not a proper host
// comparison - URLs are opaque strings here, with no normalization of
// fragments or query strings.
fn passes_filter(href: &str, filter: &str) -> bool {
    href.starts_with("http") && href.contains(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::HtmlAnchorParser;
    use crate::fetch::FetchedPage;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // A canned-response fetcher that also counts how often each URL is
    // requested, so tests can verify the at-most-once guarantee.
    struct MockFetcher {
        pages: HashMap<String, String>,
        failing: HashSet<String>,
        counts: Mutex<HashMap<String, usize>>,
    }

    impl MockFetcher {
        fn new() -> Self {
            Self {
                pages: HashMap::new(),
                failing: HashSet::new(),
                counts: Mutex::new(HashMap::new()),
            }
        }

        fn page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }

        fn failing(mut self, url: &str) -> Self {
            self.failing.insert(url.to_string());
            self
        }

        fn fetch_count(&self, url: &str) -> usize {
            *self.counts.lock().unwrap().get(url).unwrap_or(&0)
        }
    }

    #[async_trait]
    impl PageFetcher for MockFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedPage> {
            *self
                .counts
                .lock()
                .unwrap()
                .entry(url.to_string())
                .or_insert(0) += 1;

            if self.failing.contains(url) {
                return Err(anyhow!("simulated connection failure"));
            }

            let html = self
                .pages
                .get(url)
                .ok_or_else(|| anyhow!("no such page: {}", url))?;

            Ok(FetchedPage {
                status: 200,
                content_type: "text/html".to_string(),
                body: html.as_bytes().to_vec(),
            })
        }
    }

    async fn discover(
        fetcher: &MockFetcher,
        seed: &str,
        filter: &str,
    ) -> DiscoveryReport {
        discover_site(fetcher, &HtmlAnchorParser, seed, filter, &CrawlConfig::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_acme_scenario() {
        // Home page links to /about (same site) and an off-site page;
        // /about carries only a mailto link
        let fetcher = MockFetcher::new()
            .page(
                "https://acme.test/",
                r#"<a href="https://acme.test/about">About</a>
                   <a href="https://other.test/">Elsewhere</a>"#,
            )
            .page(
                "https://acme.test/about",
                r#"<a href="mailto:info@acme.test">info@acme.test</a>"#,
            );

        let report = discover(&fetcher, "https://acme.test/", "acme.test").await;

        let expected: HashSet<String> = [
            "https://acme.test/".to_string(),
            "https://acme.test/about".to_string(),
        ]
        .into();
        assert_eq!(report.pages, expected);
        assert!(report.skipped.is_empty());
    }

    #[tokio::test]
    async fn test_each_url_fetched_at_most_once() {
        // Both /a and /b link to /shared - it must be fetched exactly once
        let fetcher = MockFetcher::new()
            .page(
                "https://acme.test/",
                r#"<a href="https://acme.test/a">a</a>
                   <a href="https://acme.test/b">b</a>"#,
            )
            .page("https://acme.test/a", r#"<a href="https://acme.test/shared">s</a>"#)
            .page("https://acme.test/b", r#"<a href="https://acme.test/shared">s</a>"#)
            .page("https://acme.test/shared", "no links here");

        let report = discover(&fetcher, "https://acme.test/", "acme.test").await;

        assert_eq!(report.pages.len(), 4);
        assert_eq!(fetcher.fetch_count("https://acme.test/shared"), 1);
        assert_eq!(fetcher.fetch_count("https://acme.test/"), 1);
    }

    #[tokio::test]
    async fn test_cycles_terminate() {
        // /a and /b link to each other (and back to the seed)
        let fetcher = MockFetcher::new()
            .page("https://acme.test/", r#"<a href="https://acme.test/a">a</a>"#)
            .page(
                "https://acme.test/a",
                r#"<a href="https://acme.test/b">b</a>
                   <a href="https://acme.test/">home</a>"#,
            )
            .page("https://acme.test/b", r#"<a href="https://acme.test/a">a</a>"#);

        let report = discover(&fetcher, "https://acme.test/", "acme.test").await;

        assert_eq!(report.pages.len(), 3);
        assert_eq!(fetcher.fetch_count("https://acme.test/a"), 1);
    }

    #[tokio::test]
    async fn test_off_domain_and_non_http_links_are_never_followed() {
        let fetcher = MockFetcher::new().page(
            "https://acme.test/",
            r#"<a href="https://other.test/page">off-site</a>
               <a href="ftp://acme.test/files">wrong scheme</a>
               <a href="/relative">relative</a>
               <a href="javascript:void(0)">js</a>"#,
        );

        let report = discover(&fetcher, "https://acme.test/", "acme.test").await;

        // Only the seed itself qualifies
        assert_eq!(report.pages.len(), 1);
        assert!(report.pages.contains("https://acme.test/"));
        assert_eq!(fetcher.fetch_count("https://other.test/page"), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_isolated() {
        // Linear chain: / -> /b -> /c, with /b failing at transport level.
        // /c is only reachable through /b, so the result is just the seed -
        // and the crawl must not error out.
        let fetcher = MockFetcher::new()
            .page("https://acme.test/", r#"<a href="https://acme.test/b">b</a>"#)
            .failing("https://acme.test/b")
            .page("https://acme.test/c", "unreachable");

        let report = discover(&fetcher, "https://acme.test/", "acme.test").await;

        assert_eq!(report.pages.len(), 1);
        assert!(report.pages.contains("https://acme.test/"));
        assert!(!report.pages.contains("https://acme.test/b"));

        // The failure is auditable in the manifest
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].url, "https://acme.test/b");
    }

    #[tokio::test]
    async fn test_undecodable_page_yields_no_children_but_counts_as_fetched() {
        let fetcher = MockFetcher::new().page(
            "https://acme.test/",
            r#"<a href="https://acme.test/garbled">g</a>"#,
        );

        // MockFetcher stores Strings, so the non-UTF-8 page needs its own
        // wrapper that serves raw bytes
        struct GarbledFetcher(MockFetcher);

        #[async_trait]
        impl PageFetcher for GarbledFetcher {
            async fn fetch(&self, url: &str) -> Result<FetchedPage> {
                if url == "https://acme.test/garbled" {
                    return Ok(FetchedPage {
                        status: 200,
                        content_type: "text/html".to_string(),
                        body: vec![0xff, 0xfe, 0xfd],
                    });
                }
                self.0.fetch(url).await
            }
        }

        let fetcher = GarbledFetcher(fetcher);
        let report = discover_site(
            &fetcher,
            &HtmlAnchorParser,
            "https://acme.test/",
            "acme.test",
            &CrawlConfig::default(),
        )
        .await
        .unwrap();

        // The garbled page was fetched, so it is part of the site...
        assert!(report.pages.contains("https://acme.test/garbled"));
        // ...but its failure to parse is on record
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].url, "https://acme.test/garbled");
    }

    #[tokio::test]
    async fn test_max_pages_caps_the_crawl() {
        // Seed links to 10 pages, but the cap allows only 3 URLs in total
        let mut hub = String::new();
        let mut fetcher = MockFetcher::new();
        for i in 0..10 {
            let url = format!("https://acme.test/p{}", i);
            hub.push_str(&format!(r#"<a href="{}">p</a>"#, url));
            fetcher = fetcher.page(&url, "leaf");
        }
        let fetcher = fetcher.page("https://acme.test/", &hub);

        let config = CrawlConfig {
            max_pages: 3,
            ..CrawlConfig::default()
        };
        let report = discover_site(
            &fetcher,
            &HtmlAnchorParser,
            "https://acme.test/",
            "acme.test",
            &config,
        )
        .await
        .unwrap();

        assert!(report.pages.len() <= 3);
    }

    #[tokio::test]
    async fn test_invalid_seed_is_a_fatal_error() {
        let fetcher = MockFetcher::new();
        let result = discover_site(
            &fetcher,
            &HtmlAnchorParser,
            "not a url",
            "acme.test",
            &CrawlConfig::default(),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_zero_concurrency_is_a_fatal_error() {
        // With zero fetches allowed in flight the crawl could never make
        // progress, so it must fail fast instead of waiting forever
        let fetcher = MockFetcher::new().page("https://acme.test/", "home");
        let config = CrawlConfig {
            concurrency: 0,
            ..CrawlConfig::default()
        };
        let result = discover_site(
            &fetcher,
            &HtmlAnchorParser,
            "https://acme.test/",
            "acme.test",
            &config,
        )
        .await;
        assert!(result.is_err());
        assert_eq!(fetcher.fetch_count("https://acme.test/"), 0);
    }

    #[tokio::test]
    async fn test_empty_filter_is_a_fatal_error() {
        let fetcher = MockFetcher::new();
        let result = discover_site(
            &fetcher,
            &HtmlAnchorParser,
            "https://acme.test/",
            "  ",
            &CrawlConfig::default(),
        )
        .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_filter_is_substring_based() {
        assert!(passes_filter("https://acme.test/about", "acme.test"));
        assert!(passes_filter("http://acme.test/", "acme.test"));
        assert!(!passes_filter("https://other.test/", "acme.test"));
        assert!(!passes_filter("ftp://acme.test/", "acme.test"));
        assert!(!passes_filter("/about", "acme.test"));
    }
}
