// src/crawl/mod.rs
// =============================================================================
// This module handles website discovery.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Substring domain filter so the crawl never drifts off-site
// - Visited-before-fetch bookkeeping (each URL fetched at most once)
// - Bounded concurrency, page-count and deadline cutoffs
//
// Why crawl?
// - A business's contact email is rarely on the home page
// - Discovering every same-site page first lets the harvester mine them all
//
// Rust concepts:
// - Async programming: For concurrent network requests
// - Collections: HashSet for tracking visited URLs, Vec for the frontier
// =============================================================================

mod discover;

// Re-export the public crawling API
pub use discover::{discover_site, DiscoveryReport};

use std::time::Duration;

// Knobs for one crawl (shared by discovery and harvesting)
//
// Without these, unbounded simultaneous requests could swamp the network
// on a wide site, and a site that generates endless distinct URLs would
// never terminate the crawl. These caps are the safety rails.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Stop enqueueing new pages once this many URLs have been seen
    pub max_pages: usize,
    /// How many fetches may be in flight at once
    pub concurrency: usize,
    /// Overall wall-clock budget for one crawl (None = no deadline)
    pub deadline: Option<Duration>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: 200,
            concurrency: 8,
            deadline: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_bounded() {
        let config = CrawlConfig::default();
        assert!(config.max_pages > 0);
        assert!(config.concurrency > 0);
    }
}
