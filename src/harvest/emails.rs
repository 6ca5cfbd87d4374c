// src/harvest/emails.rs
// =============================================================================
// This module extracts email addresses from fetched pages.
//
// For each page URL:
// 1. Fetch it
// 2. Check the declared Content-Type - JPEG images and Word documents
//    (legacy .doc and modern .docx) are binary, so there's no text to mine
// 3. Parse the body as HTML and walk its anchors
// 4. For anchors whose href starts with "mailto:", take the visible text
// 5. Keep it if it's non-empty, not the literal "None", and contains '@'
//
// Failures on one page (transport error, undecodable bytes) are recorded
// in the skipped manifest and that page contributes zero emails - the
// remaining pages are still harvested.
//
// Rust concepts:
// - Option combinators: For the keep/reject decision per anchor
// - Pattern matching: Per-page success/failure without exceptions
// =============================================================================

use futures::stream::{self, StreamExt};
use std::collections::HashSet;

use crate::crawl::CrawlConfig;
use crate::extract::{Anchor, AnchorParser};
use crate::fetch::PageFetcher;
use crate::report::SkippedPage;

// Content types we never try to parse
//
// Matching is substring-based on the lowercased header, because servers
// append parameters like "; charset=utf-8"
const SKIPPED_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

// The outcome of harvesting one website's pages
#[derive(Debug, Clone)]
pub struct HarvestReport {
    /// Deduplicated email addresses advertised via mailto links
    pub emails: HashSet<String>,
    /// Pages that contributed nothing, with the reason why
    pub skipped: Vec<SkippedPage>,
}

// Harvests all mailto emails from the given set of page URLs
//
// Parameters:
//   fetcher: the HTTP transport (mockable in tests)
//   parser: the anchor extractor (mockable in tests)
//   pages: the page URLs to mine (typically a DiscoveryReport's pages)
//   config: reused for the concurrency cap
//
// This function cannot fail as a whole: every failure mode is per-page
// and degrades to "fewer emails", never to an abort.
pub async fn harvest_emails(
    fetcher: &impl PageFetcher,
    parser: &impl AnchorParser,
    pages: &HashSet<String>,
    config: &CrawlConfig,
) -> HarvestReport {
    // buffer_unordered(0) would never start a fetch and hang forever;
    // harvesting has no fatal path, so clamp instead of erroring
    let concurrency = config.concurrency.max(1);

    // Fetch all pages with bounded concurrency, results in completion order
    let fetched: Vec<_> = stream::iter(pages.iter().cloned())
        .map(|url| async move {
            let result = fetcher.fetch(&url).await;
            (url, result)
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;

    let mut emails: HashSet<String> = HashSet::new();
    let mut skipped: Vec<SkippedPage> = Vec::new();

    for (url, result) in fetched {
        let page = match result {
            Ok(page) => page,
            Err(e) => {
                // No retries: a failed page simply yields zero emails
                eprintln!("  Warning: failed to fetch {}: {}", url, e);
                skipped.push(SkippedPage::transport(url, e));
                continue;
            }
        };

        let content_type = page.content_type.to_ascii_lowercase();
        if let Some(binary) = SKIPPED_CONTENT_TYPES
            .iter()
            .find(|ct| content_type.contains(*ct))
        {
            println!("  Skipping binary content ({}): {}", binary, url);
            skipped.push(SkippedPage::binary(url, binary));
            continue;
        }

        match parser.anchors(&page.body) {
            Ok(anchors) => {
                emails.extend(anchors.iter().filter_map(mailto_email));
            }
            Err(e) => {
                eprintln!("  Warning: could not decode {}: {}", url, e);
                skipped.push(SkippedPage::parse(url, e));
            }
        }
    }

    HarvestReport { emails, skipped }
}

// Pulls a plausible email address out of one anchor, if there is one
//
// The address comes from the anchor's VISIBLE TEXT, not the href - in
// practice sites write the address out where people can read it:
//   <a href="mailto:info@acme.test">info@acme.test</a>
//
// Rejected:
//   - anchors whose href doesn't start with "mailto:"
//   - empty text and the literal placeholder "None"
//   - text without an '@' (no further syntactic validation on purpose)
fn mailto_email(anchor: &Anchor) -> Option<String> {
    if !anchor.href.starts_with("mailto:") {
        return None;
    }

    let text = anchor.text.as_str();
    if text.is_empty() || text == "None" || !text.contains('@') {
        return None;
    }

    Some(text.to_string())
}
