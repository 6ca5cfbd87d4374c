// src/harvest/mod.rs
// =============================================================================
// This module mines contact email addresses from a set of discovered pages.
//
// Strategy:
// - Fetch every page (concurrently, with the same cap as discovery)
// - Skip binary content types that can't be parsed as HTML
// - Collect the visible text of every mailto: anchor
// - Keep values that look like an address (non-empty, not "None", has '@')
//
// Why mailto anchors instead of regex-scanning the page text?
// - A mailto link is a deliberate "contact us here" signal
// - Regex scraping picks up decorative junk (twitter handles, code samples)
// - Precision over exhaustiveness
//
// Rust concepts:
// - HashSet: Emails are deduplicated across the whole site
// - Async streams: Concurrent fetching with buffer_unordered
// =============================================================================

mod emails;

// Re-export the public harvesting API
pub use emails::{harvest_emails, HarvestReport};
