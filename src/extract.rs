// src/extract.rs
// =============================================================================
// This module extracts anchors (<a> tags) from HTML bodies.
//
// Like the transport, anchor extraction sits behind a trait so the crawler
// can be tested without real HTML parsing. The production implementation
// uses the `scraper` crate, which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Rust concepts:
// - Traits: "parse bytes, yield anchors" as a swappable capability
// - Result<T, E>: Decoding can fail on non-UTF-8 bodies
// - Iterators: For walking the selected elements
// =============================================================================

use anyhow::{anyhow, Result};
use scraper::{Html, Selector};

// One hyperlink found in a page: its target and its visible text
//
// Example: <a href="mailto:info@acme.test">Contact us</a>
// becomes Anchor { href: "mailto:info@acme.test", text: "Contact us" }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// The href attribute value, exactly as written in the page
    pub href: String,
    /// The anchor's visible text content, whitespace-trimmed
    pub text: String,
}

// The parsing interface: raw body bytes in, anchors out
//
// Err means the body could not be decoded as text at all. A page that
// decodes fine but contains no anchors returns Ok with an empty Vec.
pub trait AnchorParser: Send + Sync {
    fn anchors(&self, body: &[u8]) -> Result<Vec<Anchor>>;
}

// Production parser backed by scraper
#[derive(Debug, Clone, Default)]
pub struct HtmlAnchorParser;

impl AnchorParser for HtmlAnchorParser {
    fn anchors(&self, body: &[u8]) -> Result<Vec<Anchor>> {
        // A body that isn't valid UTF-8 is the "decoding error" case:
        // the page is skipped upstream rather than aborting the whole run
        let html = std::str::from_utf8(body)
            .map_err(|e| anyhow!("body is not valid UTF-8 text: {}", e))?;

        let document = Html::parse_document(html);

        // Selector::parse returns Result, so we use .unwrap() which panics
        // on error. This is OK here because our selector is a constant and
        // known to be valid.
        let selector = Selector::parse("a[href]").unwrap();

        let mut anchors = Vec::new();

        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                // .text() yields every text node under the element;
                // collect them into one string like a browser would render
                let text: String = element.text().collect();

                anchors.push(Anchor {
                    href: href.to_string(),
                    text: text.trim().to_string(),
                });
            }
        }

        Ok(anchors)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is there no error for "malformed HTML"?
//    - html5ever follows the browser parsing spec: ANY byte soup parses
//      into SOME document (browsers never show a parse error either)
//    - So the only real failure mode left is a body that isn't text
//
// 2. What does element.text() do?
//    - Returns an iterator over all descendant text nodes
//    - <a>Contact <b>us</b></a> yields "Contact " and "us"
//    - .collect::<String>() concatenates them
//
// 3. Why trim the text?
//    - HTML authors indent: <a href="...">\n    info@acme.test\n  </a>
//    - The surrounding whitespace is presentation, not content
// -----------------------------------------------------------------------------
