// src/report.rs
// =============================================================================
// This module defines the per-page failure manifest.
//
// Printing a warning and moving on whenever a page can't be fetched or
// parsed makes it impossible to tell how complete a harvest actually was.
// So instead of printing-and-forgetting, every skipped page is recorded as
// a SkippedPage entry and the caller (and the --json output) can audit
// what was left out and why.
//
// Rust concepts:
// - Enums: To represent the different skip reasons
// - Derive macros: Serialize/Deserialize for JSON output
// =============================================================================

use serde::{Deserialize, Serialize};

// Why a page was left out of discovery or harvesting
//
// #[serde(tag = ..., content = ...)] gives us JSON like:
//   { "reason": "transport", "detail": "connection refused" }
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The HTTP request itself failed (network error, timeout, DNS failure)
    Transport(String),
    /// The response body could not be decoded/parsed as HTML text
    Parse(String),
    /// The response declared a binary content type we never try to parse
    BinaryContent(String),
}

// One page that was skipped, with the reason it was skipped
//
// #[serde(flatten)] merges the SkipReason fields into this struct,
// so the JSON stays flat: { "url": ..., "reason": ..., "detail": ... }
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedPage {
    /// The URL that was skipped
    pub url: String,
    /// Why it was skipped
    #[serde(flatten)]
    pub reason: SkipReason,
}

impl SkippedPage {
    /// Shorthand for a transport failure entry
    pub fn transport(url: impl Into<String>, detail: impl ToString) -> Self {
        Self {
            url: url.into(),
            reason: SkipReason::Transport(detail.to_string()),
        }
    }

    /// Shorthand for a parse/decode failure entry
    pub fn parse(url: impl Into<String>, detail: impl ToString) -> Self {
        Self {
            url: url.into(),
            reason: SkipReason::Parse(detail.to_string()),
        }
    }

    /// Shorthand for a binary-content skip entry
    pub fn binary(url: impl Into<String>, content_type: impl ToString) -> Self {
        Self {
            url: url.into(),
            reason: SkipReason::BinaryContent(content_type.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skipped_page_serializes_flat() {
        let skipped = SkippedPage::transport("https://example.com", "connection refused");
        let json = serde_json::to_value(&skipped).unwrap();

        assert_eq!(json["url"], "https://example.com");
        assert_eq!(json["reason"], "transport");
        assert_eq!(json["detail"], "connection refused");
    }

    #[test]
    fn test_binary_content_reason_carries_content_type() {
        let skipped = SkippedPage::binary("https://example.com/a.jpg", "image/jpeg");
        let json = serde_json::to_value(&skipped).unwrap();

        assert_eq!(json["reason"], "binary_content");
        assert_eq!(json["detail"], "image/jpeg");
    }
}
