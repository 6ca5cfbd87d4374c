// src/fetch.rs
// =============================================================================
// This module is the HTTP transport boundary.
//
// Everything that touches the network goes through the PageFetcher trait.
// Why a trait instead of calling reqwest directly?
// - The crawler and harvester can be tested with canned responses
// - Tests can count how often each URL is fetched (the at-most-once guarantee)
// - Simulated failures don't need a real broken server
//
// The production implementation (HttpFetcher) wraps a single reqwest::Client
// which is reused for every request (connection pooling).
//
// Rust concepts:
// - Traits: Swappable behavior behind a common interface
// - async-trait: Async methods in traits need this crate (for now)
// - Send + Sync bounds: So fetchers can be shared across concurrent tasks
// =============================================================================

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

// A fetched HTTP resource: status, declared content type, and raw body bytes
//
// The body stays as bytes on purpose - some responses (images, Word docs)
// are not valid text, and deciding what to do with them is the caller's job.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP status code (e.g., 200, 404)
    pub status: u16,
    /// The Content-Type header value, or empty string if absent
    pub content_type: String,
    /// Raw response body bytes
    pub body: Vec<u8>,
}

// The transport interface: fetch a URL, get back the page or a transport error
//
// Note: a non-2xx response is NOT an error here. The crawler tolerates
// error pages (they still get parsed for links); only transport failures
// (timeout, DNS, connection refused) return Err.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

// Production fetcher backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Creates a fetcher with sensible defaults
    //
    // 10 second timeout per request, up to 5 redirects followed.
    // The same settings the link checking used - long enough for slow
    // small-business sites, short enough not to hang the whole crawl.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let response = self.client.get(url).send().await?;

        let status = response.status().as_u16();

        // Grab the declared content type before consuming the response
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        // .bytes() consumes the response and downloads the full body
        let body = response.bytes().await?.to_vec();

        Ok(FetchedPage {
            status,
            content_type,
            body,
        })
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why async-trait?
//    - Rust traits can't (yet, on this edition) have async methods directly
//    - The #[async_trait] macro rewrites them into methods returning
//      Box<dyn Future>, which works everywhere
//
// 2. Why is non-2xx not an error?
//    - An error page is still a page: it has HTML, and that HTML has links
//    - Transport failures are different: there is literally nothing to parse
//
// 3. Why return Vec<u8> instead of String?
//    - response.text() would lossily re-encode binary bodies
//    - Content-type checking happens downstream; the transport stays dumb
// -----------------------------------------------------------------------------
