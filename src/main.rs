// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Dispatch to the appropriate subcommand handler
// 3. Collect results and print them
// 4. Exit with proper code (0 = success, 1 = incomplete results, 2 = error)
//
// Rust concepts used:
// - async/await: Because we need to make many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod crawl;         // src/crawl/ - same-site page discovery
mod export;        // src/export.rs - CSV/JSON lead export
mod extract;       // src/extract.rs - anchor extraction from HTML
mod fetch;         // src/fetch.rs - the HTTP transport boundary
mod harvest;       // src/harvest/ - mailto email harvesting
mod lead;          // src/lead.rs - the exported lead record
mod places;        // src/places/ - Google Maps API glue
mod report;        // src/report.rs - skipped-page manifest

// Import items we need from our modules
use clap::Parser;  // Parser trait enables the parse() method
use cli::{Cli, Commands};

use crawl::CrawlConfig;
use extract::HtmlAnchorParser;
use fetch::HttpFetcher;
use lead::Lead;
use report::SkippedPage;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

// The #[tokio::main] attribute transforms our async main into a real main
// function. It creates a tokio runtime and runs our async code inside it.
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = complete success
//   Ok(1) = finished, but some pages/leads had to be skipped
//   Err = fatal error (invalid input, missing API key, I/O failure)
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    match cli.command {
        Commands::Site {
            website_url,
            json,
            filter,
            max_pages,
            concurrency,
            deadline_secs,
        } => {
            let config = crawl_config(max_pages, concurrency, deadline_secs);
            handle_site_scan(&website_url, filter.as_deref(), json, &config).await
        }
        Commands::Leads {
            address,
            keyword,
            radius,
            tag,
            out_dir,
            max_pages,
            concurrency,
            deadline_secs,
        } => {
            let config = crawl_config(max_pages, concurrency, deadline_secs);
            handle_leads(&address, &keyword, radius, &tag, &out_dir, &config).await
        }
    }
}

// Builds the crawl knobs from the CLI flags
fn crawl_config(max_pages: usize, concurrency: usize, deadline_secs: Option<u64>) -> CrawlConfig {
    CrawlConfig {
        max_pages,
        concurrency,
        deadline: deadline_secs.map(Duration::from_secs),
    }
}

// The machine-readable output of one site scan (what --json prints)
#[derive(Debug, Serialize)]
struct SiteScanReport {
    website: String,
    pages: Vec<String>,
    emails: Vec<String>,
    skipped: Vec<SkippedPage>,
}

// Handles the 'site' subcommand: crawl one website and harvest its emails
//
// The domain filter defaults to the website URL itself - the same choice
// the lead pipeline makes for each business website.
async fn handle_site_scan(
    website_url: &str,
    filter: Option<&str>,
    json: bool,
    config: &CrawlConfig,
) -> Result<i32> {
    println!("🔍 Scanning website: {}", website_url);

    let filter = filter.unwrap_or(website_url);

    let fetcher = HttpFetcher::new()?;
    let parser = HtmlAnchorParser;

    // Phase 1: discover every same-site page
    let discovery = crawl::discover_site(&fetcher, &parser, website_url, filter, config).await?;
    println!("📄 Discovered {} page(s)", discovery.pages.len());

    // Phase 2: mine the discovered pages for mailto emails
    let harvested = harvest::harvest_emails(&fetcher, &parser, &discovery.pages, config).await;
    println!("📧 Harvested {} unique email(s)", harvested.emails.len());

    // Merge both phases' manifests for one auditable skip list
    let mut skipped = discovery.skipped;
    skipped.extend(harvested.skipped);

    // Sorted output so runs are comparable
    let mut pages: Vec<String> = discovery.pages.into_iter().collect();
    pages.sort_unstable();
    let mut emails: Vec<String> = harvested.emails.into_iter().collect();
    emails.sort_unstable();

    let clean = skipped.is_empty();

    if json {
        let report = SiteScanReport {
            website: website_url.to_string(),
            pages,
            emails,
            skipped,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_site_summary(&pages, &emails, &skipped);
    }

    // Exit code 1 flags an incomplete harvest (some pages were skipped)
    if clean {
        Ok(0)
    } else {
        Ok(1)
    }
}

// Prints the human-readable site scan summary
fn print_site_summary(pages: &[String], emails: &[String], skipped: &[SkippedPage]) {
    println!("\n📋 Pages:");
    for page in pages {
        println!("   {}", page);
    }

    if emails.is_empty() {
        println!("\n⚠️  No contact emails found");
    } else {
        println!("\n📧 Emails:");
        for email in emails {
            println!("   ✅ {}", email);
        }
    }

    if !skipped.is_empty() {
        println!("\n⚠️  Skipped {} page(s):", skipped.len());
        for entry in skipped {
            println!("   ❌ {} ({:?})", entry.url, entry.reason);
        }
    }
}

// Handles the 'leads' subcommand: the full pipeline
//
// geocode -> nearby search -> details per business -> crawl its website for
// emails -> export everything as CSV + JSON.
//
// One broken lead (failed details call, dead website) never stops the batch:
// it's reported, the lead is exported with what we have, and we move on.
async fn handle_leads(
    address: &str,
    keyword: &str,
    radius: u32,
    tag: &str,
    out_dir: &Path,
    config: &CrawlConfig,
) -> Result<i32> {
    let api_key = places::load_api_key()?;

    // One client for all the Google API calls
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    println!("📍 Geocoding: {}", address);
    let location = places::geocode(&client, &api_key, address).await?;

    println!("🔍 Searching for '{}' within {}m", keyword, radius);
    let nearby = places::nearby_search(&client, &api_key, location, keyword, radius).await?;

    if nearby.is_empty() {
        println!("⚠️  No businesses found");
        return Ok(0);
    }
    println!("🏢 Found {} business(es)", nearby.len());

    let fetcher = HttpFetcher::new()?;
    let parser = HtmlAnchorParser;

    let mut leads: Vec<Lead> = Vec::new();
    let mut trouble = false;

    for (index, place) in nearby.iter().enumerate() {
        let label = place.name.as_deref().unwrap_or(&place.place_id);
        println!("\n🏢 Lead {}/{}: {}", index + 1, nearby.len(), label);

        // A failed details call loses this one lead, not the batch
        let details = match places::place_details(&client, &api_key, &place.place_id).await {
            Ok(details) => details,
            Err(e) => {
                eprintln!("   Warning: skipping lead, details lookup failed: {}", e);
                trouble = true;
                continue;
            }
        };

        // Fresh email set per website - nothing leaks between leads
        let mut emails: HashSet<String> = HashSet::new();

        if let Some(website) = details.website.as_deref() {
            // The website's own URL doubles as the domain filter, exactly
            // like the site subcommand
            match crawl::discover_site(&fetcher, &parser, website, website, config).await {
                Ok(discovery) => {
                    let harvested =
                        harvest::harvest_emails(&fetcher, &parser, &discovery.pages, config).await;
                    if !discovery.skipped.is_empty() || !harvested.skipped.is_empty() {
                        trouble = true;
                    }
                    emails = harvested.emails;
                    println!(
                        "   📧 {} email(s) from {} page(s)",
                        emails.len(),
                        discovery.pages.len()
                    );
                }
                Err(e) => {
                    // Invalid website URL in the listing - lead still exported
                    eprintln!("   Warning: could not crawl {}: {}", website, e);
                    trouble = true;
                }
            }
        } else {
            println!("   (no website listed)");
        }

        leads.push(Lead::from_details(&details, &emails, tag));
    }

    let (json_path, csv_path) = export::export_leads(&leads, tag, out_dir)?;

    println!("\n💾 Wrote {}", json_path.display());
    println!("💾 Wrote {}", csv_path.display());
    println!("📊 Lead scrape completed. Total number of leads: {}", leads.len());

    if trouble {
        Ok(1)
    } else {
        Ok(0)
    }
}
