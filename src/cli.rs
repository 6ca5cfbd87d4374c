// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "lead-harvester",
    version = "0.1.0",
    about = "A CLI tool that finds nearby businesses and harvests contact emails from their websites",
    long_about = "lead-harvester geocodes an address, searches for nearby businesses matching a keyword, \
                  crawls each business's website, and mines contact emails from mailto links, \
                  exporting everything as CSV and JSON lead records."
)]
pub struct Cli {
    // The #[command(subcommand)] attribute tells clap that this field
    // will hold one of the subcommands defined in the Commands enum
    #[command(subcommand)]
    pub command: Commands,
}

// This enum defines our subcommands (site, leads)
//
// Each variant represents a different subcommand the user can run
// The fields inside each variant become the arguments for that subcommand
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl one website and harvest its contact emails
    ///
    /// Example: lead-harvester site https://acme.test --max-pages 50
    Site {
        /// Website URL to crawl (e.g., https://acme.test)
        ///
        /// This is a positional argument (required, no flag needed)
        website_url: String,

        /// Output results in JSON format instead of plain text
        #[arg(long)]
        json: bool,

        /// Substring a link must contain to count as same-site
        ///
        /// Defaults to the website URL itself, which keeps the crawl on
        /// the seed site. Pass a shorter token (e.g., just the host) if
        /// the site links to itself with varying URL prefixes.
        #[arg(long)]
        filter: Option<String>,

        /// Stop discovering once this many URLs have been seen
        #[arg(long, default_value_t = 200)]
        max_pages: usize,

        /// How many page fetches may run at once (at least 1)
        #[arg(long, default_value_t = 8, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        concurrency: usize,

        /// Give up on the crawl after this many seconds
        #[arg(long)]
        deadline_secs: Option<u64>,
    },

    /// Run the full lead pipeline: geocode, find businesses, harvest, export
    ///
    /// Example: lead-harvester leads --address "123 Main St, Minneapolis" \
    ///          --keyword plumber --radius 5000 --tag plumbers
    Leads {
        /// Street address to search around
        #[arg(long)]
        address: String,

        /// Business keyword to search for (e.g., "plumber")
        #[arg(long)]
        keyword: String,

        /// Search radius in meters
        #[arg(long)]
        radius: u32,

        /// Tag(s) / pipeline(s) recorded on every exported lead
        ///
        /// Also becomes part of the export file names
        #[arg(long)]
        tag: String,

        /// Directory the CSV/JSON exports are written into
        #[arg(long, default_value = "leads")]
        out_dir: PathBuf,

        /// Per-website crawl cap on discovered URLs
        #[arg(long, default_value_t = 200)]
        max_pages: usize,

        /// How many page fetches may run at once (at least 1)
        #[arg(long, default_value_t = 8, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        concurrency: usize,

        /// Per-website crawl deadline in seconds
        #[arg(long)]
        deadline_secs: Option<u64>,
    },
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why flags instead of interactive prompts?
//    - Flags make runs repeatable and scriptable (cron, CI, shell history)
//    - Prompting on stdin would block any unattended use
//
// 2. What are derive macros?
//    - #[derive(...)] automatically generates code for common operations
//    - Parser: generates CLI parsing logic
//    - Debug: generates code to print the struct for debugging
//
// 3. Why Option<u64> for deadline_secs?
//    - No flag means no deadline; Option models "maybe not provided"
//    - clap leaves the field as None when the flag is absent
// -----------------------------------------------------------------------------
