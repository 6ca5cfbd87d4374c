// src/export.rs
// =============================================================================
// This module writes the collected leads to disk.
//
// Output:
// - <out_dir>/leads_<tag>_<YYYY_Mon_DD_HHMMSS>.json (pretty-printed array)
// - <out_dir>/leads_<tag>_<YYYY_Mon_DD_HHMMSS>.csv  (same records, same
//   column names, thanks to serde rename on the Lead struct)
//
// The timestamp in the file name keeps successive runs from clobbering
// each other - each scrape is its own pair of files.
//
// Rust concepts:
// - std::fs: Directory creation and file writing
// - The csv crate's serde integration: writer.serialize(&lead) emits a row
//   (and the header row automatically, from the field names)
// =============================================================================

use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::lead::Lead;

// Writes leads as both JSON and CSV, returning the two paths written
pub fn export_leads(leads: &[Lead], tag: &str, out_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Could not create output directory {}", out_dir.display()))?;

    let stamp = Local::now().format("%Y_%b_%d_%H%M%S");
    let stem = format!("leads_{}_{}", tag, stamp);

    // JSON first
    let json_path = out_dir.join(format!("{}.json", stem));
    let json_file = File::create(&json_path)
        .with_context(|| format!("Could not create {}", json_path.display()))?;
    serde_json::to_writer_pretty(json_file, leads)?;

    // Then the CSV twin
    let csv_path = out_dir.join(format!("{}.csv", stem));
    let mut writer = csv::Writer::from_path(&csv_path)
        .with_context(|| format!("Could not create {}", csv_path.display()))?;
    for lead in leads {
        writer.serialize(lead)?;
    }
    writer.flush()?;

    Ok((json_path, csv_path))
}
