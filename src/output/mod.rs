//! Output module for crawl results
//!
//! This module handles:
//! - Grouping harvested records by category
//! - The response shape returned to the caller
//! - Crawl statistics
//! - Writing the response as JSON and a markdown summary

mod aggregate;
mod markdown;
mod response;
pub mod stats;

pub use aggregate::{AggregatedResult, CategoryGroup};
pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use response::{CrawlResponse, CrawlStatus};
pub use stats::CrawlStats;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Writes `response` as pretty-printed JSON to `output_path`
pub fn write_json(response: &CrawlResponse, output_path: &Path) -> OutputResult<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, response)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Writes `response` as pretty-printed JSON to any writer
pub fn print_json<W: Write>(response: &CrawlResponse, mut out: W) -> OutputResult<()> {
    serde_json::to_writer_pretty(&mut out, response)?;
    out.write_all(b"\n")?;
    Ok(())
}
