//! Output module for persisting crawl reports
//!
//! This module handles:
//! - Writing the machine-readable JSON report
//! - Rendering the browsable HTML report
//! - Recording and logging crawl statistics

mod html;
mod json;
pub mod stats;

pub use html::{format_html_report, write_html_report};
pub use json::{format_json_report, write_json_report};
pub use stats::{log_statistics, CrawlStatistics};

use crate::config::OutputConfig;
use crate::report::CrawlReport;
use crate::url::report_file_stem;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Writes every enabled report artifact for a crawl
///
/// Files are named after the seed's hostname inside the configured output
/// directory, which is created if missing. Failures are logged before being
/// returned; the in-memory report is never modified.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Paths of the files written
/// * `Err(OutputError)` - The first artifact that failed to write
pub fn write_reports(
    report: &CrawlReport,
    seed: &Url,
    config: &OutputConfig,
    generated_at: DateTime<Utc>,
) -> OutputResult<Vec<PathBuf>> {
    let result = write_all(report, seed, config, generated_at);

    if let Err(e) = &result {
        tracing::error!("Failed to write crawl report: {}", e);
    }

    result
}

fn write_all(
    report: &CrawlReport,
    seed: &Url,
    config: &OutputConfig,
    generated_at: DateTime<Utc>,
) -> OutputResult<Vec<PathBuf>> {
    let stem = report_file_stem(seed).map_err(|e| OutputError::Write(e.to_string()))?;
    let directory = Path::new(&config.directory);
    std::fs::create_dir_all(directory)?;

    let mut written = Vec::new();

    if config.json {
        let path = directory.join(format!("{}.json", stem));
        write_json_report(report, &path)?;
        tracing::info!("Crawl results saved to {}", path.display());
        written.push(path);
    }

    if config.html {
        let path = directory.join(format!("{}.html", stem));
        write_html_report(report, &path, generated_at)?;
        tracing::info!("Crawl results saved to {}", path.display());
        written.push(path);
    }

    Ok(written)
}
