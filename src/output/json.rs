//! Machine-readable JSON report

use crate::output::{OutputError, OutputResult};
use crate::report::CrawlReport;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Formats a crawl report as pretty-printed JSON
///
/// The document mirrors the report model: `startUrl` and the ordered
/// `results`, each with `scanned_url` and its `foundItems`.
pub fn format_json_report(report: &CrawlReport) -> OutputResult<String> {
    serde_json::to_string_pretty(report).map_err(|e| OutputError::Format(e.to_string()))
}

/// Writes a crawl report as JSON to `output_path`
pub fn write_json_report(report: &CrawlReport, output_path: &Path) -> OutputResult<()> {
    let json = format_json_report(report)?;

    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;

    Ok(())
}
