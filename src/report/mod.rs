//! Crawl report data model and aggregation
//!
//! The report is append-only: the crawl engine records one [`PageResult`] per
//! normalized URL in depth-first discovery order, and consumers read it after
//! the crawl completes.

mod types;

pub use types::{MatchRecord, PageResult};

use serde::Serialize;
use std::collections::HashSet;

/// Aggregated results of one crawl run
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    #[serde(rename = "startUrl")]
    start_url: String,

    results: Vec<PageResult>,

    #[serde(skip)]
    recorded: HashSet<String>,
}

impl CrawlReport {
    /// Creates an empty report for a crawl starting at `start_url`
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            results: Vec::new(),
            recorded: HashSet::new(),
        }
    }

    /// Appends a page result unless its URL has already been recorded
    ///
    /// Returns `true` if the result was appended.
    pub fn record(&mut self, result: PageResult) -> bool {
        if !self.recorded.insert(result.normalized_url.clone()) {
            tracing::debug!(
                "Result for {} already recorded, keeping the first",
                result.normalized_url
            );
            return false;
        }

        self.results.push(result);
        true
    }

    pub fn start_url(&self) -> &str {
        &self.start_url
    }

    /// Results in discovery order
    pub fn results(&self) -> &[PageResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of pages with at least one match
    pub fn pages_with_matches(&self) -> usize {
        self.results.iter().filter(|r| !r.is_clean()).count()
    }
}
