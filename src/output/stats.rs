//! Statistics gathered during a crawl run
//!
//! This module counts what the crawl engine did with every URL occurrence
//! and logs a summary at the end of the run.

use crate::state::PageOutcome;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished (None while running)
    pub finished_at: Option<DateTime<Utc>>,

    /// Count of URL occurrences by outcome
    pub outcomes: HashMap<PageOutcome, u64>,

    /// Total number of match records produced
    pub total_matches: u64,
}

impl CrawlStatistics {
    /// Starts a new statistics record stamped with the current time
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            outcomes: HashMap::new(),
            total_matches: 0,
        }
    }

    /// Records one handled URL occurrence
    pub fn record(&mut self, outcome: PageOutcome) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
    }

    /// Adds match records found on a scanned page
    pub fn add_matches(&mut self, count: usize) {
        self.total_matches += count as u64;
    }

    /// Marks the run as finished
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Number of occurrences with the given outcome
    pub fn count(&self, outcome: PageOutcome) -> u64 {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Pages rendered and scanned
    pub fn pages_scanned(&self) -> u64 {
        self.sum_where(PageOutcome::is_scanned)
    }

    /// URLs claimed in the visited set, whether or not they rendered
    pub fn urls_visited(&self) -> u64 {
        self.sum_where(PageOutcome::claims_url)
    }

    /// Occurrences that ended in an error
    pub fn errors(&self) -> u64 {
        self.sum_where(PageOutcome::is_error)
    }

    fn sum_where(&self, predicate: impl Fn(&PageOutcome) -> bool) -> u64 {
        self.outcomes
            .iter()
            .filter(|(outcome, _)| predicate(*outcome))
            .map(|(_, count)| count)
            .sum()
    }

    /// Run duration in seconds, if finished
    pub fn duration_seconds(&self) -> Option<f64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_milliseconds() as f64 / 1000.0)
    }
}

/// Logs statistics at info level
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn log_statistics(stats: &CrawlStatistics) {
    tracing::info!("=== Crawl Statistics ===");
    tracing::info!("  URLs visited: {}", stats.urls_visited());
    tracing::info!("  Pages scanned: {}", stats.pages_scanned());
    tracing::info!(
        "  With matches: {} / clean: {}",
        stats.count(PageOutcome::Matched),
        stats.count(PageOutcome::Clean)
    );
    tracing::info!("  Match records: {}", stats.total_matches);
    tracing::info!(
        "  Skipped by filter: {}",
        stats.count(PageOutcome::Skipped)
    );
    tracing::info!(
        "  Repeat visits avoided: {}",
        stats.count(PageOutcome::AlreadyVisited)
    );

    if stats.errors() > 0 {
        tracing::warn!(
            "  Errors: {} ({} render failures, {} invalid URLs)",
            stats.errors(),
            stats.count(PageOutcome::RenderFailed),
            stats.count(PageOutcome::InvalidUrl)
        );
    }

    if let Some(duration) = stats.duration_seconds() {
        let rate = if duration > 0.0 {
            stats.pages_scanned() as f64 / duration
        } else {
            0.0
        };
        tracing::info!("  Duration: {:.2}s ({:.2} pages/sec)", duration, rate);
    }
}
