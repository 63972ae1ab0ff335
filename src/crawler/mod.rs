//! Crawler module for page rendering and site traversal
//!
//! This module contains the core crawling logic, including:
//! - The page renderer boundary with its browser and HTTP implementations
//! - HTML parsing and link extraction
//! - The depth-first crawl-and-scan engine
//! - The end-to-end sweep used by the CLI

mod browser;
mod coordinator;
mod parser;
mod renderer;

pub use browser::BrowserRenderer;
pub use coordinator::{Coordinator, CrawlRun};
pub use parser::{parse_html, ParsedPage};
pub use renderer::{build_http_client, HttpRenderer, PageRenderer, RenderError, RenderedPage};

use crate::config::{Config, RendererConfig, RendererEngine};
use crate::output::{log_statistics, write_reports, CrawlStatistics};
use crate::report::CrawlReport;
use crate::scan::load_search_terms;
use crate::SweepError;
use chrono::Utc;
use std::path::{Path, PathBuf};
use url::Url;

/// Everything a completed sweep produced
#[derive(Debug)]
pub struct SweepSummary {
    pub report: CrawlReport,
    pub stats: CrawlStatistics,
    /// Report files written to disk
    pub artifacts: Vec<PathBuf>,
}

/// Runs a complete sweep of a site
///
/// This is the main entry point for a crawl. It will:
/// 1. Load the search terms once
/// 2. Launch the browser renderer, or fall back to plain HTTP
/// 3. Crawl the site depth-first from `seed`
/// 4. Write the report artifacts, even if the crawl aborted part way
/// 5. Log run statistics
///
/// # Returns
///
/// * `Ok(SweepSummary)` - Crawl completed and reports were written
/// * `Err(SweepError)` - Setup failed, the crawl aborted, or writing failed
pub async fn sweep(seed: &Url, config: &Config) -> Result<SweepSummary, SweepError> {
    let terms = load_search_terms(Path::new(&config.scan.terms_file))?;

    tracing::info!("Starting crawl at {}", seed);
    let (run, crawl_result) = match launch_browser(&config.renderer).await? {
        Some(browser) => {
            let coordinator = Coordinator::new(browser, terms, seed, config.crawl.clone());
            let outcome = coordinator.run(seed).await;
            coordinator.into_renderer().close().await;
            outcome
        }
        None => {
            let renderer = HttpRenderer::new(&config.renderer)?;
            let coordinator = Coordinator::new(renderer, terms, seed, config.crawl.clone());
            coordinator.run(seed).await
        }
    };

    let written = write_reports(&run.report, seed, &config.output, Utc::now());
    log_statistics(&run.stats);

    crawl_result?;
    let artifacts = written?;

    Ok(SweepSummary {
        report: run.report,
        stats: run.stats,
        artifacts,
    })
}

/// Starts the browser renderer the configuration asks for
///
/// # Returns
///
/// * `Ok(Some(BrowserRenderer))` - Browser launched
/// * `Ok(None)` - Plain HTTP rendering selected, or `auto` found no browser
/// * `Err(RenderError)` - `browser` was required but could not be launched
async fn launch_browser(config: &RendererConfig) -> Result<Option<BrowserRenderer>, RenderError> {
    match config.engine {
        RendererEngine::Http => Ok(None),
        RendererEngine::Browser => BrowserRenderer::launch(config).await.map(Some),
        RendererEngine::Auto => match BrowserRenderer::launch(config).await {
            Ok(browser) => Ok(Some(browser)),
            Err(e) => {
                tracing::warn!("{}; falling back to plain HTTP rendering", e);
                Ok(None)
            }
        },
    }
}
