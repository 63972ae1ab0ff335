//! Crawler coordinator - the crawl-and-scan engine
//!
//! This module walks a site depth-first from a seed URL:
//! - Normalizing and skip-filtering every discovered URL
//! - Claiming URLs in the visited set before doing any work on them
//! - Rendering each page and scanning it against every search term
//! - Recording one result per normalized URL and following same-origin links

use crate::config::CrawlConfig;
use crate::crawler::renderer::PageRenderer;
use crate::output::CrawlStatistics;
use crate::report::{CrawlReport, PageResult};
use crate::scan::{scan_page, SearchTerm};
use crate::state::{PageOutcome, VisitedSet};
use crate::url::{normalize_url, same_origin_links, should_skip_url};
use crate::SweepError;
use url::{Origin, Url};

/// Mutable state owned by a single crawl run
///
/// Created once per run and passed by reference through the traversal, so
/// several independent runs can share one process.
#[derive(Debug)]
pub struct CrawlRun {
    pub visited: VisitedSet,
    pub report: CrawlReport,
    pub stats: CrawlStatistics,
}

impl CrawlRun {
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            visited: VisitedSet::new(),
            report: CrawlReport::new(start_url),
            stats: CrawlStatistics::start(),
        }
    }
}

/// Main crawl engine
pub struct Coordinator<R: PageRenderer> {
    renderer: R,
    terms: Vec<SearchTerm>,
    base_origin: Origin,
    config: CrawlConfig,
}

impl<R: PageRenderer> Coordinator<R> {
    /// Creates a new coordinator
    ///
    /// # Arguments
    ///
    /// * `renderer` - Loads pages; configured once by the caller
    /// * `terms` - Resolved search terms, scanned in order on every page
    /// * `seed` - The seed URL; its origin bounds the crawl
    /// * `config` - Crawl behavior (render failure policy)
    pub fn new(renderer: R, terms: Vec<SearchTerm>, seed: &Url, config: CrawlConfig) -> Self {
        Self {
            renderer,
            terms,
            base_origin: seed.origin(),
            config,
        }
    }

    /// Consumes the coordinator, handing back its renderer
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Crawls a whole site starting at `seed` and returns the finished run
    ///
    /// The run is returned even if the crawl aborted, so results gathered
    /// before the failure are never lost.
    pub async fn run(&self, seed: &Url) -> (CrawlRun, Result<(), SweepError>) {
        let mut run = CrawlRun::new(seed.as_str());
        let result = self.crawl(seed.as_str(), &mut run).await;
        run.stats.finish();
        (run, result)
    }

    /// Crawls depth-first from `start_url` into an existing run
    ///
    /// An explicit LIFO worklist replaces recursion. Links are pushed in
    /// reverse so the first link on a page is explored (with its whole
    /// subtree) before the second, giving the same result order as a
    /// recursive depth-first walk.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Traversal finished
    /// * `Err(SweepError)` - A page failed and the config asks to abort;
    ///   `run` still holds everything recorded so far
    pub async fn crawl(&self, start_url: &str, run: &mut CrawlRun) -> Result<(), SweepError> {
        let mut pending = vec![start_url.to_string()];

        while let Some(url) = pending.pop() {
            match self.visit(&url, run).await {
                Ok(links) => pending.extend(links.into_iter().rev()),
                Err(e) if self.config.abort_on_render_failure => {
                    tracing::error!("Aborting crawl at {}: {}", url, e);
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!("Failed to scan {}: {}", url, e);
                }
            }
        }

        tracing::info!(
            "Crawl finished: {} pages recorded, {} URLs visited",
            run.report.len(),
            run.visited.len()
        );

        Ok(())
    }

    /// Handles one occurrence of a URL
    ///
    /// Returns the same-origin links to explore next (empty when the URL was
    /// skipped or already visited).
    async fn visit(&self, url: &str, run: &mut CrawlRun) -> Result<Vec<String>, SweepError> {
        let normalized = normalize_url(url);

        if should_skip_url(&normalized) {
            tracing::info!("Skipping URL: {}", normalized);
            run.stats.record(PageOutcome::Skipped);
            return Ok(Vec::new());
        }

        if !run.visited.insert(&normalized) {
            tracing::trace!("Already visited: {}", normalized);
            run.stats.record(PageOutcome::AlreadyVisited);
            return Ok(Vec::new());
        }

        tracing::info!("Scanning: {}", normalized);

        let target = match Url::parse(url) {
            Ok(target) => target,
            Err(e) => {
                run.stats.record(PageOutcome::InvalidUrl);
                return Err(e.into());
            }
        };

        let page = match self.renderer.render(&target).await {
            Ok(page) => page,
            Err(e) => {
                run.stats.record(PageOutcome::RenderFailed);
                return Err(e.into());
            }
        };

        tracing::debug!(
            "Rendered {} (status: {:?}, title: {:?}, {} links)",
            page.final_url,
            page.status_code,
            page.title,
            page.links.len()
        );

        let content = page.html.to_lowercase();
        let found_items = scan_page(&content, &self.terms);
        let result = PageResult::new(normalized, found_items);

        if result.is_clean() {
            tracing::info!("- clean");
            run.stats.record(PageOutcome::Clean);
        } else {
            tracing::info!("- found {} items!", result.found_items.len());
            run.stats.record(PageOutcome::Matched);
            run.stats.add_matches(result.match_count());
        }

        run.report.record(result);

        Ok(same_origin_links(&page.links, &self.base_origin))
    }
}
