//! Headless browser page renderer
//!
//! Drives one Chrome/Chromium tab over the DevTools protocol. The tab is set
//! up once at launch, including request interception that fails image and
//! media loads. Each page load then:
//! - Navigates and waits for the load event
//! - Waits until the network has been quiet for the configured idle window
//! - Scrolls to the bottom in steps to trigger lazy-loaded content
//! - Returns the live DOM and the links found in it

use crate::config::RendererConfig;
use crate::crawler::parser::parse_html;
use crate::crawler::renderer::{PageRenderer, RenderError, RenderedPage};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::fetch::{
    EnableParams, EventRequestPaused, FailRequestParams, RequestPattern, RequestStage,
};
use chromiumoxide::cdp::browser_protocol::network::{ErrorReason, ResourceType};
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::StreamExt;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use url::Url;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

const LOAD_STATE_SCRIPT: &str = r#"
(function () {
    return {
        readyState: document.readyState,
        resources: performance.getEntriesByType('resource').length
    };
})()
"#;

/// Document readiness as reported by the page
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoadState {
    ready_state: String,
    /// Resource loads started so far
    resources: u64,
}

/// Decides when a page has gone network-idle
///
/// The page is idle once the document is complete and no new resource load
/// has started for `idle_window`.
#[derive(Debug)]
struct IdleTracker {
    idle_window: Duration,
    last_resources: Option<u64>,
    quiet_since: Option<Instant>,
}

impl IdleTracker {
    fn new(idle_window: Duration) -> Self {
        Self {
            idle_window,
            last_resources: None,
            quiet_since: None,
        }
    }

    /// Feeds one observation; returns true when the page is idle
    fn observe(&mut self, state: &LoadState, now: Instant) -> bool {
        if state.ready_state != "complete" {
            self.last_resources = None;
            self.quiet_since = None;
            return false;
        }

        if self.last_resources != Some(state.resources) {
            self.last_resources = Some(state.resources);
            self.quiet_since = Some(now);
            return false;
        }

        self.quiet_since
            .map(|since| now.duration_since(since) >= self.idle_window)
            .unwrap_or(false)
    }
}

/// Scroll position after one scroll step
#[derive(Debug, Clone, Deserialize)]
struct ScrollPosition {
    /// Bottom edge of the viewport
    scrolled: f64,
    /// Full document height
    height: f64,
}

impl ScrollPosition {
    fn at_bottom(&self) -> bool {
        self.scrolled >= self.height
    }
}

fn scroll_script(step_px: u32) -> String {
    format!(
        r#"
(function () {{
    window.scrollBy(0, {step});
    return {{
        scrolled: Math.ceil(window.scrollY + window.innerHeight),
        height: document.body ? document.body.scrollHeight : 0
    }};
}})()
"#,
        step = step_px
    )
}

/// Interception patterns pausing every image and media request
fn media_patterns() -> Vec<RequestPattern> {
    [ResourceType::Image, ResourceType::Media]
        .into_iter()
        .map(|resource_type| RequestPattern {
            url_pattern: Some("*".to_string()),
            resource_type: Some(resource_type),
            request_stage: Some(RequestStage::Request),
        })
        .collect()
}

fn browser_error(url: &Url, error: CdpError) -> RenderError {
    RenderError::Browser {
        url: url.to_string(),
        message: error.to_string(),
    }
}

/// Renderer backed by a headless Chrome/Chromium session
///
/// One browser and one tab serve every page load of a crawl.
pub struct BrowserRenderer {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    interceptor_task: Option<JoinHandle<()>>,
    timeout: Duration,
    network_idle: Duration,
    scroll_step_px: u32,
    scroll_interval: Duration,
    max_scroll_steps: u32,
}

impl BrowserRenderer {
    /// Launches the browser and prepares the tab used for every page
    ///
    /// # Returns
    ///
    /// * `Ok(BrowserRenderer)` - Browser running, tab ready
    /// * `Err(RenderError::Launch)` - No browser found or it failed to start
    pub async fn launch(config: &RendererConfig) -> Result<Self, RenderError> {
        let mut builder = BrowserConfig::builder()
            .request_timeout(Duration::from_secs(config.timeout_secs))
            .window_size(1280, 800)
            .arg(format!("--user-agent={}", config.user_agent))
            .arg("--no-sandbox")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--mute-audio");

        if !config.headless {
            builder = builder.with_head();
        }

        if let Some(path) = &config.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        let browser_config = builder
            .build()
            .map_err(|message| RenderError::Launch { message })?;

        let (mut browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| RenderError::Launch {
                message: e.to_string(),
            })?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler error: {}", e);
                }
            }
            tracing::debug!("Browser handler task finished");
        });

        let (page, interceptor_task) = match open_tab(&browser, config.block_media).await {
            Ok(tab) => tab,
            Err(e) => {
                if let Err(close_error) = browser.close().await {
                    tracing::debug!("Failed to close browser: {}", close_error);
                }
                handler_task.abort();
                return Err(RenderError::Launch {
                    message: e.to_string(),
                });
            }
        };

        tracing::info!(
            "Browser launched (headless: {}, blocking media: {})",
            config.headless,
            config.block_media
        );

        Ok(Self {
            browser,
            page,
            handler_task,
            interceptor_task,
            timeout: Duration::from_secs(config.timeout_secs),
            network_idle: Duration::from_millis(config.network_idle_ms),
            scroll_step_px: config.scroll_step_px,
            scroll_interval: Duration::from_millis(config.scroll_interval_ms),
            max_scroll_steps: config.max_scroll_steps,
        })
    }

    /// Shuts the browser down
    pub async fn close(self) {
        let Self {
            mut browser,
            handler_task,
            interceptor_task,
            ..
        } = self;

        if let Some(task) = interceptor_task {
            task.abort();
        }

        if let Err(e) = browser.close().await {
            tracing::warn!("Failed to close browser: {}", e);
        }

        if let Err(e) = handler_task.await {
            tracing::debug!("Browser handler task ended abnormally: {}", e);
        }
    }

    async fn load_state(&self) -> Option<LoadState> {
        match self.page.evaluate(LOAD_STATE_SCRIPT).await {
            Ok(result) => result.into_value::<LoadState>().ok(),
            Err(e) => {
                tracing::debug!("Failed to read load state: {}", e);
                None
            }
        }
    }

    /// Polls the page until it is network-idle or the page timeout passes
    async fn wait_for_network_idle(&self) {
        let start = Instant::now();
        let mut tracker = IdleTracker::new(self.network_idle);

        loop {
            if start.elapsed() >= self.timeout {
                tracing::warn!(
                    "Network still busy after {}s, scanning page as is",
                    self.timeout.as_secs()
                );
                return;
            }

            if let Some(state) = self.load_state().await {
                if tracker.observe(&state, Instant::now()) {
                    tracing::trace!("Network idle after {:?}", start.elapsed());
                    return;
                }
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Scrolls step by step until the viewport reaches the document bottom
    async fn scroll_to_bottom(&self) {
        let script = scroll_script(self.scroll_step_px);

        for _ in 0..self.max_scroll_steps {
            let position = match self.page.evaluate(script.as_str()).await {
                Ok(result) => result.into_value::<ScrollPosition>().ok(),
                Err(e) => {
                    tracing::debug!("Scroll step failed: {}", e);
                    None
                }
            };

            match position {
                Some(position) if !position.at_bottom() => {
                    tokio::time::sleep(self.scroll_interval).await;
                }
                _ => return,
            }
        }

        tracing::debug!(
            "Stopped scrolling after {} steps without reaching the bottom",
            self.max_scroll_steps
        );
    }
}

/// Opens the crawl tab and installs media interception on it
async fn open_tab(
    browser: &Browser,
    block_media: bool,
) -> Result<(Page, Option<JoinHandle<()>>), CdpError> {
    let page = browser.new_page("about:blank").await?;

    if !block_media {
        return Ok((page, None));
    }

    let mut paused = page.event_listener::<EventRequestPaused>().await?;
    page.execute(EnableParams {
        patterns: Some(media_patterns()),
        handle_auth_requests: None,
    })
    .await?;

    let interceptor = page.clone();
    let task = tokio::spawn(async move {
        while let Some(event) = paused.next().await {
            tracing::trace!(
                "Blocking {:?} request {}",
                event.resource_type,
                event.request.url
            );
            let fail =
                FailRequestParams::new(event.request_id.clone(), ErrorReason::BlockedByClient);
            if let Err(e) = interceptor.execute(fail).await {
                tracing::debug!("Failed to block request: {}", e);
            }
        }
    });

    Ok((page, Some(task)))
}

#[async_trait]
impl PageRenderer for BrowserRenderer {
    async fn render(&self, url: &Url) -> Result<RenderedPage, RenderError> {
        match tokio::time::timeout(self.timeout, self.page.goto(url.as_str())).await {
            Ok(navigation) => {
                navigation.map_err(|e| browser_error(url, e))?;
            }
            Err(_) => {
                return Err(RenderError::Timeout {
                    url: url.to_string(),
                })
            }
        }

        self.wait_for_network_idle().await;
        self.scroll_to_bottom().await;
        self.wait_for_network_idle().await;

        let html = self
            .page
            .content()
            .await
            .map_err(|e| browser_error(url, e))?;

        let final_url = self
            .page
            .url()
            .await
            .map_err(|e| browser_error(url, e))?
            .and_then(|current| Url::parse(&current).ok())
            .unwrap_or_else(|| url.clone());

        let parsed = parse_html(&html, &final_url);

        Ok(RenderedPage {
            final_url,
            status_code: None,
            title: parsed.title,
            html,
            links: parsed.links,
        })
    }
}
