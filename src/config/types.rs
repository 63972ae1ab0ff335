use serde::Deserialize;
use std::fmt;

/// Main configuration structure for Term-Sweep
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub renderer: RendererConfig,
    pub crawl: CrawlConfig,
    pub output: OutputConfig,
}

/// Search-term source configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Path to the newline-delimited search term list
    #[serde(rename = "terms-file")]
    pub terms_file: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            terms_file: "items.txt".to_string(),
        }
    }
}

/// Which page renderer loads pages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererEngine {
    /// Headless browser when one can be launched, plain HTTP otherwise
    #[default]
    Auto,
    /// Headless Chrome/Chromium only; failing to launch is an error
    Browser,
    /// Plain HTTP fetch without script execution
    Http,
}

impl fmt::Display for RendererEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Browser => write!(f, "browser"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// Page renderer configuration, applied once when the renderer is built
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub engine: RendererEngine,

    /// User-Agent header sent with every page load
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Overall timeout for a single page load (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Refuse image, video and audio responses
    #[serde(rename = "block-media")]
    pub block_media: bool,

    /// Maximum redirect hops followed per page load (HTTP engine)
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,

    /// Browser binary; auto-detected when unset
    #[serde(rename = "chrome-executable")]
    pub chrome_executable: Option<String>,

    pub headless: bool,

    /// Quiet period with no new network requests before a page counts as loaded
    #[serde(rename = "network-idle-ms")]
    pub network_idle_ms: u64,

    /// Pixels scrolled per step while triggering lazy content
    #[serde(rename = "scroll-step-px")]
    pub scroll_step_px: u32,

    /// Pause between scroll steps
    #[serde(rename = "scroll-interval-ms")]
    pub scroll_interval_ms: u64,

    /// Upper bound on scroll steps for pages that keep growing
    #[serde(rename = "max-scroll-steps")]
    pub max_scroll_steps: u32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("term-sweep/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            block_media: true,
            max_redirects: 10,
            engine: RendererEngine::Auto,
            chrome_executable: None,
            headless: true,
            network_idle_ms: 500,
            scroll_step_px: 100,
            scroll_interval_ms: 100,
            max_scroll_steps: 500,
        }
    }
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Stop the whole crawl on the first page that fails to render.
    /// When false the failure is logged and traversal continues.
    #[serde(rename = "abort-on-render-failure")]
    pub abort_on_render_failure: bool,
}

/// Output artifact configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the report files are written into
    pub directory: String,

    /// Write the machine-readable JSON report
    pub json: bool,

    /// Write the browsable HTML report
    pub html: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            json: true,
            html: true,
        }
    }
}
