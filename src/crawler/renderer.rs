//! Page renderer implementation
//!
//! This module defines the boundary between the crawl engine and whatever
//! loads pages, plus the plain HTTP renderer:
//! - Building the HTTP client once from the renderer configuration
//! - Loading a page, following redirects
//! - Refusing media and binary responses
//! - Extracting outbound links from the final document

use crate::config::RendererConfig;
use crate::crawler::parser::parse_html;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client, Response};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// A fully loaded page
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Final URL after redirects
    pub final_url: Url,

    /// HTTP status code, when the renderer sees it
    pub status_code: Option<u16>,

    /// Page title (if any)
    pub title: Option<String>,

    /// Final document content
    pub html: String,

    /// Absolute outbound anchor targets in document order, unfiltered
    pub links: Vec<String>,
}

/// Errors raised while loading a page
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Navigation timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Blocked media resource {url} ({content_type})")]
    BlockedResource { url: String, content_type: String },

    #[error("Unsupported content type '{content_type}' for {url}")]
    UnsupportedContent { url: String, content_type: String },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },

    #[error("Failed to launch browser: {message}")]
    Launch { message: String },

    #[error("Browser error for {url}: {message}")]
    Browser { url: String, message: String },
}

/// Loads a URL and returns its final content plus outbound links
///
/// Implementations are configured once at construction; `render` is called
/// sequentially by the crawl engine, one page at a time.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, url: &Url) -> Result<RenderedPage, RenderError>;
}

/// Broad class of a response body, decided from its Content-Type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContentClass {
    /// Text that can be scanned (HTML, XML, JSON, plain text, ...)
    Document,
    /// Image, video or audio
    Media,
    /// Anything else (archives, PDFs, octet streams)
    Binary,
}

fn classify_content_type(content_type: &str) -> ContentClass {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    if mime.is_empty()
        || mime.starts_with("text/")
        || mime.contains("html")
        || mime.contains("xml")
        || mime.contains("json")
        || mime.contains("javascript")
    {
        ContentClass::Document
    } else if mime.starts_with("image/")
        || mime.starts_with("video/")
        || mime.starts_with("audio/")
    {
        ContentClass::Media
    } else {
        ContentClass::Binary
    }
}

/// Builds an HTTP client from the renderer configuration
///
/// # Example
///
/// ```no_run
/// use term_sweep::config::RendererConfig;
/// use term_sweep::crawler::build_http_client;
///
/// let client = build_http_client(&RendererConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &RendererConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Renderer that loads pages over HTTP
///
/// Scripts are not executed; the document is the response body as served.
/// Sub-resources are never requested, and a page URL that itself serves
/// media is refused when `block-media` is enabled.
pub struct HttpRenderer {
    client: Client,
    block_media: bool,
}

impl HttpRenderer {
    pub fn new(config: &RendererConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            block_media: config.block_media,
        })
    }

    /// Classifies a transport error
    fn request_error(url: &Url, error: reqwest::Error) -> RenderError {
        if error.is_timeout() {
            RenderError::Timeout {
                url: url.to_string(),
            }
        } else {
            RenderError::Network {
                url: url.to_string(),
                source: error,
            }
        }
    }

    fn check_content_type(&self, response: &Response) -> Result<(), RenderError> {
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        match classify_content_type(&content_type) {
            ContentClass::Document => Ok(()),
            ContentClass::Media if self.block_media => Err(RenderError::BlockedResource {
                url: response.url().to_string(),
                content_type,
            }),
            ContentClass::Media | ContentClass::Binary => Err(RenderError::UnsupportedContent {
                url: response.url().to_string(),
                content_type,
            }),
        }
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    async fn render(&self, url: &Url) -> Result<RenderedPage, RenderError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Self::request_error(url, e))?;

        let status = response.status();
        let final_url = response.url().clone();

        if !status.is_success() {
            tracing::warn!("{} answered with HTTP {}", final_url, status.as_u16());
        }

        self.check_content_type(&response)?;

        let html = response.text().await.map_err(|e| {
            if e.is_timeout() {
                RenderError::Timeout {
                    url: final_url.to_string(),
                }
            } else {
                RenderError::Body {
                    url: final_url.to_string(),
                    source: e,
                }
            }
        })?;

        let parsed = parse_html(&html, &final_url);

        Ok(RenderedPage {
            final_url,
            status_code: Some(status.as_u16()),
            title: parsed.title,
            html,
            links: parsed.links,
        })
    }
}
