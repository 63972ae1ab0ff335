//! Term-Sweep: a same-origin site sweeper
//!
//! This crate crawls a website depth-first from a seed URL, scans every rendered
//! page against a list of search terms (regular expressions or literal strings),
//! and produces a structured report plus a browsable HTML rendering of matches.

pub mod config;
pub mod crawler;
pub mod output;
pub mod report;
pub mod scan;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Term-Sweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Render error: {0}")]
    Render(#[from] crawler::RenderError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to read search terms from {path}: {source}")]
    TermsFile {
        path: String,
        source: std::io::Error,
    },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Search-term errors
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Search term '{term}' cannot be compiled: {message}")]
    InvalidTerm { term: String, message: String },
}

/// Result type alias for Term-Sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use report::{CrawlReport, MatchRecord, PageResult};
pub use scan::{find_matches, SearchTerm};
pub use state::{PageOutcome, VisitedSet};
pub use crate::url::{normalize_url, should_skip_url};
