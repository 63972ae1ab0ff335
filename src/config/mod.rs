//! Configuration module for Term-Sweep
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so a missing file is not an error.
//!
//! # Example
//!
//! ```no_run
//! use term_sweep::config::load_config_or_default;
//! use std::path::Path;
//!
//! let config = load_config_or_default(Path::new("term-sweep.toml")).unwrap();
//! println!("Search terms come from: {}", config.scan.terms_file);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlConfig, OutputConfig, RendererConfig, RendererEngine, ScanConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, DEFAULT_CONFIG_PATH};
