//! URL handling module for Term-Sweep
//!
//! This module provides URL normalization, the skip filter, same-origin link
//! filtering, and hostname extraction for naming output artifacts.

mod domain;
mod links;
mod normalize;
mod skip;

// Re-export main functions
pub use domain::{extract_domain, parse_seed_url, report_file_stem};
pub use links::{is_media_link, is_same_origin, same_origin_links};
pub use normalize::{normalize_url, strip_fragment};
pub use skip::should_skip_url;
