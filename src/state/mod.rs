//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `VisitedSet`: normalized URLs already claimed by the current run
//! - `PageOutcome`: what the engine did with one occurrence of a URL

mod page_outcome;
mod visited;

// Re-export main types
pub use page_outcome::PageOutcome;
pub use visited::VisitedSet;
