//! Search-term handling for Term-Sweep
//!
//! This module resolves user-supplied search terms to their effective patterns,
//! matches them line by line against page content, and loads the term list.

mod matcher;
mod term;
mod terms;

pub use matcher::{find_matches, scan_page};
pub use term::{SearchTerm, TermKind};
pub use terms::{load_search_terms, parse_search_terms};
