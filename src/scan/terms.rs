use crate::scan::matcher::normalize_line_endings;
use crate::scan::SearchTerm;
use crate::{ConfigError, ScanError, SweepError};
use std::collections::HashSet;
use std::path::Path;

/// Parses a newline-delimited search-term list
///
/// Blank and whitespace-only lines are dropped; every other line is kept
/// verbatim (including surrounding spaces). Repeated terms keep only their
/// first occurrence.
pub fn parse_search_terms(content: &str) -> Result<Vec<SearchTerm>, ScanError> {
    let content = normalize_line_endings(content);
    let mut seen = HashSet::new();
    let mut terms = Vec::new();

    for line in content.split('\n') {
        if line.trim().is_empty() {
            continue;
        }

        if !seen.insert(line) {
            tracing::warn!("Ignoring duplicate search term: {}", line);
            continue;
        }

        let term = SearchTerm::new(line)?;
        tracing::debug!("Loaded search term {}", term);
        terms.push(term);
    }

    Ok(terms)
}

/// Reads and parses the search-term file once for a crawl run
///
/// # Returns
///
/// * `Ok(Vec<SearchTerm>)` - The resolved terms in file order
/// * `Err(SweepError)` - The file could not be read or a term could not be compiled
pub fn load_search_terms(path: &Path) -> Result<Vec<SearchTerm>, SweepError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::TermsFile {
        path: path.display().to_string(),
        source,
    })?;

    let terms = parse_search_terms(&content)?;

    if terms.is_empty() {
        tracing::warn!(
            "No search terms found in {}; every page will be reported clean",
            path.display()
        );
    } else {
        let literals = terms.iter().filter(|t| !t.is_regex()).count();
        tracing::info!(
            "Loaded {} search terms from {} ({} regex, {} literal)",
            terms.len(),
            path.display(),
            terms.len() - literals,
            literals
        );
    }

    Ok(terms)
}
