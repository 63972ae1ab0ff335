use serde::Serialize;
use indexmap::IndexMap;

/// One line of a page on which a search term matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    /// Effective pattern that produced the match
    #[serde(rename = "regex")]
    pub pattern: String,

    /// 1-based line number within the page content
    #[serde(rename = "lineNumber")]
    pub line_number: usize,

    /// The full (lowercased) line
    #[serde(rename = "lineContent")]
    pub line_content: String,

    /// Character offset of the first match on the line
    #[serde(rename = "position")]
    pub column_offset: usize,
}

impl MatchRecord {
    pub fn new(
        pattern: impl Into<String>,
        line_number: usize,
        line_content: impl Into<String>,
        column_offset: usize,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            line_number,
            line_content: line_content.into(),
            column_offset,
        }
    }
}

/// Scan result for a single normalized URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult {
    #[serde(rename = "scanned_url")]
    pub normalized_url: String,

    /// Matches keyed by search term; terms without matches are absent
    #[serde(rename = "foundItems")]
    pub found_items: IndexMap<String, Vec<MatchRecord>>,
}

impl PageResult {
    pub fn new(
        normalized_url: impl Into<String>,
        found_items: IndexMap<String, Vec<MatchRecord>>,
    ) -> Self {
        Self {
            normalized_url: normalized_url.into(),
            found_items,
        }
    }

    /// Returns true if no search term matched this page
    pub fn is_clean(&self) -> bool {
        self.found_items.is_empty()
    }

    /// Total number of match records across all terms
    pub fn match_count(&self) -> usize {
        self.found_items.values().map(Vec::len).sum()
    }
}
