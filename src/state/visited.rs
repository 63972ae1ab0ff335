use std::collections::HashSet;

/// Set of normalized URLs already claimed by a crawl run
///
/// A URL is inserted before any work is done on it, so the set alone breaks
/// cycles in the link graph. [`VisitedSet::insert`] is the check and the insert
/// in one step.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a normalized URL
    ///
    /// Returns `true` if the URL was not visited before and is now claimed,
    /// `false` if it was already present.
    pub fn insert(&mut self, normalized_url: &str) -> bool {
        if self.urls.contains(normalized_url) {
            return false;
        }
        self.urls.insert(normalized_url.to_string())
    }

    pub fn contains(&self, normalized_url: &str) -> bool {
        self.urls.contains(normalized_url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
