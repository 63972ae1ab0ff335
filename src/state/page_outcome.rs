/// Page outcome definitions for tracking what happened to each URL visit
use std::fmt;

/// Represents how the crawl engine handled one occurrence of a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageOutcome {
    // ===== Scanned =====
    /// Page was rendered and at least one search term matched
    Matched,

    /// Page was rendered and no search term matched
    Clean,

    // ===== Not Scanned =====
    /// URL was excluded by the skip filter
    Skipped,

    /// Normalized URL was already in the visited set
    AlreadyVisited,

    // ===== Errors =====
    /// URL could not be parsed for rendering
    InvalidUrl,

    /// The renderer failed to load the page
    RenderFailed,
}

impl PageOutcome {
    /// Returns true if the page was rendered and scanned
    pub fn is_scanned(&self) -> bool {
        matches!(self, Self::Matched | Self::Clean)
    }

    /// Returns true if the page was claimed in the visited set
    ///
    /// Skipped and already-visited occurrences do not claim the URL.
    pub fn claims_url(&self) -> bool {
        !matches!(self, Self::Skipped | Self::AlreadyVisited)
    }

    /// Returns true if this represents an error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::InvalidUrl | Self::RenderFailed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Matched => "matched",
            Self::Clean => "clean",
            Self::Skipped => "skipped",
            Self::AlreadyVisited => "already_visited",
            Self::InvalidUrl => "invalid_url",
            Self::RenderFailed => "render_failed",
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
