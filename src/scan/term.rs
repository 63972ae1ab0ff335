use crate::ScanError;
use regex::{Regex, RegexBuilder};
use std::fmt;

/// How a search term was interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermKind {
    /// The raw term compiled as a regular expression
    Regex,
    /// The term did not compile and is matched as an escaped literal
    Literal,
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regex => write!(f, "regex"),
            Self::Literal => write!(f, "literal"),
        }
    }
}

/// A user-supplied search term resolved to its effective pattern
///
/// # Resolution
///
/// 1. Compile the raw term as a case-insensitive regular expression.
/// 2. If that fails, escape every metacharacter and compile the result as a
///    case-insensitive literal.
///
/// A term that happens to be valid regex syntax is always a regex. There is no
/// way to ask for literal matching of `a.b` or `foo|bar`; write `a\.b` instead.
#[derive(Debug, Clone)]
pub struct SearchTerm {
    term: String,
    kind: TermKind,
    pattern: Regex,
}

impl SearchTerm {
    /// Resolves a term to a regex or an escaped literal
    ///
    /// # Examples
    ///
    /// ```
    /// use term_sweep::scan::{SearchTerm, TermKind};
    ///
    /// let regex = SearchTerm::new("foo|bar").unwrap();
    /// assert_eq!(regex.kind(), TermKind::Regex);
    ///
    /// let literal = SearchTerm::new("50% off (today").unwrap();
    /// assert_eq!(literal.kind(), TermKind::Literal);
    /// assert_eq!(literal.effective_pattern(), r"50% off \(today");
    /// ```
    pub fn new(term: impl Into<String>) -> Result<Self, ScanError> {
        let term = term.into();

        if let Ok(pattern) = build_case_insensitive(&term) {
            return Ok(Self {
                term,
                kind: TermKind::Regex,
                pattern,
            });
        }

        let escaped = regex::escape(&term);
        let pattern = build_case_insensitive(&escaped).map_err(|e| ScanError::InvalidTerm {
            term: term.clone(),
            message: e.to_string(),
        })?;

        Ok(Self {
            term,
            kind: TermKind::Literal,
            pattern,
        })
    }

    /// The term exactly as supplied
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn kind(&self) -> TermKind {
        self.kind
    }

    pub fn is_regex(&self) -> bool {
        self.kind == TermKind::Regex
    }

    /// The pattern actually used for matching (the raw term or its escaped form)
    pub fn effective_pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// The compiled, case-insensitive matcher
    pub fn regex(&self) -> &Regex {
        &self.pattern
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.term, self.kind)
    }
}

fn build_case_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}
