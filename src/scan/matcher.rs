//! Line-level pattern matching over page content

use crate::report::MatchRecord;
use crate::scan::SearchTerm;
use std::borrow::Cow;
use indexmap::IndexMap;

/// Finds every line of a page that matches a search term
///
/// Line endings (`\r\n` and lone `\r`) are normalized to `\n` before the text is
/// split. Each matching line yields exactly one record for the first match on
/// that line; `position` is the character offset of that match. An empty
/// result means the term does not occur on the page.
///
/// The caller passes the lowercased page content, so reported lines are the
/// lowercase view of the page.
///
/// # Examples
///
/// ```
/// use term_sweep::scan::{find_matches, SearchTerm};
///
/// let term = SearchTerm::new("sale").unwrap();
/// let matches = find_matches("<h1>summer</h1>\n<p>big sale, sale!</p>", &term);
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches[0].line_number, 2);
/// assert_eq!(matches[0].column_offset, 7);
/// ```
pub fn find_matches(page_text_lowercased: &str, term: &SearchTerm) -> Vec<MatchRecord> {
    let text = normalize_line_endings(page_text_lowercased);

    text.split('\n')
        .enumerate()
        .filter_map(|(index, line)| {
            term.regex().find(line).map(|found| {
                MatchRecord::new(
                    term.effective_pattern(),
                    index + 1,
                    line,
                    line[..found.start()].chars().count(),
                )
            })
        })
        .collect()
}

/// Runs every search term against a page
///
/// Keys follow the order of `terms`. Terms without any match are left out, so
/// an empty map means the page is clean.
pub fn scan_page(
    page_text_lowercased: &str,
    terms: &[SearchTerm],
) -> IndexMap<String, Vec<MatchRecord>> {
    let mut found_items = IndexMap::new();

    for term in terms {
        let matches = find_matches(page_text_lowercased, term);
        if !matches.is_empty() {
            found_items.insert(term.term().to_string(), matches);
        }
    }

    found_items
}

/// Converts `\r\n` and lone `\r` line endings to `\n`
pub(crate) fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(s: &str) -> SearchTerm {
        SearchTerm::new(s).unwrap()
    }

    const SALE_LINE: &str = "today only: 20% sale on everything, no discount codes";

    #[test]
    fn test_literal_substring_anywhere_in_line() {
        let matches = find_matches("<p>get your coupon here</p>", &term("coupon"));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line_number, 1);
        assert_eq!(matches[0].column_offset, 12);
        assert_eq!(matches[0].line_content, "<p>get your coupon here</p>");
    }

    #[test]
    fn test_literal_fallback_matches_metacharacters_literally() {
        let content = "save 50% (today only\nsave 50% today only";
        let matches = find_matches(content, &term("50% (today"));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line_number, 1);
        assert_eq!(matches[0].pattern, r"50% \(today");
    }

    #[test]
    fn test_regex_alternation_semantics() {
        let content = "foo here\nnothing\nbar there\nfoo|bar literal";
        let matches = find_matches(content, &term("foo|bar"));
        let lines: Vec<usize> = matches.iter().map(|m| m.line_number).collect();
        assert_eq!(lines, vec![1, 3, 4]);
        assert_eq!(matches[1].column_offset, 0);
    }

    #[test]
    fn test_first_match_per_line_only() {
        let matches = find_matches("sale sale sale", &term("sale"));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].column_offset, 0);
    }

    #[test]
    fn test_line_numbers_are_one_based() {
        let content = "one\ntwo\nthree sale\nfour\nsale five";
        let matches = find_matches(content, &term("sale"));
        let lines: Vec<usize> = matches.iter().map(|m| m.line_number).collect();
        assert_eq!(lines, vec![3, 5]);
    }

    #[test]
    fn test_crlf_and_cr_line_endings() {
        let content = "alpha\r\nbeta sale\rgamma\r\nsale";
        let matches = find_matches(content, &term("sale"));
        let lines: Vec<usize> = matches.iter().map(|m| m.line_number).collect();
        assert_eq!(lines, vec![2, 4]);
        assert_eq!(matches[0].line_content, "beta sale");
    }

    #[test]
    fn test_position_counts_characters() {
        let matches = find_matches("café — sale", &term("sale"));
        assert_eq!(matches[0].column_offset, 7);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(find_matches("nothing to see", &term("sale")).is_empty());
        assert!(find_matches("", &term("sale")).is_empty());
    }

    #[test]
    fn test_word_boundary_regex() {
        let content = "wholesale prices\nsale!";
        let matches = find_matches(content, &term(r"\bsale\b"));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line_number, 2);
    }

    #[test]
    fn test_scan_page_both_terms() {
        let terms = vec![term("discount"), term(r"\bsale\b")];
        let found = scan_page(SALE_LINE, &terms);

        assert_eq!(found.len(), 2);
        let discount = &found["discount"];
        assert_eq!(discount.len(), 1);
        assert_eq!(discount[0].line_number, 1);
        assert_eq!(discount[0].column_offset, 39);

        let sale = &found[r"\bsale\b"];
        assert_eq!(sale.len(), 1);
        assert_eq!(sale[0].line_number, 1);
        assert_eq!(sale[0].column_offset, 16);
        assert_eq!(sale[0].pattern, r"\bsale\b");
    }

    #[test]
    fn test_scan_page_keeps_term_order() {
        let terms = vec![term("zebra"), term("apple"), term("mango")];
        let found = scan_page("mango apple zebra", &terms);

        let keys: Vec<&str> = found.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_scan_page_clean_is_empty_map() {
        let terms = vec![term("discount"), term("coupon")];
        assert!(scan_page("<html><body>hello</body></html>", &terms).is_empty());
    }

    #[test]
    fn test_scan_page_omits_unmatched_terms() {
        let terms = vec![term("discount"), term("coupon")];
        let found = scan_page("discount inside", &terms);
        assert_eq!(found.len(), 1);
        assert!(found.contains_key("discount"));
        assert!(!found.contains_key("coupon"));
    }

    #[test]
    fn test_scan_page_keys_use_original_term() {
        let terms = vec![term("Discount")];
        let found = scan_page("discount", &terms);
        assert!(found.contains_key("Discount"));
    }

    #[test]
    fn test_normalize_line_endings_borrows_when_clean() {
        assert!(matches!(normalize_line_endings("a\nb"), Cow::Borrowed(_)));
        assert_eq!(normalize_line_endings("a\r\nb\rc"), "a\nb\nc");
    }
}
