use crate::url::normalize::strip_fragment;
use std::collections::HashSet;
use url::{Origin, Url};

/// File extensions of binary media that are never followed
const MEDIA_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".svg", ".mp4", ".webm", ".ogg",
];

/// Checks whether a link points at a binary media file
///
/// The check is a case-insensitive suffix match on the fragment-stripped link text.
pub fn is_media_link(link: &str) -> bool {
    let lower = strip_fragment(link).to_ascii_lowercase();
    MEDIA_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Checks whether a link shares scheme, host and port with the given origin
pub fn is_same_origin(link: &str, origin: &Origin) -> bool {
    Url::parse(link)
        .map(|url| url.origin() == *origin)
        .unwrap_or(false)
}

/// Filters a page's outbound links down to the ones the crawl follows
///
/// Each link has its fragment removed, must be same-origin with `origin`, and
/// must not end in a media extension. The result is deduplicated and keeps
/// the order in which links were first discovered on the page.
///
/// # Examples
///
/// ```
/// use term_sweep::url::same_origin_links;
/// use url::Url;
///
/// let origin = Url::parse("https://example.com/").unwrap().origin();
/// let links = vec![
///     "https://example.com/about#team".to_string(),
///     "https://other.com/".to_string(),
///     "https://example.com/logo.png".to_string(),
///     "https://example.com/about".to_string(),
/// ];
/// assert_eq!(same_origin_links(&links, &origin), vec!["https://example.com/about"]);
/// ```
pub fn same_origin_links(links: &[String], origin: &Origin) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();

    for link in links {
        let link = strip_fragment(link);

        if !is_same_origin(link, origin) || is_media_link(link) {
            continue;
        }

        if seen.insert(link.to_string()) {
            result.push(link.to_string());
        }
    }

    result
}
