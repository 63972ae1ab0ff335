/// Normalizes a URL into the key used for visitation and deduplication
///
/// # Normalization Steps
///
/// 1. Remove the fragment (everything from the first `#`)
/// 2. Remove a single trailing slash if present
/// 3. Append exactly one trailing slash
///
/// This is a pure string transformation: the URL is not parsed, query strings
/// are kept verbatim, and two URLs that differ only by fragment or by the
/// presence of a trailing slash produce the same key.
///
/// # Examples
///
/// ```
/// use term_sweep::url::normalize_url;
///
/// assert_eq!(normalize_url("https://example.com/page#top"), "https://example.com/page/");
/// assert_eq!(normalize_url("https://example.com/page/"), "https://example.com/page/");
/// assert_eq!(normalize_url("https://example.com"), "https://example.com/");
/// ```
pub fn normalize_url(url: &str) -> String {
    let without_fragment = strip_fragment(url);
    let trimmed = without_fragment
        .strip_suffix('/')
        .unwrap_or(without_fragment);
    format!("{}/", trimmed)
}

/// Returns the URL without its fragment component
pub fn strip_fragment(url: &str) -> &str {
    match url.find('#') {
        Some(index) => &url[..index],
        None => url,
    }
}
