/// URL substrings that exclude a page from rendering and traversal
///
/// Covers CMS asset directories, cart and checkout flows, and query
/// parameters that mutate a shopping cart when the URL is loaded.
const SKIP_PATTERNS: &[&str] = &[
    "/wp-content/",
    "/cart/",
    "/checkout/",
    "?add-to-cart=",
    "&add-to-cart=",
];

/// Checks whether a normalized URL is excluded by the skip filter
///
/// The check is a cheap substring scan with no side effects. It runs on the
/// normalized form, so `https://shop.com/cart` (normalized to
/// `https://shop.com/cart/`) is excluded as well.
///
/// # Examples
///
/// ```
/// use term_sweep::url::should_skip_url;
///
/// assert!(should_skip_url("https://shop.com/cart/checkout/"));
/// assert!(should_skip_url("https://shop.com/?add-to-cart=42/"));
/// assert!(!should_skip_url("https://shop.com/products/"));
/// ```
pub fn should_skip_url(normalized_url: &str) -> bool {
    SKIP_PATTERNS
        .iter()
        .any(|pattern| normalized_url.contains(pattern))
}
