use crate::{UrlError, UrlResult};
use url::Url;

/// Extracts the domain from a URL
///
/// The host portion is returned lowercased. IP hosts are returned as written.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use term_sweep::url::extract_domain;
///
/// let url = Url::parse("https://Shop.Example.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("shop.example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Parses and validates the seed URL a crawl starts from
///
/// The seed must be an absolute `http` or `https` URL with a host.
pub fn parse_seed_url(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

/// Returns the file-name stem used for a crawl's output artifacts
///
/// Artifacts are named after the seed's hostname, e.g. `example.com_crawl_output`.
pub fn report_file_stem(seed: &Url) -> UrlResult<String> {
    let domain = extract_domain(seed).ok_or(UrlError::MissingDomain)?;
    Ok(format!("{}_crawl_output", domain))
}
