use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use a11y_sweep::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if both URLs share the exact same hostname
///
/// Subdomains are distinct hosts; ports and schemes are ignored.
pub fn is_same_host(url: &Url, base: &Url) -> bool {
    match (extract_host(url), extract_host(base)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
