//! URL handling module for a11y-sweep
//!
//! This module provides the link normalizer, host comparison, and the
//! structural link filters applied while crawling.

mod domain;
mod filter;
mod normalize;

// Re-export main functions
pub use domain::{extract_host, is_same_host};
pub use filter::{is_excluded_path, is_skipped_href};
pub use normalize::{canonical_path, normalize_paths, path_of};

use crate::{UrlError, UrlResult};
use url::Url;

/// Parses the target base URL, requiring an http(s) scheme and a host
///
/// # Examples
///
/// ```
/// use a11y_sweep::url::parse_base_url;
///
/// assert!(parse_base_url("https://example.com").is_ok());
/// assert!(parse_base_url("ftp://example.com").is_err());
/// ```
pub fn parse_base_url(raw: &str) -> UrlResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Joins a canonical path onto the base URL's origin
///
/// The base URL's own path is replaced, so `/about` on `https://example.com/app`
/// becomes `https://example.com/about`.
pub fn page_url(base: &Url, path: &str) -> UrlResult<Url> {
    base.join(path).map_err(|e| UrlError::Parse(e.to_string()))
}
