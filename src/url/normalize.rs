use std::collections::BTreeSet;
use url::Url;

/// Canonicalizes and deduplicates a list of site-relative paths
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace; drop empty or whitespace-containing entries
/// 2. Cut everything from the first `?` or `#` onward
/// 3. Prefix a leading `/` if absent
/// 4. Remove trailing slashes (except for root `/`)
/// 5. Deduplicate and sort lexicographically, with `/` always first
///
/// Malformed entries are dropped silently; this function never fails.
///
/// # Examples
///
/// ```
/// use a11y_sweep::url::normalize_paths;
///
/// let pages = normalize_paths(&["about", "/about/", "/about?x=1#y"]);
/// assert_eq!(pages, vec!["/about".to_string()]);
/// ```
pub fn normalize_paths<S: AsRef<str>>(raw_paths: &[S]) -> Vec<String> {
    let unique: BTreeSet<String> = raw_paths
        .iter()
        .filter_map(|raw| canonical_path(raw.as_ref()))
        .collect();

    let has_root = unique.contains("/");
    let mut paths: Vec<String> = unique.into_iter().filter(|p| p != "/").collect();

    if has_root {
        paths.insert(0, "/".to_string());
    }

    paths
}

/// Canonicalizes a single path, returning `None` for unusable input
///
/// # Examples
///
/// ```
/// use a11y_sweep::url::canonical_path;
///
/// assert_eq!(canonical_path("docs/"), Some("/docs".to_string()));
/// assert_eq!(canonical_path("/?page=2"), Some("/".to_string()));
/// assert_eq!(canonical_path("   "), None);
/// ```
pub fn canonical_path(raw: &str) -> Option<String> {
    let trimmed = raw.trim();

    let end = trimmed.find(['?', '#']).unwrap_or(trimmed.len());
    let path = &trimmed[..end];

    if path.is_empty() || path.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return None;
    }

    let stripped = path.trim_start_matches('/').trim_end_matches('/');
    if stripped.is_empty() {
        return Some("/".to_string());
    }

    Some(format!("/{}", stripped))
}

/// Extracts the path component of an absolute URL as a canonical path
///
/// Scheme, host, query and fragment are discarded.
pub fn path_of(url: &Url) -> Option<String> {
    canonical_path(url.path())
}
