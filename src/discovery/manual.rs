//! Literal page list parsing for the `paths` strategy

use crate::config::ManualPaths;
use crate::url::{is_same_host, path_of};
use url::Url;

/// Parses a caller-supplied page list into raw paths
///
/// Entries are taken one per line (text form) or one per element (list form).
/// Blank entries and entries starting with `#` are ignored. Absolute URLs on
/// the target host are reduced to their path; absolute URLs on other hosts
/// are dropped with a warning.
///
/// # Example
///
/// ```
/// use a11y_sweep::config::ManualPaths;
/// use a11y_sweep::discovery::parse_manual_paths;
/// use url::Url;
///
/// let base = Url::parse("https://example.com").unwrap();
/// let input = ManualPaths::Text("/\n/about\n\n# comment\n/contact".to_string());
/// assert_eq!(parse_manual_paths(&input, &base), vec!["/", "/about", "/contact"]);
/// ```
pub fn parse_manual_paths(input: &ManualPaths, base_url: &Url) -> Vec<String> {
    let entries: Vec<&str> = match input {
        ManualPaths::Text(text) => text.lines().collect(),
        ManualPaths::List(items) => items
            .iter()
            .flat_map(|item| item.lines())
            .collect(),
    };

    entries
        .into_iter()
        .map(str::trim)
        .filter(|entry| !entry.is_empty() && !entry.starts_with('#'))
        .filter_map(|entry| literal_to_path(entry, base_url))
        .collect()
}

fn literal_to_path(entry: &str, base_url: &Url) -> Option<String> {
    if !(entry.starts_with("http://") || entry.starts_with("https://")) {
        return Some(entry.to_string());
    }

    match Url::parse(entry) {
        Ok(url) if is_same_host(&url, base_url) => path_of(&url),
        Ok(url) => {
            tracing::warn!("Ignoring page {} outside {}", url, base_url);
            None
        }
        Err(e) => {
            tracing::warn!("Ignoring malformed page URL {}: {}", entry, e);
            None
        }
    }
}
