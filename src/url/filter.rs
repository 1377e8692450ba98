/// Schemes that never lead to a crawlable page
const SKIPPED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "ftp:", "data:"];

/// File extensions for binary or document resources
const SKIPPED_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "csv", "txt", "xml", "json",
    "zip", "rar", "gz", "tar", "7z", "exe", "dmg", "msi", "jpg", "jpeg", "png", "gif", "svg",
    "webp", "ico", "bmp", "mp3", "mp4", "wav", "avi", "mov", "webm", "css", "js", "woff",
    "woff2", "ttf", "eot",
];

/// Path fragments that are never crawled
const SENSITIVE_PATTERNS: &[&str] = &["/admin", "/api/", "/logout", "/download"];

/// Returns true if an href should be ignored before resolution
///
/// Fragment-only anchors and non-navigational schemes are skipped.
///
/// # Examples
///
/// ```
/// use a11y_sweep::url::is_skipped_href;
///
/// assert!(is_skipped_href("#main"));
/// assert!(is_skipped_href("mailto:team@example.com"));
/// assert!(!is_skipped_href("/about"));
/// ```
pub fn is_skipped_href(href: &str) -> bool {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return true;
    }

    let lower = href.to_ascii_lowercase();
    SKIPPED_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
}

/// Returns true if a canonical path is excluded from crawling
///
/// Paths that point at binary/document resources or sensitive areas of the
/// site (admin panels, APIs, logout, downloads) are excluded.
pub fn is_excluded_path(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();

    if SENSITIVE_PATTERNS.iter().any(|pattern| lower.contains(pattern)) {
        return true;
    }

    has_skipped_extension(&lower)
}

fn has_skipped_extension(lower_path: &str) -> bool {
    let last_segment = lower_path.rsplit('/').next().unwrap_or("");

    match last_segment.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => SKIPPED_EXTENSIONS.contains(&ext),
        _ => false,
    }
}
