//! Sitemap resolver
//!
//! Tries a fixed list of well-known sitemap locations (plus any declared in
//! robots.txt) and flattens the first usable one, following sitemap indexes
//! down to a bounded depth.

use crate::discovery::fetcher::{fetch_url, FetchResult};
use crate::discovery::parser::{parse_sitemap, SitemapDocument};
use crate::url::{is_same_host, path_of};
use crate::DiscoveryError;
use reqwest::Client;
use std::collections::HashSet;
use url::Url;

/// Well-known sitemap locations, tried in order
pub const SITEMAP_CANDIDATES: &[&str] = &[
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/sitemap/sitemap.xml",
    "/sitemaps/sitemap.xml",
];

/// Default nesting bound for sitemap indexes
pub const DEFAULT_MAX_SITEMAP_DEPTH: usize = 5;

/// Resolves the target's sitemap into a flat list of same-host paths
///
/// Each candidate is tried in order. A non-2xx response, network error,
/// unparsable document, or a document yielding no same-host pages moves on
/// to the next candidate.
///
/// # Arguments
///
/// * `client` - HTTP client used for all sitemap fetches
/// * `base_url` - The target site; only URLs on its exact host are kept
/// * `extra_candidates` - Additional absolute sitemap URLs (from robots.txt),
///   tried after the well-known locations
/// * `max_depth` - Maximum sitemap-index nesting to follow
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Paths in sitemap document order (not yet normalized)
/// * `Err(DiscoveryError::NoSitemapFound)` - No candidate produced any page
pub async fn resolve_sitemap(
    client: &Client,
    base_url: &Url,
    extra_candidates: &[String],
    max_depth: usize,
) -> Result<Vec<String>, DiscoveryError> {
    for candidate in candidate_urls(base_url, extra_candidates) {
        tracing::debug!("Trying sitemap candidate {}", candidate);

        let paths = collect_sitemap_paths(client, base_url, &candidate, max_depth).await;
        if !paths.is_empty() {
            tracing::info!("Sitemap {} yielded {} page(s)", candidate, paths.len());
            return Ok(paths);
        }
    }

    Err(DiscoveryError::NoSitemapFound {
        base_url: base_url.to_string(),
    })
}

/// Builds the ordered, deduplicated candidate list
fn candidate_urls(base_url: &Url, extra_candidates: &[String]) -> Vec<Url> {
    let mut candidates: Vec<Url> = Vec::new();

    let well_known = SITEMAP_CANDIDATES
        .iter()
        .filter_map(|path| base_url.join(path).ok());
    let declared = extra_candidates
        .iter()
        .filter_map(|raw| base_url.join(raw.trim()).ok());

    for url in well_known.chain(declared) {
        if !candidates.contains(&url) {
            candidates.push(url);
        }
    }

    candidates
}

/// Fetches one sitemap tree depth-first, preserving document order
///
/// Child sitemaps of an index are expanded in the order they are listed, so
/// the result equals the concatenation of each child's pages. Each sitemap URL
/// is fetched at most once.
async fn collect_sitemap_paths(
    client: &Client,
    base_url: &Url,
    root: &Url,
    max_depth: usize,
) -> Vec<String> {
    let mut paths = Vec::new();
    let mut stack: Vec<(Url, usize)> = vec![(root.clone(), 0)];
    let mut fetched: HashSet<Url> = HashSet::new();

    while let Some((sitemap_url, depth)) = stack.pop() {
        if !fetched.insert(sitemap_url.clone()) {
            tracing::debug!("Sitemap {} already fetched, skipping", sitemap_url);
            continue;
        }

        let Some(document) = fetch_sitemap(client, &sitemap_url).await else {
            continue;
        };

        match document {
            SitemapDocument::UrlSet(locs) => {
                for loc in locs {
                    match Url::parse(&loc) {
                        Ok(url) if is_same_host(&url, base_url) => {
                            if let Some(path) = path_of(&url) {
                                paths.push(path);
                            }
                        }
                        Ok(url) => tracing::trace!("Dropping cross-host sitemap entry {}", url),
                        Err(e) => tracing::trace!("Dropping invalid sitemap entry {}: {}", loc, e),
                    }
                }
            }
            SitemapDocument::Index(children) => {
                if depth + 1 > max_depth {
                    tracing::warn!(
                        "Sitemap index {} exceeds max depth {}, skipping {} child(ren)",
                        sitemap_url,
                        max_depth,
                        children.len()
                    );
                    continue;
                }

                // Reverse so the first listed child is expanded first
                for child in children.iter().rev() {
                    match sitemap_url.join(child) {
                        Ok(child_url) => stack.push((child_url, depth + 1)),
                        Err(e) => tracing::debug!("Invalid child sitemap {}: {}", child, e),
                    }
                }
            }
        }
    }

    paths
}

/// Fetches and parses one sitemap document; every failure is soft
async fn fetch_sitemap(client: &Client, url: &Url) -> Option<SitemapDocument> {
    match fetch_url(client, url.as_str()).await {
        FetchResult::Success { body, .. } => {
            let document = parse_sitemap(&body);
            match &document {
                None => tracing::debug!("{} is not a sitemap document", url),
                Some(doc) if doc.is_empty() => tracing::debug!("Sitemap {} lists no entries", url),
                Some(_) => {}
            }
            document
        }
        FetchResult::HttpError { status_code } => {
            tracing::debug!("Sitemap {} returned HTTP {}", url, status_code);
            None
        }
        FetchResult::NetworkError { error, timed_out } => {
            if timed_out {
                tracing::warn!("Sitemap {} timed out", url);
            } else {
                tracing::warn!("Failed to fetch sitemap {}: {}", url, error);
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_order() {
        let base = Url::parse("https://example.com/app").unwrap();
        let candidates: Vec<String> = candidate_urls(&base, &[])
            .into_iter()
            .map(|u| u.to_string())
            .collect();

        assert_eq!(
            candidates,
            vec![
                "https://example.com/sitemap.xml",
                "https://example.com/sitemap_index.xml",
                "https://example.com/sitemap/sitemap.xml",
                "https://example.com/sitemaps/sitemap.xml",
            ]
        );
    }

    #[test]
    fn test_declared_candidates_appended_without_duplicates() {
        let base = Url::parse("https://example.com/").unwrap();
        let extra = vec![
            "https://example.com/sitemap.xml".to_string(),
            "https://example.com/pages.xml".to_string(),
        ];
        let candidates = candidate_urls(&base, &extra);

        assert_eq!(candidates.len(), 5);
        assert_eq!(candidates[4].as_str(), "https://example.com/pages.xml");
    }
}
