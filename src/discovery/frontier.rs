//! Crawl frontier
//!
//! Breadth-first traversal of same-host links starting from seed paths:
//! pop a path, record it, fetch the page, enqueue unseen same-host links.
//! Stops when the queue empties or the page budget is spent.

use crate::discovery::fetcher::{fetch_url, FetchResult};
use crate::discovery::parser::extract_links;
use crate::robots::ParsedRobots;
use crate::state::DiscoverySession;
use crate::url::{is_excluded_path, is_same_host, page_url, path_of};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Longest robots.txt crawl delay honored between fetches
const MAX_ROBOTS_DELAY: Duration = Duration::from_secs(5);

/// Crawl tuning knobs
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    /// Politeness delay between page fetches
    pub delay: Duration,

    /// robots.txt rules to honor; `None` crawls everything
    pub robots: Option<ParsedRobots>,

    /// Agent token used for robots.txt matching
    pub robots_agent: String,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(200),
            robots: None,
            robots_agent: "*".to_string(),
        }
    }
}

impl CrawlSettings {
    /// Politeness delay, raised (never lowered) by a robots.txt crawl delay
    pub fn effective_delay(&self) -> Duration {
        let robots_delay = self
            .robots
            .as_ref()
            .and_then(|robots| robots.crawl_delay(&self.robots_agent))
            .map(|delay| delay.min(MAX_ROBOTS_DELAY))
            .unwrap_or_default();

        self.delay.max(robots_delay)
    }

    fn is_allowed(&self, path: &str) -> bool {
        self.robots
            .as_ref()
            .map_or(true, |robots| robots.is_allowed(path, &self.robots_agent))
    }
}

/// Crawls the target breadth-first and returns discovered paths in visit order
///
/// # Arguments
///
/// * `client` - HTTP client (carries the per-request timeout)
/// * `base_url` - The target site; only links on its exact host are followed
/// * `seed_paths` - Starting paths, visited first in the given order
/// * `page_budget` - Maximum pages to discover (hard-capped at 50)
/// * `settings` - Politeness delay and robots.txt rules
///
/// A fetch or parse failure on one page is logged and skipped; the page stays
/// recorded and is never retried.
pub async fn crawl<S: AsRef<str>>(
    client: &Client,
    base_url: &Url,
    seed_paths: &[S],
    page_budget: usize,
    settings: &CrawlSettings,
) -> Vec<String> {
    let mut session = DiscoverySession::new(seed_paths, page_budget);
    let delay = settings.effective_delay();
    let mut fetched_any = false;

    tracing::info!(
        "Crawling {} with budget {} ({} seed(s), {:?} delay)",
        base_url,
        session.page_budget(),
        session.frontier_size(),
        delay
    );

    while let Some(path) = session.next_path() {
        if !settings.is_allowed(&path) {
            tracing::info!("Skipping {}: disallowed by robots.txt", path);
            continue;
        }

        session.record_discovered(path.clone());

        // The last page of the budget does not need its links
        if session.is_budget_spent() {
            break;
        }

        if fetched_any && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        fetched_any = true;

        let url = match page_url(base_url, &path) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Cannot build URL for {}: {}", path, e);
                continue;
            }
        };

        let links = match fetch_page_links(client, base_url, &url).await {
            Some(links) => links,
            None => continue,
        };

        let mut added = 0;
        for link in links {
            if session.enqueue(link) {
                added += 1;
            }
        }

        tracing::debug!(
            "{}: {} new link(s), {} in frontier, {} discovered",
            path,
            added,
            session.frontier_size(),
            session.discovered_count()
        );
    }

    let discovered = session.into_discovered();
    tracing::info!("Crawl finished with {} page(s)", discovered.len());
    discovered
}

/// Fetches one page and returns its crawlable same-host link paths
///
/// Returns `None` when the page could not be fetched or is not HTML.
async fn fetch_page_links(client: &Client, base_url: &Url, url: &Url) -> Option<Vec<String>> {
    let result = fetch_url(client, url.as_str()).await;
    let is_html = result.is_html();

    match result {
        FetchResult::Success {
            final_url,
            body,
            content_type,
            ..
        } => {
            if !is_html {
                tracing::debug!("{} is {}, not following links", url, content_type);
                return None;
            }

            if !is_same_host(&final_url, base_url) {
                tracing::debug!("{} redirected off-site to {}", url, final_url);
                return None;
            }

            Some(crawlable_paths(&body, &final_url, base_url))
        }
        FetchResult::HttpError { status_code } => {
            tracing::warn!("Failed to fetch {}: HTTP {}", url, status_code);
            None
        }
        FetchResult::NetworkError { error, .. } => {
            tracing::warn!("Failed to fetch {}: {}", url, error);
            None
        }
    }
}

/// Extracts same-host, non-excluded canonical paths from a page body
fn crawlable_paths(body: &str, page: &Url, base_url: &Url) -> Vec<String> {
    extract_links(body, page)
        .into_iter()
        .filter(|link| is_same_host(link, base_url))
        .filter_map(|link| path_of(&link))
        .filter(|path| {
            let excluded = is_excluded_path(path);
            if excluded {
                tracing::trace!("Excluding {}", path);
            }
            !excluded
        })
        .collect()
}
