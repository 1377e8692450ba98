//! Page discovery coordinator
//!
//! Dispatches the selected strategy once, runs whatever it produced through
//! the link normalizer, falls back to `/` when nothing usable came back, and
//! applies the user-visible page cap.

use crate::config::{DiscoveryConfig, ManualPaths, UserAgentConfig};
use crate::discovery::frontier::{crawl, CrawlSettings};
use crate::discovery::manual::parse_manual_paths;
use crate::discovery::sitemap::{resolve_sitemap, DEFAULT_MAX_SITEMAP_DEPTH};
use crate::robots::{fetch_robots, ParsedRobots};
use crate::url::normalize_paths;
use crate::DiscoveryError;
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use url::Url;

/// How the pages of the target are found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryStrategy {
    /// Only the root page
    Single,

    /// Pages listed in the site's sitemap
    Sitemap,

    /// Breadth-first crawl from the given seed paths
    Crawl { seeds: Vec<String> },

    /// A literal page list supplied by the caller
    Manual { paths: ManualPaths },
}

impl DiscoveryStrategy {
    /// Builds a strategy from its configured name
    ///
    /// Unknown names log a warning and behave as `single`.
    pub fn from_config(config: &DiscoveryConfig) -> Self {
        match config.strategy.trim().to_ascii_lowercase().as_str() {
            "single" => Self::Single,
            "sitemap" => Self::Sitemap,
            "crawl" => Self::Crawl {
                seeds: if config.start_paths.is_empty() {
                    vec!["/".to_string()]
                } else {
                    config.start_paths.clone()
                },
            },
            "paths" => Self::Manual {
                paths: config
                    .paths
                    .clone()
                    .unwrap_or(ManualPaths::List(Vec::new())),
            },
            other => {
                tracing::warn!("Unknown discovery strategy '{}', using single", other);
                Self::Single
            }
        }
    }

    /// Returns the strategy name as used in configuration
    pub fn name(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Sitemap => "sitemap",
            Self::Crawl { .. } => "crawl",
            Self::Manual { .. } => "paths",
        }
    }
}

impl fmt::Display for DiscoveryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Discovery limits and politeness settings
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// User-visible cap on the final page list
    pub max_pages: usize,

    /// Crawler page budget (hard-capped at 50 by the crawler)
    pub crawl_budget: usize,

    /// Delay between crawl page fetches
    pub crawl_delay: Duration,

    /// Maximum sitemap-index nesting
    pub max_sitemap_depth: usize,

    /// Honor robots.txt while crawling
    pub respect_robots: bool,

    /// Agent token matched against robots.txt groups
    pub robots_agent: String,
}

impl DiscoveryOptions {
    /// Builds options from the discovery and user-agent configuration
    pub fn from_config(discovery: &DiscoveryConfig, user_agent: &UserAgentConfig) -> Self {
        Self {
            max_pages: discovery.max_pages,
            crawl_budget: discovery.crawl_budget,
            crawl_delay: Duration::from_millis(discovery.crawl_delay_ms),
            max_sitemap_depth: discovery.max_sitemap_depth,
            respect_robots: discovery.respect_robots,
            robots_agent: user_agent.crawler_name.clone(),
        }
    }
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            max_pages: 20,
            crawl_budget: 50,
            crawl_delay: Duration::from_millis(200),
            max_sitemap_depth: DEFAULT_MAX_SITEMAP_DEPTH,
            respect_robots: true,
            robots_agent: "*".to_string(),
        }
    }
}

/// Discovers the pages to scan
///
/// Strategy failures never escape: an unusable result falls back to `/`.
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Canonical paths, `/` first, at most `max_pages` long
/// * `Err(DiscoveryError::NoPagesDiscovered)` - The list is empty even after
///   the fallback (only possible with `max_pages == 0`)
pub async fn discover(
    client: &Client,
    base_url: &Url,
    strategy: &DiscoveryStrategy,
    options: &DiscoveryOptions,
) -> Result<Vec<String>, DiscoveryError> {
    tracing::info!("Discovering pages of {} using '{}' strategy", base_url, strategy);

    let raw = run_strategy(client, base_url, strategy, options).await;
    let mut pages = normalize_paths(&raw);

    if pages.is_empty() {
        tracing::warn!("'{}' discovery produced no pages, falling back to /", strategy);
        pages = vec!["/".to_string()];
    }

    if pages.len() > options.max_pages {
        tracing::info!(
            "Limiting {} discovered page(s) to {}",
            pages.len(),
            options.max_pages
        );
        pages.truncate(options.max_pages);
    }

    if pages.is_empty() {
        return Err(DiscoveryError::NoPagesDiscovered);
    }

    tracing::info!("Discovered {} page(s)", pages.len());
    Ok(pages)
}

async fn run_strategy(
    client: &Client,
    base_url: &Url,
    strategy: &DiscoveryStrategy,
    options: &DiscoveryOptions,
) -> Vec<String> {
    match strategy {
        DiscoveryStrategy::Single => vec!["/".to_string()],

        DiscoveryStrategy::Sitemap => {
            let robots = fetch_robots(client, base_url).await;
            match resolve_sitemap(
                client,
                base_url,
                robots.sitemaps(),
                options.max_sitemap_depth,
            )
            .await
            {
                Ok(paths) => paths,
                Err(e) => {
                    tracing::warn!("{}", e);
                    Vec::new()
                }
            }
        }

        DiscoveryStrategy::Crawl { seeds } => {
            let robots: Option<ParsedRobots> = if options.respect_robots {
                Some(fetch_robots(client, base_url).await)
            } else {
                None
            };

            let settings = CrawlSettings {
                delay: options.crawl_delay,
                robots,
                robots_agent: options.robots_agent.clone(),
            };
            crawl(client, base_url, seeds, options.crawl_budget, &settings).await
        }

        DiscoveryStrategy::Manual { paths } => parse_manual_paths(paths, base_url),
    }
}
