//! Page discovery module
//!
//! This module decides which pages of the target get scanned:
//! - HTTP fetching with timeout-aware error classification
//! - HTML link extraction and sitemap parsing
//! - Sitemap resolution and breadth-first crawling
//! - Literal page lists
//! - Strategy dispatch, normalization, and the page cap

mod coordinator;
mod fetcher;
mod frontier;
mod manual;
mod parser;
mod sitemap;

pub use coordinator::{discover, DiscoveryOptions, DiscoveryStrategy};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use frontier::{crawl, CrawlSettings};
pub use manual::parse_manual_paths;
pub use parser::{extract_links, parse_sitemap, SitemapDocument};
pub use sitemap::{resolve_sitemap, DEFAULT_MAX_SITEMAP_DEPTH, SITEMAP_CANDIDATES};
