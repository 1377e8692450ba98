//! Robots.txt handling module
//!
//! This module fetches and parses the target site's robots.txt. The crawler
//! uses it for allow checks and crawl delays; the sitemap resolver uses its
//! `Sitemap:` directives as extra candidates.

mod parser;

pub use parser::ParsedRobots;

use crate::discovery::{fetch_url, FetchResult};
use reqwest::Client;
use url::Url;

/// Fetches robots.txt for the target site
///
/// Any failure (network error, non-2xx) yields an allow-all record; a missing
/// robots.txt never blocks discovery.
pub async fn fetch_robots(client: &Client, base_url: &Url) -> ParsedRobots {
    let robots_url = match base_url.join("/robots.txt") {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Cannot build robots.txt URL for {}: {}", base_url, e);
            return ParsedRobots::allow_all();
        }
    };

    match fetch_url(client, robots_url.as_str()).await {
        FetchResult::Success { body, .. } => {
            tracing::debug!("Loaded robots.txt from {}", robots_url);
            ParsedRobots::from_content(&body)
        }
        FetchResult::HttpError { status_code } => {
            tracing::debug!("robots.txt returned HTTP {}, allowing all", status_code);
            ParsedRobots::allow_all()
        }
        FetchResult::NetworkError { error, .. } => {
            tracing::warn!("Failed to fetch {}: {}", robots_url, error);
            ParsedRobots::allow_all()
        }
    }
}
