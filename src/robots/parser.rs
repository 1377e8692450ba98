//! Robots.txt parsing
//!
//! Allow/disallow matching is delegated to the robotstxt crate; the crawl-delay
//! and sitemap directives are extracted here.

use robotstxt::DefaultMatcher;
use std::time::Duration;

/// Parsed robots.txt data for the target site
#[derive(Debug, Clone, Default)]
pub struct ParsedRobots {
    /// Raw robots.txt content (empty means allow all)
    content: String,

    /// `Sitemap:` directives in file order
    sitemaps: Vec<String>,

    /// Crawl delays keyed by lowercase agent token (`*` for the wildcard group)
    delays: Vec<(String, f64)>,
}

impl ParsedRobots {
    /// Parses raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        let mut sitemaps = Vec::new();
        let mut delays = Vec::new();
        let mut group_agents: Vec<String> = Vec::new();
        let mut in_agent_lines = false;

        for line in content.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    // Consecutive User-agent lines share one group
                    if !in_agent_lines {
                        group_agents.clear();
                    }
                    if !value.is_empty() {
                        group_agents.push(value.to_ascii_lowercase());
                    }
                    in_agent_lines = true;
                }
                "crawl-delay" => {
                    in_agent_lines = false;
                    if let Ok(delay) = value.parse::<f64>() {
                        if delay.is_finite() && delay >= 0.0 {
                            for agent in &group_agents {
                                delays.push((agent.clone(), delay));
                            }
                        }
                    }
                }
                "sitemap" => {
                    if !value.is_empty() && !sitemaps.iter().any(|s| s == value) {
                        sitemaps.push(value.to_string());
                    }
                }
                _ => in_agent_lines = false,
            }
        }

        Self {
            content: content.to_string(),
            sitemaps,
            delays,
        }
    }

    /// Creates a permissive record used when robots.txt is missing or unreachable
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Checks if a path is allowed for the given user agent token
    pub fn is_allowed(&self, path: &str, user_agent: &str) -> bool {
        if self.content.trim().is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, path)
    }

    /// Crawl delay for the agent, preferring its own group over the wildcard
    ///
    /// Groups match on the agent's product token (`SweepBot` in
    /// `SweepBot/1.0`). Delays too large for a `Duration` saturate.
    pub fn crawl_delay(&self, user_agent: &str) -> Option<Duration> {
        let agent = product_token(user_agent);

        let specific = self
            .delays
            .iter()
            .find(|(token, _)| token != "*" && *token == agent);
        let wildcard = self.delays.iter().find(|(token, _)| token == "*");

        specific.or(wildcard).map(|(_, seconds)| {
            Duration::try_from_secs_f64(*seconds).unwrap_or(Duration::MAX)
        })
    }

    /// Sitemap URLs declared in robots.txt
    pub fn sitemaps(&self) -> &[String] {
        &self.sitemaps
    }
}

/// Lowercased agent name up to the first `/` or whitespace
fn product_token(user_agent: &str) -> String {
    user_agent
        .trim()
        .split(|c: char| c == '/' || c.is_whitespace())
        .next()
        .unwrap_or("")
        .to_ascii_lowercase()
}
