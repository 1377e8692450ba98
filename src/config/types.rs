use serde::Deserialize;
use std::collections::BTreeMap;

/// Main configuration structure for a11y-sweep
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub target: TargetConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub enhancement: Option<EnhancementConfig>,
    #[serde(default)]
    pub output: OutputConfig,
}

/// The application under test
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// Absolute base URL of the running application
    #[serde(rename = "base-url")]
    pub base_url: String,
}

/// Page discovery configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    /// Strategy name: single, sitemap, crawl or paths
    #[serde(default = "default_strategy")]
    pub strategy: String,

    /// Maximum number of pages handed to the scanner
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Page budget for the crawler (hard-capped at 50)
    #[serde(rename = "crawl-budget", default = "default_crawl_budget")]
    pub crawl_budget: usize,

    /// Seed paths for the crawl strategy
    #[serde(rename = "start-paths", default = "default_start_paths")]
    pub start_paths: Vec<String>,

    /// Literal page list for the paths strategy
    #[serde(default)]
    pub paths: Option<ManualPaths>,

    /// Delay between crawl page fetches (milliseconds)
    #[serde(rename = "crawl-delay-ms", default = "default_crawl_delay_ms")]
    pub crawl_delay_ms: u64,

    /// Timeout for a single page or sitemap fetch (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum nesting of sitemap index documents
    #[serde(rename = "max-sitemap-depth", default = "default_sitemap_depth")]
    pub max_sitemap_depth: usize,

    /// Honor robots.txt rules while crawling
    #[serde(rename = "respect-robots", default = "default_true")]
    pub respect_robots: bool,
}

/// Manual page list, either one newline-delimited string or a TOML array
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ManualPaths {
    Text(String),
    List(Vec<String>),
}

/// Scan engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Base URL of the scan engine service
    #[serde(rename = "engine-url", default = "default_engine_url")]
    pub engine_url: String,

    /// WCAG conformance level: A, AA or AAA
    #[serde(rename = "wcag-level", default = "default_wcag_level")]
    pub wcag_level: String,

    #[serde(rename = "include-best-practices", default = "default_true")]
    pub include_best_practices: bool,

    #[serde(rename = "include-experimental", default)]
    pub include_experimental: bool,

    /// Timeout for a single page scan (seconds)
    #[serde(rename = "timeout-secs", default = "default_scan_timeout")]
    pub timeout_secs: u64,

    /// Extra headers the engine sends with every page request
    #[serde(rename = "custom-headers", default)]
    pub custom_headers: BTreeMap<String, String>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,
}

/// Optional enhanced-analysis service
#[derive(Debug, Clone, Deserialize)]
pub struct EnhancementConfig {
    #[serde(rename = "api-url")]
    pub api_url: String,

    #[serde(rename = "api-key", default)]
    pub api_key: Option<String>,

    #[serde(rename = "timeout-secs", default = "default_enhancement_timeout")]
    pub timeout_secs: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the JSON report file
    #[serde(rename = "report-path", default = "default_report_path")]
    pub report_path: String,
}

impl UserAgentConfig {
    /// Formats the user agent header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            max_pages: default_max_pages(),
            crawl_budget: default_crawl_budget(),
            start_paths: default_start_paths(),
            paths: None,
            crawl_delay_ms: default_crawl_delay_ms(),
            request_timeout_secs: default_request_timeout(),
            max_sitemap_depth: default_sitemap_depth(),
            respect_robots: true,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            engine_url: default_engine_url(),
            wcag_level: default_wcag_level(),
            include_best_practices: true,
            include_experimental: false,
            timeout_secs: default_scan_timeout(),
            custom_headers: BTreeMap::new(),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: default_report_path(),
        }
    }
}

fn default_strategy() -> String {
    "single".to_string()
}

fn default_max_pages() -> usize {
    20
}

fn default_crawl_budget() -> usize {
    50
}

fn default_start_paths() -> Vec<String> {
    vec!["/".to_string()]
}

fn default_crawl_delay_ms() -> u64 {
    200
}

fn default_request_timeout() -> u64 {
    10
}

fn default_sitemap_depth() -> usize {
    5
}

fn default_true() -> bool {
    true
}

fn default_engine_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_wcag_level() -> String {
    "AA".to_string()
}

fn default_scan_timeout() -> u64 {
    60
}

fn default_crawler_name() -> String {
    "a11y-sweep".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_enhancement_timeout() -> u64 {
    30
}

fn default_report_path() -> String {
    "./a11y-report.json".to_string()
}
