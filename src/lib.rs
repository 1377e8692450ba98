//! a11y-sweep: site-wide accessibility scanning
//!
//! This crate discovers the pages of a running web application, hands each page
//! to an external accessibility scan engine, and folds the per-page results into
//! a single scored report with a severity breakdown and remediation roll-up.

pub mod config;
pub mod discovery;
pub mod output;
pub mod robots;
pub mod scan;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for a11y-sweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Scan engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Page discovery errors
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// None of the sitemap candidates produced a usable page list
    #[error("No sitemap found for {base_url}")]
    NoSitemapFound { base_url: String },

    /// Discovery ended with an empty page list even after falling back to `/`
    #[error("No pages discovered")]
    NoPagesDiscovered,
}

/// Errors returned by a scan engine or enhancement service call
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid engine response: {0}")]
    InvalidResponse(String),

    #[error("Engine reported status '{status}': {message}")]
    Rejected { status: String, message: String },
}

/// Result type alias for a11y-sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use discovery::{discover, DiscoveryOptions, DiscoveryStrategy};
pub use output::{aggregate, AggregateReport};
pub use scan::{calculate_score, execute_scans, ScanResult};
pub use state::{DiscoverySession, ScanStatus};
pub use url::normalize_paths;
