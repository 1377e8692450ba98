//! Configuration module for a11y-sweep
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use a11y_sweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("a11y.toml")).unwrap();
//! println!("Discovery strategy: {}", config.discovery.strategy);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, DiscoveryConfig, EnhancementConfig, ManualPaths, OutputConfig, ScanConfig,
    TargetConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
