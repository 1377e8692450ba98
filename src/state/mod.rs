//! State management for discovery and scanning
//!
//! This module provides the per-run discovery session and the scan status
//! carried by each page result.

mod scan_status;
mod session;

pub use scan_status::ScanStatus;
pub use session::{DiscoverySession, MAX_CRAWL_PAGES};
