//! Page scanning
//!
//! This module handles:
//! - The scan engine seam and its HTTP client
//! - Sequential per-page scan execution with failure isolation
//! - Page score calculation
//! - The optional enhanced-analysis annotation service

mod engine;
mod enhance;
mod executor;
mod score;
pub mod types;

pub use engine::{HttpScanEngine, ScanEngine};
pub use enhance::HttpEnhancer;
pub use executor::{execute_scans, ScanSettings};
pub use score::calculate_score;
pub use types::{
    CostEstimate, EffortClass, EnhancedAnalysis, EngineNode, EngineResponse, EngineViolation,
    Impact, PageBusinessImpact, PageRemediation, RemediationIssue, RiskLevel, ScanRequest,
    ScanResult, Violation,
};
