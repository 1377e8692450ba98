//! Report data model
//!
//! Everything here is structured data for downstream renderers; nothing in
//! this module formats presentation strings.

use crate::scan::{Impact, RemediationIssue, RiskLevel};
use crate::state::ScanStatus;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Hex characters of the config hash carried in a scan id
const SCAN_ID_HASH_CHARS: usize = 12;

/// Derived, read-only view over one run's scan results
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    pub total_scans: usize,
    pub completed_scans: usize,
    pub failed_scans: usize,

    /// Rounded mean of completed page scores, 0 with no completed pages
    pub overall_score: u8,

    /// Violation entries across completed pages
    pub total_violations: u64,

    pub total_passes: u64,

    /// Affected node totals per severity; every severity is present
    pub violations_by_severity: BTreeMap<Impact, u64>,

    pub has_enhanced_analysis: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_impact: Option<BusinessImpactSummary>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation_plan: Option<RemediationPlan>,

    /// One entry per scanned page, in scan order
    pub pages: Vec<PageSummary>,
}

/// Business impact roll-up across annotated pages
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessImpactSummary {
    /// Highest risk level seen
    pub overall_risk: RiskLevel,

    /// Pages annotated with high risk
    pub pages_at_risk: usize,

    /// Sum of each page's upper-bound cost estimate
    pub estimated_remediation_cost: f64,

    pub top_business_areas: Vec<String>,
}

/// Remediation roll-up across annotated pages
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemediationPlan {
    pub quick_fixes: u64,
    pub medium_fixes: u64,
    pub complex_fixes: u64,
    pub estimated_total_hours: f64,

    /// Deduplicated priority-1 issues, first seen wins
    pub top_priority1_issues: Vec<RemediationIssue>,
}

/// Per-page entry of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub url: String,
    pub path: String,
    pub status: ScanStatus,

    /// Raw score; failed pages report 0
    pub score: u8,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhanced_score: Option<u8>,

    pub violation_count: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A complete run report: run metadata plus the aggregate
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub scan_id: String,
    pub generated_at: DateTime<Utc>,
    pub base_url: String,
    pub config_hash: String,
    pub strategy: String,

    #[serde(flatten)]
    pub summary: AggregateReport,
}

impl ScanReport {
    /// Stamps an aggregate with run metadata, generated now
    pub fn new(base_url: &str, config_hash: &str, strategy: &str, summary: AggregateReport) -> Self {
        let generated_at = Utc::now();

        Self {
            scan_id: scan_id(generated_at, config_hash),
            generated_at,
            base_url: base_url.to_string(),
            config_hash: config_hash.to_string(),
            strategy: strategy.to_string(),
            summary,
        }
    }
}

/// Builds the correlation id `<UTC timestamp>-<config hash prefix>`
pub fn scan_id(generated_at: DateTime<Utc>, config_hash: &str) -> String {
    let prefix: String = config_hash.chars().take(SCAN_ID_HASH_CHARS).collect();
    format!("{}-{}", generated_at.format("%Y%m%dT%H%M%SZ"), prefix)
}
