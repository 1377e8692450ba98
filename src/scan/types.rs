//! Scan data model
//!
//! Wire types exchanged with the scan engine, and the normalized per-page
//! result the rest of the crate works with.

use crate::state::ScanStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Matched element descriptors kept per violation
pub const MAX_NODE_SAMPLES: usize = 3;

/// Longest HTML snippet kept as a node sample
const MAX_SNIPPET_CHARS: usize = 120;

/// Severity of a single rule violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Minor,
    Moderate,
    Serious,
    Critical,
}

impl Impact {
    /// All impacts, least severe first
    pub const ALL: [Impact; 4] = [
        Impact::Minor,
        Impact::Moderate,
        Impact::Serious,
        Impact::Critical,
    ];

    /// Score weight of one affected node
    pub fn weight(self) -> u64 {
        match self {
            Impact::Critical => 4,
            Impact::Serious => 3,
            Impact::Moderate => 2,
            Impact::Minor => 1,
        }
    }

    /// Parses an engine impact string; unknown values yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "critical" => Some(Impact::Critical),
            "serious" => Some(Impact::Serious),
            "moderate" => Some(Impact::Moderate),
            "minor" => Some(Impact::Minor),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Impact::Critical => "critical",
            Impact::Serious => "serious",
            Impact::Moderate => "moderate",
            Impact::Minor => "minor",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One rule failure on one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub rule_id: String,

    /// `None` when the engine reported no or an unrecognized impact
    pub impact: Option<Impact>,

    /// `None` when the engine omitted the node list
    pub affected_node_count: Option<u32>,

    pub help: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub help_url: Option<String>,

    /// At most `MAX_NODE_SAMPLES` matched element descriptors
    #[serde(default)]
    pub node_samples: Vec<String>,
}

impl Violation {
    /// Creates a violation with the given rule, impact, and node count
    pub fn new(rule_id: &str, impact: Option<Impact>, affected_node_count: Option<u32>) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            impact,
            affected_node_count,
            help: String::new(),
            description: String::new(),
            help_url: None,
            node_samples: Vec::new(),
        }
    }

    /// Affected node count, counting an absent count as one node
    pub fn node_count_or_one(&self) -> u64 {
        self.affected_node_count.map_or(1, u64::from)
    }

    /// Severity bucket for the report histogram (unknown impact counts as minor)
    pub fn severity(&self) -> Impact {
        self.impact.unwrap_or(Impact::Minor)
    }
}

/// Request sent to the scan engine for one page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub url: String,
    pub wcag_level: String,
    pub include_best_practices: bool,
    pub include_experimental: bool,
    pub custom_headers: BTreeMap<String, String>,
    pub user_agent: String,
}

/// Raw scan engine response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineResponse {
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub score: Option<f64>,

    #[serde(default)]
    pub violations: Vec<EngineViolation>,

    #[serde(default)]
    pub passes: Vec<serde_json::Value>,

    #[serde(default)]
    pub incomplete: Vec<serde_json::Value>,

    /// Kept raw so a malformed annotation never fails the page
    #[serde(default)]
    pub enhanced_analysis: Option<serde_json::Value>,

    #[serde(default)]
    pub error: Option<String>,
}

/// Raw rule violation as reported by the engine
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineViolation {
    pub id: String,

    #[serde(default)]
    pub impact: Option<String>,

    #[serde(default)]
    pub help: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub help_url: Option<String>,

    #[serde(default)]
    pub nodes: Option<Vec<EngineNode>>,
}

/// One matched element
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineNode {
    #[serde(default)]
    pub target: Vec<serde_json::Value>,

    #[serde(default)]
    pub html: Option<String>,
}

impl EngineNode {
    /// Short descriptor: the target selector chain, else a truncated HTML snippet
    fn descriptor(&self) -> Option<String> {
        let selectors: Vec<String> = self
            .target
            .iter()
            .map(|value| match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .filter(|s| !s.is_empty())
            .collect();

        if !selectors.is_empty() {
            return Some(selectors.join(" "));
        }

        self.html
            .as_deref()
            .map(str::trim)
            .filter(|html| !html.is_empty())
            .map(|html| html.chars().take(MAX_SNIPPET_CHARS).collect())
    }
}

impl From<EngineViolation> for Violation {
    fn from(raw: EngineViolation) -> Self {
        let affected_node_count = raw
            .nodes
            .as_ref()
            .map(|nodes| u32::try_from(nodes.len()).unwrap_or(u32::MAX));
        let node_samples = raw
            .nodes
            .iter()
            .flatten()
            .filter_map(EngineNode::descriptor)
            .take(MAX_NODE_SAMPLES)
            .collect();

        Self {
            impact: raw.impact.as_deref().and_then(Impact::parse),
            rule_id: raw.id,
            affected_node_count,
            help: raw.help,
            description: raw.description,
            help_url: raw.help_url,
            node_samples,
        }
    }
}

/// Risk level attached by the enhanced-analysis service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl From<String> for RiskLevel {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" | "critical" => RiskLevel::High,
            "medium" | "moderate" => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }
}

/// Effort class of a remediation recommendation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffortClass {
    Quick,
    #[default]
    Medium,
    Complex,
}

/// A fix recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemediationIssue {
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, alias = "effortClass")]
    pub effort: EffortClass,
}

/// Estimated remediation cost range for one page
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub max: f64,
}

/// Business impact annotation for one page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBusinessImpact {
    #[serde(default)]
    pub risk_level: RiskLevel,

    #[serde(default)]
    pub estimated_cost: Option<CostEstimate>,

    #[serde(default)]
    pub business_areas: Vec<String>,
}

/// Remediation annotation for one page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRemediation {
    #[serde(default)]
    pub quick_fixes: u32,

    #[serde(default)]
    pub medium_fixes: u32,

    #[serde(default)]
    pub complex_fixes: u32,

    #[serde(default, alias = "priority1Issues")]
    pub priority1: Vec<RemediationIssue>,
}

/// Optional annotation from the enhanced-analysis service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedAnalysis {
    #[serde(default)]
    pub enhanced_score: Option<f64>,

    #[serde(default)]
    pub business_impact: Option<PageBusinessImpact>,

    #[serde(default)]
    pub remediation: Option<PageRemediation>,
}

impl EnhancedAnalysis {
    /// Enhanced score rounded and clamped to `0..=100`
    pub fn score(&self) -> Option<u8> {
        self.enhanced_score
            .filter(|s| s.is_finite())
            .map(|s| s.round().clamp(0.0, 100.0) as u8)
    }
}

/// One page's scan outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// Absolute URL that was scanned
    pub url: String,

    /// Canonical site-relative path
    pub path: String,

    pub status: ScanStatus,

    /// 0-100, present only for completed scans
    pub score: Option<u8>,

    pub violations: Vec<Violation>,

    pub pass_count: u32,

    pub incomplete_count: u32,

    #[serde(default)]
    pub enhanced_analysis: Option<EnhancedAnalysis>,

    /// Failure reason for failed scans
    #[serde(default)]
    pub error: Option<String>,

    pub duration_ms: u64,
}

impl ScanResult {
    /// Builds a failed result; failed pages carry no violations or passes
    pub fn failed(url: &str, path: &str, error: String, duration_ms: u64) -> Self {
        Self {
            url: url.to_string(),
            path: path.to_string(),
            status: ScanStatus::Failed,
            score: None,
            violations: Vec::new(),
            pass_count: 0,
            incomplete_count: 0,
            enhanced_analysis: None,
            error: Some(error),
            duration_ms,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }
}
