//! Scan executor
//!
//! Scans discovered pages one at a time against the engine. A failure on one
//! page becomes a failed `ScanResult` for that page and never stops the run.

use crate::config::{ScanConfig, UserAgentConfig};
use crate::scan::engine::ScanEngine;
use crate::scan::enhance::HttpEnhancer;
use crate::scan::score::calculate_score;
use crate::scan::types::{EnhancedAnalysis, EngineResponse, ScanRequest, ScanResult, Violation};
use crate::state::ScanStatus;
use crate::url::page_url;
use std::collections::BTreeMap;
use std::time::Instant;
use url::Url;

/// Per-run scan parameters forwarded to the engine
#[derive(Debug, Clone, PartialEq)]
pub struct ScanSettings {
    pub wcag_level: String,
    pub include_best_practices: bool,
    pub include_experimental: bool,
    pub custom_headers: BTreeMap<String, String>,
    pub user_agent: String,
}

impl ScanSettings {
    /// Builds settings from the scan and user-agent configuration
    pub fn from_config(scan: &ScanConfig, user_agent: &UserAgentConfig) -> Self {
        Self {
            wcag_level: scan.wcag_level.clone(),
            include_best_practices: scan.include_best_practices,
            include_experimental: scan.include_experimental,
            custom_headers: scan.custom_headers.clone(),
            user_agent: user_agent.header_value(),
        }
    }

    fn request_for(&self, url: &Url) -> ScanRequest {
        ScanRequest {
            url: url.to_string(),
            wcag_level: self.wcag_level.clone(),
            include_best_practices: self.include_best_practices,
            include_experimental: self.include_experimental,
            custom_headers: self.custom_headers.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self::from_config(&ScanConfig::default(), &UserAgentConfig::default())
    }
}

/// Scans each page sequentially, in discovery order
///
/// # Arguments
///
/// * `engine` - The scan engine
/// * `base_url` - Target origin the page paths are joined onto
/// * `pages` - Canonical paths from discovery
/// * `settings` - Engine parameters
/// * `enhancer` - Optional enhanced-analysis service
///
/// # Returns
///
/// Exactly one `ScanResult` per page, in the same order as `pages`.
pub async fn execute_scans<E: ScanEngine>(
    engine: &E,
    base_url: &Url,
    pages: &[String],
    settings: &ScanSettings,
    enhancer: Option<&HttpEnhancer>,
) -> Vec<ScanResult> {
    let mut results = Vec::with_capacity(pages.len());

    for (index, path) in pages.iter().enumerate() {
        tracing::info!("Scanning page {}/{}: {}", index + 1, pages.len(), path);

        let mut result = scan_page(engine, base_url, path, settings).await;

        if result.is_completed() && result.enhanced_analysis.is_none() {
            if let Some(enhancer) = enhancer {
                result.enhanced_analysis = request_enhancement(enhancer, &result).await;
            }
        }

        match result.status {
            ScanStatus::Completed => tracing::info!(
                "{}: score {}, {} violation(s), {} pass(es)",
                path,
                result.score.unwrap_or(0),
                result.violation_count(),
                result.pass_count
            ),
            ScanStatus::Failed => tracing::warn!(
                "{}: scan failed: {}",
                path,
                result.error.as_deref().unwrap_or("unknown error")
            ),
        }

        results.push(result);
    }

    let failed = results.iter().filter(|r| !r.is_completed()).count();
    tracing::info!(
        "Scanned {} page(s), {} failed",
        results.len(),
        failed
    );

    results
}

async fn scan_page<E: ScanEngine>(
    engine: &E,
    base_url: &Url,
    path: &str,
    settings: &ScanSettings,
) -> ScanResult {
    let started = Instant::now();

    let url = match page_url(base_url, path) {
        Ok(url) => url,
        Err(e) => {
            return ScanResult::failed(base_url.as_str(), path, e.to_string(), 0);
        }
    };

    let request = settings.request_for(&url);
    let outcome = engine.scan(&request).await;
    let duration_ms = started.elapsed().as_millis() as u64;

    match outcome {
        Ok(response) => completed_result(url.as_str(), path, response, duration_ms),
        Err(e) => ScanResult::failed(url.as_str(), path, e.to_string(), duration_ms),
    }
}

/// Converts a successful engine response into a completed result
fn completed_result(
    url: &str,
    path: &str,
    response: EngineResponse,
    duration_ms: u64,
) -> ScanResult {
    let violations: Vec<Violation> = response.violations.into_iter().map(Violation::from).collect();
    let pass_count = u32::try_from(response.passes.len()).unwrap_or(u32::MAX);
    let incomplete_count = u32::try_from(response.incomplete.len()).unwrap_or(u32::MAX);

    let score = response
        .score
        .filter(|s| s.is_finite())
        .map(|s| s.round().clamp(0.0, 100.0) as u8)
        .unwrap_or_else(|| calculate_score(&violations, pass_count));

    let enhanced_analysis = response.enhanced_analysis.and_then(|raw| {
        match serde_json::from_value::<EnhancedAnalysis>(raw) {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                tracing::warn!("Ignoring malformed enhanced analysis for {}: {}", path, e);
                None
            }
        }
    });

    ScanResult {
        url: url.to_string(),
        path: path.to_string(),
        status: ScanStatus::Completed,
        score: Some(score),
        violations,
        pass_count,
        incomplete_count,
        enhanced_analysis,
        error: None,
        duration_ms,
    }
}

async fn request_enhancement(
    enhancer: &HttpEnhancer,
    result: &ScanResult,
) -> Option<EnhancedAnalysis> {
    match enhancer.enhance(result).await {
        Ok(analysis) => Some(analysis),
        Err(e) => {
            tracing::warn!("Enhanced analysis unavailable for {}: {}", result.path, e);
            None
        }
    }
}
