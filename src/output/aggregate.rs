//! Aggregation of per-page results into a run report
//!
//! Failed pages are counted in `total_scans` but contribute nothing to the
//! score average or the violation and pass totals. Aggregation never fails:
//! empty input yields a zero-valued report.

use crate::output::report::{AggregateReport, BusinessImpactSummary, PageSummary, RemediationPlan};
use crate::scan::{EnhancedAnalysis, Impact, RemediationIssue, RiskLevel, ScanResult};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Business areas listed in the impact summary
const TOP_BUSINESS_AREAS: usize = 3;

/// Priority-1 issues kept in the remediation plan
const TOP_PRIORITY1_ISSUES: usize = 5;

/// Estimated hours per fix, by effort class
const QUICK_FIX_HOURS: f64 = 0.5;
const MEDIUM_FIX_HOURS: f64 = 4.0;
const COMPLEX_FIX_HOURS: f64 = 16.0;

/// Combines all page results into a single report
///
/// # Arguments
///
/// * `results` - Page results in scan order
///
/// # Returns
///
/// The aggregate report. Business impact and remediation roll-ups are present
/// only when at least one page carries an enhanced analysis.
pub fn aggregate(results: &[ScanResult]) -> AggregateReport {
    let completed: Vec<&ScanResult> = results.iter().filter(|r| r.is_completed()).collect();

    let mut violations_by_severity: BTreeMap<Impact, u64> =
        Impact::ALL.iter().map(|impact| (*impact, 0)).collect();
    let mut total_violations = 0u64;
    let mut total_passes = 0u64;

    for result in &completed {
        total_violations += result.violations.len() as u64;
        total_passes += u64::from(result.pass_count);

        for violation in &result.violations {
            *violations_by_severity.entry(violation.severity()).or_insert(0) +=
                violation.node_count_or_one();
        }
    }

    let annotations: Vec<&EnhancedAnalysis> = results
        .iter()
        .filter_map(|r| r.enhanced_analysis.as_ref())
        .collect();
    let has_enhanced_analysis = !annotations.is_empty();

    let (business_impact, remediation_plan) = if has_enhanced_analysis {
        (
            Some(summarize_business_impact(&annotations)),
            Some(build_remediation_plan(&annotations)),
        )
    } else {
        (None, None)
    };

    AggregateReport {
        total_scans: results.len(),
        completed_scans: completed.len(),
        failed_scans: results.len() - completed.len(),
        overall_score: mean_score(&completed),
        total_violations,
        total_passes,
        violations_by_severity,
        has_enhanced_analysis,
        business_impact,
        remediation_plan,
        pages: results.iter().map(page_summary).collect(),
    }
}

fn mean_score(completed: &[&ScanResult]) -> u8 {
    if completed.is_empty() {
        return 0;
    }

    let sum: u64 = completed
        .iter()
        .map(|r| u64::from(r.score.unwrap_or(0)))
        .sum();
    (sum as f64 / completed.len() as f64).round().clamp(0.0, 100.0) as u8
}

fn page_summary(result: &ScanResult) -> PageSummary {
    PageSummary {
        url: result.url.clone(),
        path: result.path.clone(),
        status: result.status,
        score: result.score.unwrap_or(0),
        enhanced_score: result.enhanced_analysis.as_ref().and_then(|a| a.score()),
        violation_count: result.violation_count(),
        error: result.error.clone(),
    }
}

fn summarize_business_impact(annotations: &[&EnhancedAnalysis]) -> BusinessImpactSummary {
    let mut summary = BusinessImpactSummary::default();

    // Area -> (pages mentioning it, first-seen position)
    let mut area_counts: HashMap<&str, (usize, usize)> = HashMap::new();

    for impact in annotations.iter().filter_map(|a| a.business_impact.as_ref()) {
        summary.overall_risk = summary.overall_risk.max(impact.risk_level);
        if impact.risk_level == RiskLevel::High {
            summary.pages_at_risk += 1;
        }
        if let Some(cost) = impact.estimated_cost {
            summary.estimated_remediation_cost += cost.max;
        }

        let mut seen_on_page = HashSet::new();
        for area in &impact.business_areas {
            if !seen_on_page.insert(area.as_str()) {
                continue;
            }
            let next_position = area_counts.len();
            area_counts
                .entry(area.as_str())
                .or_insert((0, next_position))
                .0 += 1;
        }
    }

    let mut areas: Vec<(&str, usize, usize)> = area_counts
        .into_iter()
        .map(|(area, (count, position))| (area, count, position))
        .collect();
    areas.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    summary.top_business_areas = areas
        .into_iter()
        .take(TOP_BUSINESS_AREAS)
        .map(|(area, _, _)| area.to_string())
        .collect();

    summary
}

fn build_remediation_plan(annotations: &[&EnhancedAnalysis]) -> RemediationPlan {
    let mut plan = RemediationPlan::default();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut issues: Vec<RemediationIssue> = Vec::new();

    for remediation in annotations.iter().filter_map(|a| a.remediation.as_ref()) {
        plan.quick_fixes += u64::from(remediation.quick_fixes);
        plan.medium_fixes += u64::from(remediation.medium_fixes);
        plan.complex_fixes += u64::from(remediation.complex_fixes);

        for issue in &remediation.priority1 {
            if seen.insert((issue.title.as_str(), issue.description.as_str())) {
                issues.push(issue.clone());
            }
        }
    }

    plan.estimated_total_hours = plan.quick_fixes as f64 * QUICK_FIX_HOURS
        + plan.medium_fixes as f64 * MEDIUM_FIX_HOURS
        + plan.complex_fixes as f64 * COMPLEX_FIX_HOURS;

    issues.truncate(TOP_PRIORITY1_ISSUES);
    plan.top_priority1_issues = issues;

    plan
}
