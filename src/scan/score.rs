//! Page score calculation
//!
//! The score is a relative health indicator, not a WCAG conformance metric:
//! every test point is worth the weight of a critical violation, and each
//! affected node subtracts its impact weight.

use crate::scan::types::Violation;

/// Weight of the worst possible outcome for one test point
const MAX_IMPACT_WEIGHT: u64 = 4;

/// Calculates a 0-100 score from a page's violations and pass count
///
/// `totalTests = passes + violations`; with nothing evaluable the page scores
/// 100. Otherwise the score is the share of the maximum weight not consumed
/// by weighted violations, rounded and clamped.
///
/// # Examples
///
/// ```
/// use a11y_sweep::scan::{calculate_score, Impact, Violation};
///
/// assert_eq!(calculate_score(&[], 0), 100);
///
/// let critical = Violation::new("image-alt", Some(Impact::Critical), Some(1));
/// assert_eq!(calculate_score(&[critical], 0), 0);
/// ```
pub fn calculate_score(violations: &[Violation], pass_count: u32) -> u8 {
    let total_tests = u64::from(pass_count) + violations.len() as u64;
    if total_tests == 0 {
        return 100;
    }

    let weighted_violations: u64 = violations
        .iter()
        .map(|v| v.impact.map_or(1, |impact| impact.weight()) * v.node_count_or_one())
        .sum();

    let max_possible_weight = total_tests * MAX_IMPACT_WEIGHT;
    let remaining = max_possible_weight as f64 - weighted_violations as f64;
    let score = (remaining / max_possible_weight as f64 * 100.0).round();

    score.clamp(0.0, 100.0) as u8
}
