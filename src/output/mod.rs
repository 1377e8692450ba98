//! Output module for aggregating scan results and writing reports
//!
//! This module handles:
//! - Folding per-page scan results into an aggregate report
//! - Stamping the aggregate with run metadata
//! - Writing the report as JSON

mod aggregate;
mod json;
pub mod report;
mod traits;

pub use aggregate::aggregate;
pub use json::{write_json_report, JsonReportWriter};
pub use report::{AggregateReport, BusinessImpactSummary, PageSummary, RemediationPlan, ScanReport};
pub use traits::{OutputError, OutputResult, ReportSink};
