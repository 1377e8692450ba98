//! JSON report output

use crate::output::report::ScanReport;
use crate::output::traits::{OutputResult, ReportSink};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes a report as pretty-printed JSON, creating parent directories
///
/// # Arguments
///
/// * `report` - The finished report
/// * `output_path` - Destination file
pub fn write_json_report(report: &ScanReport, output_path: &Path) -> OutputResult<()> {
    let json = serde_json::to_string_pretty(report)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(output_path, json)?;
    tracing::debug!("Wrote JSON report to {}", output_path.display());

    Ok(())
}

/// Report sink writing a JSON file
#[derive(Debug, Clone)]
pub struct JsonReportWriter {
    path: PathBuf,
}

impl JsonReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for JsonReportWriter {
    fn write_report(&self, report: &ScanReport) -> OutputResult<()> {
        write_json_report(report, &self.path)
    }
}
